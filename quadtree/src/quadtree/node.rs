use super::rect_pool::RectHandle;
use super::types::{ObjectId, NODE_COUNT, NO_NODE};
use super::Quadtree;
use common::shapes::Rectangle;

/// One partition of the tree, stored in the arena on [`Quadtree`].
///
/// `region` is a working copy of the pooled rectangle behind `bounds`; both
/// are written together at (re)initialization. Child slot order is NE, NW,
/// SW, SE, matching the overlap-mask bit order.
pub(crate) struct Node {
    pub(crate) region: Rectangle,
    pub(crate) bounds: RectHandle,
    pub(crate) level: u32,
    pub(crate) is_leaf: bool,
    pub(crate) objects: Vec<ObjectId>,
    pub(crate) children: [u32; NODE_COUNT],
    pub(crate) next_free: u32,
}

impl Node {
    pub(crate) fn new(region: Rectangle, bounds: RectHandle, level: u32) -> Self {
        Self {
            region,
            bounds,
            level,
            is_leaf: true,
            objects: Vec::new(),
            children: [NO_NODE; NODE_COUNT],
            next_free: NO_NODE,
        }
    }
}

impl Quadtree {
    /// Takes a node off the free list, or grows the arena. Recycled nodes
    /// keep their `objects` capacity across split/clear cycles.
    pub(crate) fn alloc_node(
        &mut self,
        region: Rectangle,
        bounds: RectHandle,
        level: u32,
    ) -> u32 {
        if self.free_node != NO_NODE {
            let index = self.free_node;
            let node = &mut self.nodes[index as usize];
            self.free_node = node.next_free;
            node.region = region;
            node.bounds = bounds;
            node.level = level;
            node.is_leaf = true;
            node.objects.clear();
            node.children = [NO_NODE; NODE_COUNT];
            node.next_free = NO_NODE;
            index
        } else {
            self.nodes.push(Node::new(region, bounds, level));
            (self.nodes.len() - 1) as u32
        }
    }

    pub(crate) fn recycle_node(&mut self, index: u32) {
        debug_assert_ne!(index, NO_NODE, "the root node is never recycled");
        let node = &mut self.nodes[index as usize];
        debug_assert!(node.is_leaf, "only cleared leaves go back to the pool");
        debug_assert!(node.objects.is_empty());
        node.next_free = self.free_node;
        self.free_node = index;
    }
}

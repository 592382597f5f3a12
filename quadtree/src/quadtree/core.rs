use super::types::{quadrant_mask, Bounded, ObjectId, NODE_COUNT, NO_NODE, ROOT_NODE};
use super::Quadtree;
use crate::error::QuadtreeResult;
use common::shapes::Rectangle;

impl Quadtree {
    /// Starts tracking an object and places it into every overlapping leaf.
    ///
    /// The object's current bounds are cloned into the rectangle pool and
    /// become the placement of record until the next `update` or `remove`.
    /// An object entirely outside the root region is cached but placed in
    /// zero leaves. Re-inserting a tracked id replaces its old placement.
    pub fn insert(&mut self, object: &impl Bounded) -> QuadtreeResult<()> {
        let id = object.id();
        if self.object_bounds.contains_key(&id) {
            self.remove_id(id)?;
        }

        let handle = self.rect_pool.acquire_from(&object.bounding_box());
        self.object_bounds.insert(id, handle);
        let bounds = *self.rect_pool.get(handle)?;

        if !self.nodes[ROOT_NODE as usize].region.intersects(&bounds) {
            return Ok(());
        }
        self.place(ROOT_NODE, id, &bounds)
    }

    /// Descends to every leaf the cached rectangle overlaps and records the
    /// object there, splitting leaves that exceed the capacity threshold.
    pub(crate) fn place(
        &mut self,
        node_idx: u32,
        id: ObjectId,
        bounds: &Rectangle,
    ) -> QuadtreeResult<()> {
        let node = &self.nodes[node_idx as usize];
        if !node.is_leaf {
            let mask = quadrant_mask(node.region.mid_x(), node.region.mid_y(), bounds);
            let children = node.children;
            // Fast path: non-straddling objects descend into a single child.
            if mask.count_ones() == 1 {
                let child = children[mask.trailing_zeros() as usize];
                return self.place(child, id, bounds);
            }
            for (slot, &child) in children.iter().enumerate() {
                if mask & (1 << slot) != 0 {
                    self.place(child, id, bounds)?;
                }
            }
            return Ok(());
        }

        self.nodes[node_idx as usize].objects.push(id);
        self.object_nodes.entry(id).or_default().push(node_idx);

        let node = &self.nodes[node_idx as usize];
        if node.objects.len() > self.max_objects && node.level < self.max_levels {
            self.split(node_idx);
            self.redistribute(node_idx)?;
        }
        Ok(())
    }

    /// Turns a leaf into an internal node with four children exactly
    /// quartering its region. Child order: NE, NW, SW, SE.
    fn split(&mut self, node_idx: u32) {
        let region = self.nodes[node_idx as usize].region;
        let next_level = self.nodes[node_idx as usize].level + 1;
        let sub_width = region.width / 2.0;
        let sub_height = region.height / 2.0;
        let x = region.x;
        let y = region.y;
        let mid_x = region.mid_x();
        let mid_y = region.mid_y();

        let child_regions = [
            Rectangle::new(mid_x, y, sub_width, sub_height),
            Rectangle::new(x, y, sub_width, sub_height),
            Rectangle::new(x, mid_y, sub_width, sub_height),
            Rectangle::new(mid_x, mid_y, sub_width, sub_height),
        ];

        let mut children = [NO_NODE; NODE_COUNT];
        for (slot, child_region) in child_regions.iter().enumerate() {
            let bounds = self.rect_pool.acquire_from(child_region);
            children[slot] = self.alloc_node(*child_region, bounds, next_level);
        }

        let node = &mut self.nodes[node_idx as usize];
        node.children = children;
        node.is_leaf = false;
    }

    /// Pushes a freshly split node's former objects down into its children,
    /// re-running the overlap-mask placement for each. Placements the object
    /// holds in other subtrees are untouched; only the splitting parent
    /// leaves its leaf list.
    fn redistribute(&mut self, node_idx: u32) -> QuadtreeResult<()> {
        let moved = std::mem::take(&mut self.nodes[node_idx as usize].objects);
        let region = self.nodes[node_idx as usize].region;
        let mid_x = region.mid_x();
        let mid_y = region.mid_y();
        let children = self.nodes[node_idx as usize].children;

        for &id in &moved {
            if let Some(nodes) = self.object_nodes.get_mut(&id) {
                if let Some(pos) = nodes.iter().position(|&n| n == node_idx) {
                    nodes.swap_remove(pos);
                }
            }

            let Some(&handle) = self.object_bounds.get(&id) else {
                debug_assert!(false, "tracked object missing cached bounds");
                continue;
            };
            let bounds = *self.rect_pool.get(handle)?;
            let mask = quadrant_mask(mid_x, mid_y, &bounds);
            for (slot, &child) in children.iter().enumerate() {
                if mask & (1 << slot) != 0 {
                    self.place(child, id, &bounds)?;
                }
            }
        }

        // Hand the drained vector back so the node keeps its capacity.
        let mut moved = moved;
        moved.clear();
        self.nodes[node_idx as usize].objects = moved;
        Ok(())
    }
}

//! Broad-phase spatial index over mobile, variable-sized 2D objects.
//!
//! A region quadtree tracking axis-aligned bounding rectangles. Callers drive
//! it once per simulation tick: [`Quadtree::update`] after an object moves,
//! [`Quadtree::retrieve`] for candidate sets, [`Quadtree::insert`] /
//! [`Quadtree::remove`] on spawn and destroy. All operations are synchronous
//! and single-threaded; rectangles and nodes are pooled so steady-state ticks
//! do not allocate.

mod config;
mod core;
mod maintenance;
mod node;
mod query_rect;
mod rect_pool;
mod types;

use crate::error::QuadtreeResult;
use common::shapes::Rectangle;
use fxhash::{FxHashMap, FxHashSet};

pub use config::Config;
pub use rect_pool::{RectHandle, RectPool};
pub use types::{Bounded, ObjectId};

use node::Node;
use types::{NodeList, NO_NODE, ROOT_NODE};

pub struct Quadtree {
    /// Node arena; index 0 is the root and never moves or gets recycled.
    pub(crate) nodes: Vec<Node>,
    /// Head of the intrusive free list threaded through recycled nodes.
    pub(crate) free_node: u32,
    pub(crate) rect_pool: RectPool,
    /// Last rectangle used to place each object, owned by `rect_pool`.
    pub(crate) object_bounds: FxHashMap<ObjectId, RectHandle>,
    /// Every leaf currently holding each object. Straddlers list several.
    pub(crate) object_nodes: FxHashMap<ObjectId, NodeList>,
    /// Reusable dedupe scratch for retrieval.
    pub(crate) seen: FxHashSet<ObjectId>,
    pub(crate) max_objects: usize,
    pub(crate) max_levels: u32,
}

impl Quadtree {
    pub fn new(bounds: Rectangle) -> Self {
        Self::new_with_config(bounds, Config::default())
    }

    pub fn new_with_config(bounds: Rectangle, config: Config) -> Self {
        let mut rect_pool = RectPool::with_capacity(config.pool_size);
        let root_bounds = rect_pool.acquire_from(&bounds);
        let mut nodes = Vec::with_capacity(config.pool_size.max(1));
        nodes.push(Node::new(bounds, root_bounds, 0));
        Self {
            nodes,
            free_node: NO_NODE,
            rect_pool,
            object_bounds: FxHashMap::default(),
            object_nodes: FxHashMap::default(),
            seen: FxHashSet::default(),
            max_objects: config.max_objects,
            max_levels: config.max_levels,
        }
    }

    /// The region covered by the root node.
    pub fn bounds(&self) -> Rectangle {
        self.nodes[ROOT_NODE as usize].region
    }

    /// Number of tracked objects.
    pub fn len(&self) -> usize {
        self.object_bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.object_bounds.is_empty()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.object_bounds.contains_key(&id)
    }

    /// Number of leaves currently holding the object; 0 when untracked or
    /// when its cached bounds miss the root region entirely.
    pub fn nodes_holding(&self, id: ObjectId) -> usize {
        self.object_nodes.get(&id).map_or(0, |nodes| nodes.len())
    }

    /// The rectangle the object was last placed with, if tracked.
    pub fn cached_bounds(&self, id: ObjectId) -> QuadtreeResult<Option<Rectangle>> {
        match self.object_bounds.get(&id) {
            Some(&handle) => Ok(Some(*self.rect_pool.get(handle)?)),
            None => Ok(None),
        }
    }

    /// (arena slots, live pooled rectangles, tracked objects), for tests
    /// and capacity diagnostics.
    pub fn storage_counts(&self) -> (usize, usize, usize) {
        (
            self.nodes.len(),
            self.rect_pool.live(),
            self.object_bounds.len(),
        )
    }

    /// Appends the region of every live node, root first, children in
    /// NE, NW, SW, SE order.
    pub fn all_node_bounding_boxes(&self, bounding_boxes: &mut Vec<Rectangle>) {
        self.node_bounding_boxes(ROOT_NODE, bounding_boxes);
    }

    fn node_bounding_boxes(&self, node_idx: u32, bounding_boxes: &mut Vec<Rectangle>) {
        let node = &self.nodes[node_idx as usize];
        bounding_boxes.push(node.region);
        if !node.is_leaf {
            for child in node.children {
                self.node_bounding_boxes(child, bounding_boxes);
            }
        }
    }
}

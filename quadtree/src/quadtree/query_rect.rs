use super::types::{quadrant_mask, ObjectId, ROOT_NODE};
use super::Quadtree;
use common::shapes::Rectangle;
use fxhash::FxHashSet;

impl Quadtree {
    /// Every tracked object whose placement overlaps `query_bounds`,
    /// unordered and deduplicated. Objects straddling several leaves under
    /// the query appear exactly once.
    pub fn retrieve(&mut self, query_bounds: &Rectangle) -> Vec<ObjectId> {
        let mut result = Vec::new();
        self.retrieve_into(query_bounds, &mut result);
        result
    }

    /// Allocation-avoiding variant of [`Quadtree::retrieve`].
    pub fn retrieve_into(&mut self, query_bounds: &Rectangle, result: &mut Vec<ObjectId>) {
        self.for_each_in(query_bounds, |id| result.push(id));
    }

    /// Walks the query's candidate set without materializing it.
    pub fn for_each_in<F>(&mut self, query_bounds: &Rectangle, mut f: F)
    where
        F: FnMut(ObjectId),
    {
        // The scratch set lives on the tree so per-frame queries reuse its
        // allocation.
        let mut seen = std::mem::take(&mut self.seen);
        seen.clear();
        self.collect(ROOT_NODE, query_bounds, &mut seen, &mut f);
        self.seen = seen;
    }

    fn collect<F>(
        &self,
        node_idx: u32,
        query_bounds: &Rectangle,
        seen: &mut FxHashSet<ObjectId>,
        f: &mut F,
    ) where
        F: FnMut(ObjectId),
    {
        let node = &self.nodes[node_idx as usize];
        for &id in &node.objects {
            if seen.insert(id) {
                f(id);
            }
        }
        if !node.is_leaf {
            let mask = quadrant_mask(node.region.mid_x(), node.region.mid_y(), query_bounds);
            for (slot, &child) in node.children.iter().enumerate() {
                if mask & (1 << slot) != 0 {
                    self.collect(child, query_bounds, seen, f);
                }
            }
        }
    }
}

use super::types::{Bounded, ObjectId, NO_NODE, ROOT_NODE};
use super::Quadtree;
use crate::error::QuadtreeResult;

impl Quadtree {
    /// Re-indexes an object whose bounds may have changed since placement.
    ///
    /// No-op when the object is untracked (update before insert) or when its
    /// current bounds compare equal by value to the cached rectangle. A real
    /// move is a full re-placement: detach from every holding leaf, swap the
    /// pooled rectangle for a fresh clone of the new bounds, re-place from
    /// the root.
    pub fn update(&mut self, object: &impl Bounded) -> QuadtreeResult<()> {
        let id = object.id();
        let Some(&handle) = self.object_bounds.get(&id) else {
            return Ok(());
        };
        let old_bounds = *self.rect_pool.get(handle)?;
        let new_bounds = object.bounding_box();
        if old_bounds == new_bounds {
            return Ok(());
        }

        self.detach(id);
        self.rect_pool.release(handle)?;
        let fresh = self.rect_pool.acquire_from(&new_bounds);
        self.object_bounds.insert(id, fresh);

        if !self.nodes[ROOT_NODE as usize].region.intersects(&new_bounds) {
            return Ok(());
        }
        self.place(ROOT_NODE, id, &new_bounds)
    }

    /// Stops tracking an object. No-op when it was never inserted. Subtrees
    /// left sparse by removal are not merged.
    pub fn remove(&mut self, object: &impl Bounded) -> QuadtreeResult<()> {
        self.remove_id(object.id())
    }

    pub fn remove_id(&mut self, id: ObjectId) -> QuadtreeResult<()> {
        let Some(handle) = self.object_bounds.remove(&id) else {
            return Ok(());
        };
        self.detach(id);
        self.rect_pool.release(handle)
    }

    /// Pulls the object out of every leaf listed for it and drops the leaf
    /// list. The cached rectangle is left to the caller.
    fn detach(&mut self, id: ObjectId) {
        if let Some(nodes) = self.object_nodes.remove(&id) {
            for node_idx in nodes {
                let objects = &mut self.nodes[node_idx as usize].objects;
                if let Some(pos) = objects.iter().position(|&held| held == id) {
                    objects.swap_remove(pos);
                }
            }
        }
    }

    /// Empties the whole tree: purges bookkeeping for every tracked object,
    /// releases every child node and its rectangle back to the pools, and
    /// resets the root to a single empty leaf. The root keeps its own bounds
    /// rectangle.
    pub fn clear(&mut self) -> QuadtreeResult<()> {
        self.clear_node(ROOT_NODE)?;
        // Objects cached with zero placements (bounds outside the root
        // region) are reachable from no leaf; purge them directly.
        for (_, handle) in self.object_bounds.drain() {
            self.rect_pool.release(handle)?;
        }
        self.object_nodes.clear();
        Ok(())
    }

    fn clear_node(&mut self, node_idx: u32) -> QuadtreeResult<()> {
        // Objects whose last holding leaf is cleared lose their bookkeeping
        // entries; straddlers held elsewhere keep theirs.
        while let Some(id) = self.nodes[node_idx as usize].objects.pop() {
            let gone = match self.object_nodes.get_mut(&id) {
                Some(nodes) => {
                    if let Some(pos) = nodes.iter().position(|&n| n == node_idx) {
                        nodes.swap_remove(pos);
                    }
                    nodes.is_empty()
                }
                None => false,
            };
            if gone {
                self.object_nodes.remove(&id);
                if let Some(handle) = self.object_bounds.remove(&id) {
                    self.rect_pool.release(handle)?;
                }
            }
        }

        if !self.nodes[node_idx as usize].is_leaf {
            let children = self.nodes[node_idx as usize].children;
            for child in children {
                self.clear_node(child)?;
                self.rect_pool.release(self.nodes[child as usize].bounds)?;
                self.recycle_node(child);
            }
            let node = &mut self.nodes[node_idx as usize];
            node.children = [NO_NODE; 4];
            node.is_leaf = true;
        }
        Ok(())
    }
}

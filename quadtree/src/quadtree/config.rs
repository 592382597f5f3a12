#[derive(Debug, Clone)]
pub struct Config {
    /// A leaf holding more than this many objects splits, unless it sits at
    /// `max_levels` already.
    pub max_objects: usize,
    /// Depth cap. Leaves at this level accept unbounded objects.
    pub max_levels: u32,
    /// Node-arena and rectangle-pool slots reserved up front.
    pub pool_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_objects: 10,
            max_levels: 4,
            // With a max depth of 4 a fully split tree holds 341 nodes.
            pool_size: 341,
        }
    }
}

//! Configuration types for the tree walker

/// Order in which pending directories are taken off the worklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    /// Stack worklist: a directory's subtree is finished before its later siblings.
    #[default]
    DepthFirst,
    /// Queue worklist: all entries at depth N are recorded before depth N + 1.
    BreadthFirst,
}

/// Configuration for tree walking behavior.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    pub traversal: Traversal,
    /// Sort each directory's children by name before classifying them.
    /// Off by default: records follow the order the OS enumerates entries.
    pub sort_entries: bool,
    /// Descend at most N levels. Depth 1 records only the root's immediate
    /// children; directories at the limit are recorded but not entered.
    pub max_depth: Option<usize>,
}

impl WalkerConfig {
    /// Whether a directory found at `depth` (root children are depth 1)
    /// should be descended into.
    pub fn should_descend(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth < max)
    }
}

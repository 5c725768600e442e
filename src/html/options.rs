//! Import options and configuration.

/// Options for importing HTML into document nodes.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Maximum element nesting depth; deeper subtrees are imported as
    /// their flattened text content
    pub max_depth: usize,

    /// Drop whitespace-only text nodes directly under `body`
    pub drop_whitespace_text: bool,
}

impl ImportOptions {
    /// Create new import options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth (at least 1).
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    /// Enable or disable dropping whitespace-only text between blocks.
    pub fn with_drop_whitespace_text(mut self, drop: bool) -> Self {
        self.drop_whitespace_text = drop;
        self
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            max_depth: 512,
            drop_whitespace_text: false,
        }
    }
}

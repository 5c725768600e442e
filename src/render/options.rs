//! Rendering options and configuration.

/// Options for rendering documents as Markdown.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Character to use for unordered list markers
    pub list_marker: char,

    /// Escape special Markdown characters in text
    pub escape_special_chars: bool,

    /// Fence written around code blocks
    pub code_fence: String,

    /// Maximum heading level (1-6); deeper headings are clamped
    pub max_heading_level: u8,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Enable or disable escaping of special characters.
    pub fn with_escape(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Set the code fence. Fences shorter than three characters are ignored.
    pub fn with_code_fence(mut self, fence: impl Into<String>) -> Self {
        let fence = fence.into();
        if fence.chars().count() >= 3 {
            self.code_fence = fence;
        }
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            list_marker: '-',
            escape_special_chars: false,
            code_fence: "```".to_string(),
            max_heading_level: 6,
        }
    }
}

//! Decoration ranges.

use serde::{Deserialize, Serialize};

/// A styling instruction over a character span of one text leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecorationRange {
    /// Token kind that produced the range (e.g. "title", "bold")
    pub mark_type: String,

    /// Start offset in characters (inclusive)
    pub start: usize,

    /// End offset in characters (exclusive)
    pub end: usize,
}

impl DecorationRange {
    /// Create a new range.
    pub fn new(mark_type: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            mark_type: mark_type.into(),
            start,
            end,
        }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the range covers nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slice of `text` covered by this range.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        let byte = |offset: usize| {
            text.char_indices()
                .nth(offset)
                .map_or(text.len(), |(index, _)| index)
        };
        &text[byte(self.start)..byte(self.end)]
    }
}

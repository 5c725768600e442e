//! Text leaves and their formatting marks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A run of text with consistent formatting.
///
/// Text runs are the leaves of the document tree: they never have children,
/// and formatting is a flat set of flags rather than nested wrappers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Formatting flags
    #[serde(flatten)]
    pub marks: Marks,
}

impl TextRun {
    /// Create a new text run without formatting.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Marks::default(),
        }
    }

    /// Create an empty text run.
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Create a text run with the given marks.
    pub fn with_marks(text: impl Into<String>, marks: Marks) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::with_marks(text, Marks::from(Mark::Bold))
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::with_marks(text, Marks::from(Mark::Italic))
    }

    /// Create an inline-code text run.
    pub fn code(text: impl Into<String>) -> Self {
        Self::with_marks(text, Marks::from(Mark::Code))
    }

    /// Add a mark to this run, keeping the existing ones.
    pub fn mark(mut self, mark: Mark) -> Self {
        self.marks.set(mark, true);
        self
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Formatting flags attached to a text run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marks {
    /// Bold text
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,

    /// Italic text
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,

    /// Underlined text
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,

    /// Strikethrough text
    #[serde(default, skip_serializing_if = "is_false")]
    pub strikethrough: bool,

    /// Inline code
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Marks {
    /// Create an empty mark set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a mark is set.
    pub fn has(&self, mark: Mark) -> bool {
        match mark {
            Mark::Bold => self.bold,
            Mark::Italic => self.italic,
            Mark::Underline => self.underline,
            Mark::Strikethrough => self.strikethrough,
            Mark::Code => self.code,
        }
    }

    /// Set or clear a mark.
    pub fn set(&mut self, mark: Mark, value: bool) {
        match mark {
            Mark::Bold => self.bold = value,
            Mark::Italic => self.italic = value,
            Mark::Underline => self.underline = value,
            Mark::Strikethrough => self.strikethrough = value,
            Mark::Code => self.code = value,
        }
    }

    /// Builder-style variant of [`Marks::set`].
    pub fn with(mut self, mark: Mark) -> Self {
        self.set(mark, true);
        self
    }

    /// Union of two mark sets.
    pub fn merge(&self, other: &Marks) -> Marks {
        Marks {
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
            strikethrough: self.strikethrough || other.strikethrough,
            code: self.code || other.code,
        }
    }

    /// Check if no mark is set.
    pub fn is_empty(&self) -> bool {
        !(self.bold || self.italic || self.underline || self.strikethrough || self.code)
    }

    /// Iterate over the marks that are set, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Mark> + '_ {
        Mark::ALL.into_iter().filter(move |mark| self.has(*mark))
    }
}

impl From<Mark> for Marks {
    fn from(mark: Mark) -> Self {
        Marks::new().with(mark)
    }
}

/// A single formatting mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    /// Bold
    Bold,
    /// Italic
    Italic,
    /// Underline
    Underline,
    /// Strikethrough
    Strikethrough,
    /// Inline code
    Code,
}

impl Mark {
    /// Every mark, in declaration order.
    pub const ALL: [Mark; 5] = [
        Mark::Bold,
        Mark::Italic,
        Mark::Underline,
        Mark::Strikethrough,
        Mark::Code,
    ];

    /// The mark's name as used in serialized documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Underline => "underline",
            Mark::Strikethrough => "strikethrough",
            Mark::Code => "code",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mark {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mark::ALL
            .into_iter()
            .find(|mark| mark.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownMark(s.to_string()))
    }
}

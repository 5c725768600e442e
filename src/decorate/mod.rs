//! Decoration tokenizer.
//!
//! Tokenizes each text leaf against a markup grammar and reduces the
//! top-level tokens to character ranges the renderer can style.
//!
//! # Example
//!
//! ```
//! use markleaf::decorate::{decorate_text, DecorationRange};
//!
//! let ranges = decorate_text("# Title");
//! assert_eq!(ranges, vec![DecorationRange::new("title", 0, 7)]);
//! assert!(decorate_text("plain text").is_empty());
//! ```

mod grammar;
mod markdown;
mod range;
mod token;

pub use grammar::{Grammar, Rule};
pub use range::DecorationRange;
pub use token::{Token, TokenContent};

use rayon::prelude::*;
use serde::Serialize;

use crate::model::{Document, Node, Path, TextRun};

/// Decorate a node with the built-in markdown grammar. Elements yield no
/// ranges; only text leaves are decorated.
pub fn decorate(node: &Node) -> Vec<DecorationRange> {
    match node {
        Node::Text(run) => decorate_text(&run.text),
        Node::Element(_) => Vec::new(),
    }
}

/// Decorate a string with the built-in markdown grammar.
pub fn decorate_text(text: &str) -> Vec<DecorationRange> {
    ranges_from_tokens(&Grammar::markdown().tokenize(text))
}

/// Reduce top-level tokens to ranges. Every token advances the offset;
/// only typed tokens produce a range.
pub fn ranges_from_tokens(tokens: &[Token]) -> Vec<DecorationRange> {
    let mut ranges = Vec::new();
    let mut start = 0;

    for token in tokens {
        let length = token.len();
        if let Token::Typed { kind, .. } = token {
            ranges.push(DecorationRange::new(kind.clone(), start, start + length));
        }
        start += length;
    }

    ranges
}

/// Decoration ranges of one text leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafDecorations {
    /// Path of the text leaf
    pub path: Path,

    /// Ranges over the leaf's text
    pub ranges: Vec<DecorationRange>,
}

/// Decorates nodes and whole documents with a chosen grammar.
#[derive(Debug, Clone)]
pub struct Decorator<'g> {
    grammar: &'g Grammar,
    parallel: bool,
}

impl Decorator<'static> {
    /// Create a decorator using the built-in markdown grammar.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for Decorator<'static> {
    fn default() -> Self {
        Self {
            grammar: Grammar::markdown(),
            parallel: true,
        }
    }
}

impl<'g> Decorator<'g> {
    /// Use a different grammar.
    pub fn with_grammar<'h>(self, grammar: &'h Grammar) -> Decorator<'h> {
        Decorator {
            grammar,
            parallel: self.parallel,
        }
    }

    /// Enable or disable parallel decoration of documents.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The grammar in use.
    pub fn grammar(&self) -> &Grammar {
        self.grammar
    }

    /// Decorate a string.
    pub fn decorate_text(&self, text: &str) -> Vec<DecorationRange> {
        ranges_from_tokens(&self.grammar.tokenize(text))
    }

    /// Decorate a node; elements yield no ranges.
    pub fn decorate(&self, node: &Node) -> Vec<DecorationRange> {
        match node {
            Node::Text(run) => self.decorate_text(&run.text),
            Node::Element(_) => Vec::new(),
        }
    }

    /// Decorate every text leaf of a document, in document order. Leaves
    /// without any range are left out.
    pub fn decorate_document(&self, document: &Document) -> Vec<LeafDecorations> {
        let leaves = document.text_leaves();
        log::debug!(
            "decorating {} text leaves (parallel: {})",
            leaves.len(),
            self.parallel
        );

        let decorate_leaf = |(path, run): (Path, &TextRun)| {
            let ranges = self.decorate_text(&run.text);
            (!ranges.is_empty()).then_some(LeafDecorations { path, ranges })
        };

        if self.parallel {
            leaves.into_par_iter().filter_map(decorate_leaf).collect()
        } else {
            leaves.into_iter().filter_map(decorate_leaf).collect()
        }
    }
}

//! Regex grammar and tokenizer.
//!
//! A grammar is an ordered list of rules. Tokenizing starts from the whole
//! input as one untyped piece; each rule in turn splits the untyped pieces
//! left over by the rules before it. Typed tokens are never re-split, so the
//! concatenation of the output always equals the input.
//!
//! The `regex` crate has no look-around, so rules mark context with named
//! groups instead: text matched by `lb` (before) or `la` (after) must match
//! but is left outside the token.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use super::token::{Token, TokenContent};
use crate::error::Result;

/// Grammar nested inside a rule's matches.
#[derive(Clone)]
enum Inner {
    Static(fn() -> &'static Grammar),
    Owned(Arc<Grammar>),
}

impl Inner {
    fn grammar(&self) -> &Grammar {
        match self {
            Inner::Static(get) => get(),
            Inner::Owned(grammar) => grammar,
        }
    }
}

/// A named pattern producing typed tokens.
#[derive(Clone)]
pub struct Rule {
    name: String,
    pattern: Regex,
    alias: Option<String>,
    inner: Option<Inner>,
}

impl Rule {
    /// Compile a rule.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
            alias: None,
            inner: None,
        })
    }

    /// Set a secondary name.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Tokenize matched text again with an inner grammar.
    pub fn with_inner(mut self, grammar: Grammar) -> Self {
        self.inner = Some(Inner::Owned(Arc::new(grammar)));
        self
    }

    /// Tokenize matched text with a grammar living in a static. Lets
    /// grammars nest themselves (bold inside italic inside bold).
    pub fn with_static_inner(mut self, grammar: fn() -> &'static Grammar) -> Self {
        self.inner = Some(Inner::Static(grammar));
        self
    }

    /// Rule name, used as the token kind.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Secondary name.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Split one untyped piece, pushing untyped and typed tokens to `out`.
    fn split_into(&self, text: &str, out: &mut Vec<Token>) {
        let mut rest = 0;
        let mut search = 0;

        while search <= text.len() {
            let Some(caps) = self.pattern.captures_at(text, search) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };
            let start = caps.name("lb").map_or(whole.start(), |m| m.end());
            let end = caps.name("la").map_or(whole.end(), |m| m.start());

            if end <= start {
                // Nothing to emit; step past the match start.
                match text[whole.start()..].chars().next() {
                    Some(c) => search = whole.end().max(whole.start() + c.len_utf8()),
                    None => break,
                }
                continue;
            }

            if start > rest {
                out.push(Token::Str(text[rest..start].to_string()));
            }
            log::trace!("{} matched {}..{}", self.name, start, end);
            out.push(self.token(&text[start..end]));
            rest = end;
            search = end;
        }

        if rest < text.len() {
            out.push(Token::Str(text[rest..].to_string()));
        }
    }

    fn token(&self, text: &str) -> Token {
        let content = match &self.inner {
            Some(inner) => TokenContent::Nested(inner.grammar().tokenize(text)),
            None => TokenContent::Text(text.to_string()),
        };
        Token::Typed {
            kind: self.name.clone(),
            content,
            alias: self.alias.clone(),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("alias", &self.alias)
            .field("nested", &self.inner.is_some())
            .finish()
    }
}

/// An ordered set of rules.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: Vec<Rule>,
}

impl Grammar {
    /// Create an empty grammar (matches nothing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append a rule in place.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Rules in application order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Built-in lightweight markup grammar.
    pub fn markdown() -> &'static Grammar {
        super::markdown::markdown()
    }

    /// Tokenize text. The output concatenates back to `text`.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut pieces = if text.is_empty() {
            Vec::new()
        } else {
            vec![Token::Str(text.to_string())]
        };

        for rule in &self.rules {
            let mut next = Vec::with_capacity(pieces.len());
            for piece in pieces {
                match piece {
                    Token::Str(text) => rule.split_into(&text, &mut next),
                    typed => next.push(typed),
                }
            }
            pieces = next;
        }

        pieces
    }
}

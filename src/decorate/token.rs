//! Tokenizer output.

use serde::Serialize;

/// A piece of tokenized text. Concatenating the text of a token list
/// always reproduces the tokenized input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Token {
    /// Text no rule matched
    Str(String),

    /// Text matched by a grammar rule
    Typed {
        /// Name of the rule that produced the token
        kind: String,
        /// Matched text, or its sub-tokens when the rule has an inner grammar
        content: TokenContent,
        /// Secondary name for styling
        #[serde(skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
    },
}

/// Content of a typed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TokenContent {
    /// Plain matched text
    Text(String),
    /// Tokens produced by the rule's inner grammar
    Nested(Vec<Token>),
}

impl Token {
    /// Create an untyped token.
    pub fn str(text: impl Into<String>) -> Self {
        Token::Str(text.into())
    }

    /// Create a typed token holding plain text.
    pub fn typed(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Token::Typed {
            kind: kind.into(),
            content: TokenContent::Text(text.into()),
            alias: None,
        }
    }

    /// Rule name for typed tokens.
    pub fn kind(&self) -> Option<&str> {
        match self {
            Token::Str(_) => None,
            Token::Typed { kind, .. } => Some(kind),
        }
    }

    /// Check if this token was produced by a rule.
    pub fn is_typed(&self) -> bool {
        matches!(self, Token::Typed { .. })
    }

    /// Covered length in characters (nested content counted recursively).
    pub fn len(&self) -> usize {
        match self {
            Token::Str(text) => text.chars().count(),
            Token::Typed { content, .. } => content.len(),
        }
    }

    /// Check if the token covers no characters.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Covered text.
    pub fn text(&self) -> String {
        match self {
            Token::Str(text) => text.clone(),
            Token::Typed { content, .. } => content.text(),
        }
    }
}

impl TokenContent {
    /// Covered length in characters.
    pub fn len(&self) -> usize {
        match self {
            TokenContent::Text(text) => text.chars().count(),
            TokenContent::Nested(tokens) => tokens.iter().map(Token::len).sum(),
        }
    }

    /// Check if the content covers no characters.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Covered text.
    pub fn text(&self) -> String {
        match self {
            TokenContent::Text(text) => text.clone(),
            TokenContent::Nested(tokens) => tokens.iter().map(Token::text).collect(),
        }
    }
}

//! Text carried by AST nodes
//!
//! Nodes built by the parser point at their source tokens; nodes built
//! programmatically only have a string. `TextContent` holds either form so
//! the emitter and accessors treat both the same way.

use std::fmt;

use crate::tsdoc::parsing::token_sequence::TokenSequence;

#[derive(Debug, Clone, PartialEq)]
pub enum TextContent {
    /// Text backed by source tokens.
    Excerpt(TokenSequence),
    /// Text supplied directly, with no source location.
    Literal(String),
}

impl TextContent {
    pub fn from_excerpt(sequence: TokenSequence) -> Self {
        TextContent::Excerpt(sequence)
    }

    pub fn from_literal(text: impl Into<String>) -> Self {
        TextContent::Literal(text.into())
    }

    /// The text itself, rendered from tokens when excerpt-backed.
    pub fn text(&self) -> String {
        match self {
            TextContent::Excerpt(sequence) => sequence.to_string(),
            TextContent::Literal(text) => text.clone(),
        }
    }

    /// The backing tokens, when this content came from a parse.
    pub fn excerpt(&self) -> Option<&TokenSequence> {
        match self {
            TextContent::Excerpt(sequence) => Some(sequence),
            TextContent::Literal(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TextContent::Excerpt(sequence) => sequence.is_empty(),
            TextContent::Literal(text) => text.is_empty(),
        }
    }
}

impl fmt::Display for TextContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextContent::Excerpt(sequence) => write!(f, "{sequence}"),
            TextContent::Literal(text) => f.write_str(text),
        }
    }
}

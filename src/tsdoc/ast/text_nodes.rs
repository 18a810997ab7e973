//! Leaf text nodes
//!
//! These four kinds carry the comment's ordinary text: coalesced plain
//! text runs, the soft break standing in for each line ending, decoded
//! backslash escapes, and the single-token error placeholder the parser
//! emits when a construct fails to parse.

use crate::tsdoc::ast::text_content::TextContent;
use crate::tsdoc::messages::TsdocMessageId;
use crate::tsdoc::parsing::token_sequence::TokenSequence;

/// A run of ordinary text. The parser coalesces adjacent words, spacing,
/// and insignificant punctuation into one node.
#[derive(Debug, Clone, PartialEq)]
pub struct DocPlainText {
    content: TextContent,
}

impl DocPlainText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            content: TextContent::from_literal(text),
        }
    }

    pub fn from_excerpt(excerpt: TokenSequence) -> Self {
        Self {
            content: TextContent::from_excerpt(excerpt),
        }
    }

    pub fn text(&self) -> String {
        self.content.text()
    }

    pub fn content(&self) -> &TextContent {
        &self.content
    }
}

/// A line ending inside the comment. Renders as a single space when the
/// surrounding text flows together, but preserves the break for
/// round-tripping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocSoftBreak {
    excerpt: Option<TokenSequence>,
}

impl DocSoftBreak {
    pub fn new() -> Self {
        Self { excerpt: None }
    }

    pub fn from_excerpt(excerpt: TokenSequence) -> Self {
        Self {
            excerpt: Some(excerpt),
        }
    }

    pub fn excerpt(&self) -> Option<&TokenSequence> {
        self.excerpt.as_ref()
    }
}

/// A backslash escape such as `\{`. Only produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct DocEscapedText {
    encoded: TokenSequence,
    decoded_text: String,
}

impl DocEscapedText {
    pub fn from_excerpt(encoded: TokenSequence, decoded_text: String) -> Self {
        Self {
            encoded,
            decoded_text,
        }
    }

    /// The backslash and the escaped character, as written.
    pub fn encoded_excerpt(&self) -> &TokenSequence {
        &self.encoded
    }

    /// The escaped character without the backslash.
    pub fn decoded_text(&self) -> &str {
        &self.decoded_text
    }
}

/// The placeholder for a construct that failed to parse. It owns exactly
/// one source token; the rest of the failed construct is re-scanned as
/// ordinary content. Only produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct DocErrorText {
    text_excerpt: TokenSequence,
    message_id: TsdocMessageId,
    error_message: String,
    error_location: TokenSequence,
}

impl DocErrorText {
    pub fn from_excerpt(
        text_excerpt: TokenSequence,
        message_id: TsdocMessageId,
        error_message: String,
        error_location: TokenSequence,
    ) -> Self {
        Self {
            text_excerpt,
            message_id,
            error_message,
            error_location,
        }
    }

    /// The one token consumed as the error placeholder.
    pub fn text_excerpt(&self) -> &TokenSequence {
        &self.text_excerpt
    }

    pub fn text(&self) -> String {
        self.text_excerpt.to_string()
    }

    pub fn message_id(&self) -> TsdocMessageId {
        self.message_id
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Where the problem was detected, which may be past the placeholder
    /// token itself.
    pub fn error_location(&self) -> &TokenSequence {
        &self.error_location
    }
}

//! A single diagnostic produced during parsing

use crate::tsdoc::ast::node::DocNode;
use crate::tsdoc::messages::message_id::TsdocMessageId;
use crate::tsdoc::parsing::token_sequence::TokenSequence;
use crate::tsdoc::text::TextRange;

/// One diagnostic: a stable id, the human-readable text, and where in the
/// source it applies.
///
/// The formatted `text` (with its `(line,column):` prefix) is computed when
/// the message is constructed, so reading it later never re-scans the
/// buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserMessage {
    message_id: TsdocMessageId,
    unformatted_text: String,
    text: String,
    text_range: TextRange,
    token_sequence: Option<TokenSequence>,
    doc_node: Option<Box<DocNode>>,
}

impl ParserMessage {
    pub fn new(message_id: TsdocMessageId, unformatted_text: String, text_range: TextRange) -> Self {
        let text = Self::format_message_text(&unformatted_text, &text_range);
        Self {
            message_id,
            unformatted_text,
            text,
            text_range,
            token_sequence: None,
            doc_node: None,
        }
    }

    /// A message anchored to a token sequence. The text range becomes the
    /// sequence's containing range.
    pub fn with_token_sequence(
        message_id: TsdocMessageId,
        unformatted_text: String,
        token_sequence: TokenSequence,
    ) -> Self {
        let text_range = token_sequence.get_containing_text_range();
        let text = Self::format_message_text(&unformatted_text, &text_range);
        Self {
            message_id,
            unformatted_text,
            text,
            text_range,
            token_sequence: Some(token_sequence),
            doc_node: None,
        }
    }

    /// A message anchored to a token sequence and carrying the node that
    /// reported it.
    pub fn with_doc_node(
        message_id: TsdocMessageId,
        unformatted_text: String,
        token_sequence: TokenSequence,
        doc_node: DocNode,
    ) -> Self {
        let mut message = Self::with_token_sequence(message_id, unformatted_text, token_sequence);
        message.doc_node = Some(Box::new(doc_node));
        message
    }

    pub fn message_id(&self) -> TsdocMessageId {
        self.message_id
    }

    /// The message text without the location prefix.
    pub fn unformatted_text(&self) -> &str {
        &self.unformatted_text
    }

    /// The message text prefixed with `(line,column):` when the range is
    /// non-empty and locatable.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_range(&self) -> &TextRange {
        &self.text_range
    }

    pub fn token_sequence(&self) -> Option<&TokenSequence> {
        self.token_sequence.as_ref()
    }

    /// The node the problem was reported on, when there is one.
    pub fn doc_node(&self) -> Option<&DocNode> {
        self.doc_node.as_deref()
    }

    fn format_message_text(text: &str, text_range: &TextRange) -> String {
        let text = if text.is_empty() {
            "An unknown error occurred"
        } else {
            text
        };
        if text_range.is_empty() {
            return text.to_string();
        }
        let location = text_range.get_location(text_range.pos());
        if location.line > 0 {
            format!("({},{}): {}", location.line, location.column, text)
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_carries_location_prefix() {
        let range = TextRange::from_string("line one\nline two".to_string());
        let message = ParserMessage::new(
            TsdocMessageId::UnnecessaryBackslash,
            "A backslash must precede another character".to_string(),
            range.get_new_range(9, 13),
        );
        assert_eq!(
            message.text(),
            "(2,1): A backslash must precede another character"
        );
        assert_eq!(
            message.unformatted_text(),
            "A backslash must precede another character"
        );
    }

    #[test]
    fn test_empty_range_has_no_prefix() {
        let message = ParserMessage::new(
            TsdocMessageId::CommentNotFound,
            "Expecting a \"/**\" comment".to_string(),
            TextRange::empty(),
        );
        assert_eq!(message.text(), "Expecting a \"/**\" comment");
    }
}

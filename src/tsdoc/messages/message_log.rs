//! Ordered diagnostic sink
//!
//! All stages log into one `ParserMessageLog` owned by the parser context.
//! Messages are appended in the order problems are found and are never
//! dropped; callers decide severity and presentation.

use crate::tsdoc::ast::node::DocNode;
use crate::tsdoc::ast::text_nodes::DocErrorText;
use crate::tsdoc::messages::message_id::TsdocMessageId;
use crate::tsdoc::messages::parser_message::ParserMessage;
use crate::tsdoc::parsing::token_sequence::TokenSequence;
use crate::tsdoc::text::TextRange;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParserMessageLog {
    messages: Vec<ParserMessage>,
}

impl ParserMessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulated messages, oldest first.
    pub fn messages(&self) -> &[ParserMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn add_message(&mut self, message: ParserMessage) {
        self.messages.push(message);
    }

    pub fn add_message_for_text_range(
        &mut self,
        message_id: TsdocMessageId,
        text: impl Into<String>,
        text_range: &TextRange,
    ) {
        self.add_message(ParserMessage::new(message_id, text.into(), text_range.clone()));
    }

    pub fn add_message_for_token_sequence(
        &mut self,
        message_id: TsdocMessageId,
        text: impl Into<String>,
        token_sequence: &TokenSequence,
    ) {
        self.add_message(ParserMessage::with_token_sequence(
            message_id,
            text.into(),
            token_sequence.clone(),
        ));
    }

    /// Log the diagnostic an error-text node was created with. The node's
    /// own excerpt is the highlighted range, and the node rides along on
    /// the message.
    pub fn add_message_for_doc_error_text(&mut self, error_text: &DocErrorText) {
        self.add_message(ParserMessage::with_doc_node(
            error_text.message_id(),
            error_text.error_message().to_string(),
            error_text.text_excerpt().clone(),
            DocNode::ErrorText(error_text.clone()),
        ));
    }
}

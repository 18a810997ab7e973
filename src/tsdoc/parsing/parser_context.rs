//! Parse result bundle

use std::sync::Arc;

use crate::tsdoc::ast::comment::DocComment;
use crate::tsdoc::ast::node::DocNode;
use crate::tsdoc::config::configuration::TsdocConfiguration;
use crate::tsdoc::messages::message_log::ParserMessageLog;
use crate::tsdoc::text::TextRange;
use crate::tsdoc::token::Token;

/// Everything one parse produced, including the intermediate stages.
///
/// The intermediates are kept because callers and tests use them: the token
/// stream and verbatim node list are what the coverage and round-trip
/// checks run against, and the log accumulates messages from every stage.
#[derive(Debug, Clone)]
pub struct ParserContext {
    pub configuration: Arc<TsdocConfiguration>,
    /// The full input that was scanned for a comment.
    pub source_range: TextRange,
    /// The `/** ... */` span inside the input. Empty when extraction failed.
    pub comment_range: TextRange,
    /// One range per comment line, with the decoration stripped.
    pub lines: Vec<TextRange>,
    /// The token stream covering the lines, closed by `EndOfInput`.
    pub tokens: Arc<[Token]>,
    /// The flat node list before tag classification.
    pub verbatim_nodes: Vec<DocNode>,
    pub doc_comment: DocComment,
    pub log: ParserMessageLog,
}

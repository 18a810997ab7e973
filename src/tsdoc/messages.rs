//! Diagnostics
//!
//! Parsing never fails with an error value for malformed comment text; it
//! reports problems through a message log instead. This module holds the
//! closed id catalog, the message record, and the log the pipeline stages
//! append to.

pub mod message_id;
pub mod message_log;
pub mod parser_message;

pub use message_id::{TsdocMessageId, UnknownMessageIdError, ALL_TSDOC_MESSAGE_IDS};
pub use message_log::ParserMessageLog;
pub use parser_message::ParserMessage;

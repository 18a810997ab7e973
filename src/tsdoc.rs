//! TSDoc doc comment parsing, classification, and emission
//!
//! The pipeline runs in fixed stages: [lexing] frames the `/** ... */`
//! comment and tokenizes its lines, [parsing] builds the verbatim node
//! list, classifies tags against a [config], and groups paragraphs, and
//! [emit] renders the resulting [ast] back to normalized source text.
//! [declaration_reference] is the `{@link}` target micro-grammar,
//! [messages] the diagnostic catalog and log, and [testing] the coverage
//! and round-trip checkers.

pub mod ast;
pub mod config;
pub mod declaration_reference;
pub mod emit;
pub mod lexing;
pub mod messages;
pub mod parsing;
pub mod testing;
pub mod text;
pub mod token;

pub use ast::DocComment;
pub use config::TsdocConfiguration;
pub use declaration_reference::DeclarationReference;
pub use emit::TsdocEmitter;
pub use messages::{ParserMessageLog, TsdocMessageId};
pub use parsing::{ParserContext, TsdocParser};
pub use text::TextRange;

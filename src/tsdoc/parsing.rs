//! Parsing
//!
//! The pipeline stages after tokenization:
//!
//! 1. Verbatim node parsing. The token stream becomes a flat node
//!    list that reproduces the input exactly. See [node_parser].
//! 2. Tag classification. Tags are resolved against the configuration
//!    and the flat list becomes a populated comment. See [assembler].
//! 3. Paragraph grouping. Section content is split into paragraphs at
//!    blank lines. See [paragraph_splitter].
//!
//! [parser] drives all stages behind one facade; [token_reader] and
//! [token_sequence] are the cursor and excerpt primitives every stage
//! shares.

pub mod assembler;
pub mod node_parser;
pub mod paragraph_splitter;
pub mod parser;
pub mod parser_context;
pub mod token_reader;
pub mod token_sequence;

pub use assembler::assemble_comment;
pub use node_parser::parse_verbatim_nodes;
pub use paragraph_splitter::split_paragraphs;
pub use parser::TsdocParser;
pub use parser_context::ParserContext;
pub use token_reader::{Marker, TokenReader};
pub use token_sequence::TokenSequence;

//! Lexing
//!
//! The first two pipeline stages live here:
//!
//! 1. Line extraction. The `/** ... */` frame is located and each
//!    comment line is captured as a `TextRange` with the comment
//!    decoration stripped. See [line_extractor].
//! 2. Tokenization. Each line is tokenized with logos and the stream
//!    is closed with synthetic `Newline` and `EndOfInput` markers.
//!    See [tokenizer].
//!
//! Both stages preserve source positions exactly: every token's range
//! points back into the original buffer, and nothing downstream ever
//! rewrites those ranges.

pub mod line_extractor;
pub mod tokenizer;

pub use line_extractor::{extract_lines, ExtractedComment};
pub use tokenizer::read_tokens;

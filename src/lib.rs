//! # tsdoc-parser
//!
//! A parser, tag classifier, and canonical emitter for TSDoc doc
//! comments. Parse a `/** ... */` comment with [`tsdoc::TsdocParser`],
//! inspect the classified [`tsdoc::DocComment`] and its diagnostic log,
//! and render it back with [`tsdoc::DocComment::emit_as_tsdoc`]. Parsing
//! never fails: malformed text becomes diagnostics plus error nodes, and
//! the parsed tree always reproduces its input exactly.

pub mod tsdoc;

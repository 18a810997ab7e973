//! Declaration references
//!
//! The `{@link}` / `{@inheritDoc}` target micro-grammar: an optional
//! package or import path, an optional symbol component path, and an
//! optional meaning suffix. [model] holds the typed representation and
//! its canonical `Display`; [parse] holds the recursive-descent parser
//! behind [`DeclarationReference::parse`].

pub mod model;
pub mod parse;

pub use model::{
    escape_component_string, unescape_component_string, Component, ComponentPath,
    DeclarationReference, Meaning, ModuleSource, Navigation, Source, SymbolReference,
};
pub use parse::ReferenceSyntaxError;

//! Emission
//!
//! Renders parsed or programmatically built comments back to `/** ... */`
//! source text in canonical form. See [tsdoc_emitter].

pub mod tsdoc_emitter;

pub use tsdoc_emitter::TsdocEmitter;

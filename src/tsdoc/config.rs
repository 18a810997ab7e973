//! Configuration and registries
//!
//! Which tags exist, how they are written, which node kinds containers
//! accept, and which optional diagnostics are enabled. A
//! `TsdocConfiguration` is built once and passed read-only into the
//! parsing passes.

pub mod configuration;
pub mod doc_node_manager;
pub mod standard_tags;
pub mod tag_definition;

pub use configuration::{TagDefinitionError, TsdocConfiguration, TsdocValidationConfiguration};
pub use doc_node_manager::DocNodeManager;
pub use tag_definition::{
    explain_invalid_tag_name, validate_tsdoc_tag_name, InvalidTagNameError, Standardization,
    TsdocTagDefinition, TsdocTagSyntaxKind,
};

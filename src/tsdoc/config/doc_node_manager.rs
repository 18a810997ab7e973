//! Node-kind registry
//!
//! Tracks which node kinds exist and which kinds each container accepts
//! as children. The built-in kinds are registered by the configuration;
//! applications that define custom node kinds register them here before
//! appending such nodes anywhere.
//!
//! All methods on this type treat violations as programming errors and
//! panic with a descriptive message.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::tsdoc::ast::node::DocNode;

/// Lazy-compiled regex for validating node kind ids.
static KIND_ID_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").unwrap());

#[derive(Debug, Clone, Default)]
pub struct DocNodeManager {
    /// kind id -> name of the package that registered it
    registered: HashMap<String, String>,
    allowed_children: HashMap<String, HashSet<String>>,
}

impl DocNodeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register node kinds on behalf of `package_name`. Panics if a kind
    /// id is malformed or was already registered.
    pub fn register_doc_nodes(&mut self, package_name: &str, kind_ids: &[&str]) {
        for kind_id in kind_ids {
            if !KIND_ID_REGEX.is_match(kind_id) {
                panic!(
                    "The node kind id {kind_id:?} is not valid: it must start with an upper \
                     case letter and contain only letters and numbers"
                );
            }
            if let Some(existing) = self.registered.get(*kind_id) {
                panic!(
                    "The node kind {kind_id:?} was already registered by package {existing:?}"
                );
            }
            self.registered
                .insert(kind_id.to_string(), package_name.to_string());
        }
    }

    /// Declare that `parent_kind_id` may contain each of `child_kind_ids`.
    /// All kinds involved must already be registered.
    pub fn register_allowable_children(&mut self, parent_kind_id: &str, child_kind_ids: &[&str]) {
        self.ensure_registered(parent_kind_id);
        for child_kind_id in child_kind_ids {
            self.ensure_registered(child_kind_id);
        }
        let children = self
            .allowed_children
            .entry(parent_kind_id.to_string())
            .or_default();
        for child_kind_id in child_kind_ids {
            children.insert(child_kind_id.to_string());
        }
    }

    pub fn is_registered(&self, kind_id: &str) -> bool {
        self.registered.contains_key(kind_id)
    }

    /// Panics if `kind_id` was never registered.
    pub fn ensure_registered(&self, kind_id: &str) {
        if !self.is_registered(kind_id) {
            panic!(
                "The node kind {kind_id:?} was never registered with this configuration's \
                 DocNodeManager"
            );
        }
    }

    pub fn is_allowed_child(&self, parent_kind_id: &str, child_kind_id: &str) -> bool {
        self.allowed_children
            .get(parent_kind_id)
            .is_some_and(|children| children.contains(child_kind_id))
    }

    /// Validate one append. Panics if the child's kind is unregistered or
    /// not on the parent's allow list.
    pub fn ensure_allowed_child(&self, parent_kind_id: &str, child: &DocNode) {
        let child_kind_id = child.kind_id();
        self.ensure_registered(child_kind_id);
        if !self.is_allowed_child(parent_kind_id, child_kind_id) {
            panic!(
                "The node kind {child_kind_id:?} is not an allowed child of {parent_kind_id:?}"
            );
        }
    }
}

//! Content containers
//!
//! A section holds the content that follows a position in the comment:
//! the summary before any block tag, or the body of one block. After the
//! paragraph stage, loose section content is grouped into paragraphs.
//!
//! Appending validates the child kind against the configuration's node
//! registry; an invalid append is a programming error and panics.

use crate::tsdoc::ast::node::{DocNode, DocNodeKind};
use crate::tsdoc::config::configuration::TsdocConfiguration;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocSection {
    nodes: Vec<DocNode>,
}

impl DocSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(
        nodes: impl IntoIterator<Item = DocNode>,
        configuration: &TsdocConfiguration,
    ) -> Self {
        let mut section = Self::new();
        section.append_nodes(nodes, configuration);
        section
    }

    pub fn nodes(&self) -> &[DocNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn append_node(&mut self, node: DocNode, configuration: &TsdocConfiguration) {
        configuration
            .doc_node_manager()
            .ensure_allowed_child(DocNodeKind::Section.kind_id(), &node);
        self.nodes.push(node);
    }

    pub fn append_nodes(
        &mut self,
        nodes: impl IntoIterator<Item = DocNode>,
        configuration: &TsdocConfiguration,
    ) {
        for node in nodes {
            self.append_node(node, configuration);
        }
    }

    /// Replace the content wholesale. Used by the paragraph stage, which
    /// regroups already-validated nodes.
    pub fn replace_nodes(&mut self, nodes: Vec<DocNode>) {
        self.nodes = nodes;
    }
}

/// A run of section content between blank lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocParagraph {
    nodes: Vec<DocNode>,
}

impl DocParagraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[DocNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn append_node(&mut self, node: DocNode, configuration: &TsdocConfiguration) {
        configuration
            .doc_node_manager()
            .ensure_allowed_child(DocNodeKind::Paragraph.kind_id(), &node);
        self.nodes.push(node);
    }

    pub fn append_nodes(
        &mut self,
        nodes: impl IntoIterator<Item = DocNode>,
        configuration: &TsdocConfiguration,
    ) {
        for node in nodes {
            self.append_node(node, configuration);
        }
    }
}

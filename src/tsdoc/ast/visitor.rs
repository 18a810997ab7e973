//! Visitor trait for traversing the doc tree
//!
//! Implement `DocNodeVisitor` to walk a comment or any subtree. Each visit
//! method corresponds to a node type. Default implementations are empty,
//! so only the methods of interest need to be overridden. Traversal is
//! preorder: a node is visited before its children.
//!
//! # Example
//!
//! ```ignore
//! struct TagNameCollector {
//!     names: Vec<String>,
//! }
//!
//! impl DocNodeVisitor for TagNameCollector {
//!     fn visit_inline_tag(&mut self, tag: &DocInlineTag) {
//!         self.names.push(tag.tag_name().to_string());
//!     }
//! }
//!
//! let mut visitor = TagNameCollector { names: Vec::new() };
//! comment.accept(&mut visitor);
//! ```

use crate::tsdoc::ast::block_tag::DocBlockTag;
use crate::tsdoc::ast::blocks::{DocBlock, DocParamBlock, DocParamCollection};
use crate::tsdoc::ast::code::{DocCodeSpan, DocFencedCode};
use crate::tsdoc::ast::comment::DocComment;
use crate::tsdoc::ast::inline_tags::{DocInheritDocTag, DocInlineTag, DocLinkTag};
use crate::tsdoc::ast::node::{DocCustomNode, DocNode, DocNodeKind};
use crate::tsdoc::ast::sections::{DocParagraph, DocSection};
use crate::tsdoc::ast::text_nodes::{DocErrorText, DocEscapedText, DocPlainText, DocSoftBreak};
use crate::tsdoc::ast::xml::{DocXmlAttribute, DocXmlElement, DocXmlEndTag, DocXmlStartTag};

pub trait DocNodeVisitor {
    // Containers
    fn visit_comment(&mut self, _comment: &DocComment) {}
    fn visit_section(&mut self, _section: &DocSection) {}
    fn visit_paragraph(&mut self, _paragraph: &DocParagraph) {}
    fn visit_block(&mut self, _block: &DocBlock) {}
    fn visit_param_block(&mut self, _block: &DocParamBlock) {}
    fn visit_param_collection(&mut self, _collection: &DocParamCollection) {}
    fn visit_xml_element(&mut self, _element: &DocXmlElement) {}
    fn visit_custom(&mut self, _node: &DocCustomNode) {}

    // Tags
    fn visit_block_tag(&mut self, _tag: &DocBlockTag) {}
    fn visit_inline_tag(&mut self, _tag: &DocInlineTag) {}
    fn visit_link_tag(&mut self, _tag: &DocLinkTag) {}
    fn visit_inherit_doc_tag(&mut self, _tag: &DocInheritDocTag) {}

    // Leaf nodes
    fn visit_plain_text(&mut self, _text: &DocPlainText) {}
    fn visit_soft_break(&mut self, _soft_break: &DocSoftBreak) {}
    fn visit_escaped_text(&mut self, _text: &DocEscapedText) {}
    fn visit_error_text(&mut self, _text: &DocErrorText) {}
    fn visit_code_span(&mut self, _code: &DocCodeSpan) {}
    fn visit_fenced_code(&mut self, _code: &DocFencedCode) {}
    fn visit_xml_start_tag(&mut self, _tag: &DocXmlStartTag) {}
    fn visit_xml_end_tag(&mut self, _tag: &DocXmlEndTag) {}
    fn visit_xml_attribute(&mut self, _attribute: &DocXmlAttribute) {}
}

/// Helper to visit every node in a content slice.
pub fn visit_children(visitor: &mut dyn DocNodeVisitor, nodes: &[DocNode]) {
    for node in nodes {
        node.accept(visitor);
    }
}

/// Common interface for all doc nodes.
pub trait AstNode {
    /// The registry identity of this node type.
    fn kind_id(&self) -> &str;

    /// Accept a visitor for traversing this node and its children.
    fn accept(&self, visitor: &mut dyn DocNodeVisitor);
}

impl AstNode for DocPlainText {
    fn kind_id(&self) -> &str {
        DocNodeKind::PlainText.kind_id()
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_plain_text(self);
    }
}

impl AstNode for DocSoftBreak {
    fn kind_id(&self) -> &str {
        DocNodeKind::SoftBreak.kind_id()
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_soft_break(self);
    }
}

impl AstNode for DocEscapedText {
    fn kind_id(&self) -> &str {
        DocNodeKind::EscapedText.kind_id()
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_escaped_text(self);
    }
}

impl AstNode for DocErrorText {
    fn kind_id(&self) -> &str {
        DocNodeKind::ErrorText.kind_id()
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_error_text(self);
    }
}

impl AstNode for DocBlockTag {
    fn kind_id(&self) -> &str {
        DocNodeKind::BlockTag.kind_id()
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_block_tag(self);
    }
}

impl AstNode for DocInlineTag {
    fn kind_id(&self) -> &str {
        DocNodeKind::InlineTag.kind_id()
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_inline_tag(self);
    }
}

impl AstNode for DocLinkTag {
    fn kind_id(&self) -> &str {
        DocNodeKind::LinkTag.kind_id()
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_link_tag(self);
    }
}

impl AstNode for DocInheritDocTag {
    fn kind_id(&self) -> &str {
        DocNodeKind::InheritDocTag.kind_id()
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_inherit_doc_tag(self);
    }
}

impl AstNode for DocCodeSpan {
    fn kind_id(&self) -> &str {
        DocNodeKind::CodeSpan.kind_id()
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_code_span(self);
    }
}

impl AstNode for DocFencedCode {
    fn kind_id(&self) -> &str {
        DocNodeKind::FencedCode.kind_id()
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_fenced_code(self);
    }
}

impl AstNode for DocXmlAttribute {
    fn kind_id(&self) -> &str {
        DocNodeKind::XmlAttribute.kind_id()
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_xml_attribute(self);
    }
}

impl AstNode for DocXmlStartTag {
    fn kind_id(&self) -> &str {
        DocNodeKind::XmlStartTag.kind_id()
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_xml_start_tag(self);
        for attribute in self.attributes() {
            attribute.accept(visitor);
        }
    }
}

impl AstNode for DocXmlEndTag {
    fn kind_id(&self) -> &str {
        DocNodeKind::XmlEndTag.kind_id()
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_xml_end_tag(self);
    }
}

impl AstNode for DocXmlElement {
    fn kind_id(&self) -> &str {
        DocNodeKind::XmlElement.kind_id()
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_xml_element(self);
        self.start_tag().accept(visitor);
        visit_children(visitor, self.nodes());
        self.end_tag().accept(visitor);
    }
}

impl AstNode for DocParagraph {
    fn kind_id(&self) -> &str {
        DocNodeKind::Paragraph.kind_id()
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_paragraph(self);
        visit_children(visitor, self.nodes());
    }
}

impl AstNode for DocSection {
    fn kind_id(&self) -> &str {
        DocNodeKind::Section.kind_id()
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_section(self);
        visit_children(visitor, self.nodes());
    }
}

impl AstNode for DocBlock {
    fn kind_id(&self) -> &str {
        DocNodeKind::Block.kind_id()
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_block(self);
        self.block_tag().accept(visitor);
        self.content().accept(visitor);
    }
}

impl AstNode for DocParamBlock {
    fn kind_id(&self) -> &str {
        DocNodeKind::ParamBlock.kind_id()
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_param_block(self);
        self.block_tag().accept(visitor);
        self.content().accept(visitor);
    }
}

impl AstNode for DocParamCollection {
    fn kind_id(&self) -> &str {
        DocNodeKind::ParamCollection.kind_id()
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_param_collection(self);
        for block in self.blocks() {
            block.accept(visitor);
        }
    }
}

impl AstNode for DocCustomNode {
    fn kind_id(&self) -> &str {
        DocCustomNode::kind_id(self)
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_custom(self);
        visit_children(visitor, self.nodes());
    }
}

impl AstNode for DocComment {
    fn kind_id(&self) -> &str {
        DocNodeKind::Comment.kind_id()
    }

    /// Children are visited in the same order `emit_as_tsdoc` renders
    /// them: summary, the standard blocks, custom blocks, `@inheritDoc`,
    /// and finally the modifier tags.
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        visitor.visit_comment(self);
        self.summary_section.accept(visitor);
        if let Some(block) = &self.remarks_block {
            block.accept(visitor);
        }
        if let Some(block) = &self.private_remarks {
            block.accept(visitor);
        }
        if let Some(block) = &self.deprecated_block {
            block.accept(visitor);
        }
        if !self.params.is_empty() {
            self.params.accept(visitor);
        }
        if !self.type_params.is_empty() {
            self.type_params.accept(visitor);
        }
        if let Some(block) = &self.returns_block {
            block.accept(visitor);
        }
        for block in &self.see_blocks {
            block.accept(visitor);
        }
        for block in &self.custom_blocks {
            block.accept(visitor);
        }
        if let Some(tag) = &self.inherit_doc_tag {
            tag.accept(visitor);
        }
        for tag in self.modifier_tag_set.nodes() {
            tag.accept(visitor);
        }
    }
}

impl AstNode for DocNode {
    fn kind_id(&self) -> &str {
        DocNode::kind_id(self)
    }
    fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        DocNode::accept(self, visitor)
    }
}

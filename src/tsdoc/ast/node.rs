//! Node kinds and the uniform content enum
//!
//! `DocNode` is the heterogeneous content type held by sections,
//! paragraphs, and XML elements. Each variant wraps one node struct.
//! `kind_id` is the string identity the node registry uses when
//! validating parent and child relationships, and the extension point
//! for custom node kinds.

use crate::tsdoc::ast::block_tag::DocBlockTag;
use crate::tsdoc::ast::blocks::{DocBlock, DocParamBlock, DocParamCollection};
use crate::tsdoc::ast::code::{DocCodeSpan, DocFencedCode};
use crate::tsdoc::ast::comment::DocComment;
use crate::tsdoc::ast::inline_tags::{DocInheritDocTag, DocInlineTag, DocLinkTag, InlineTagParts};
use crate::tsdoc::ast::sections::{DocParagraph, DocSection};
use crate::tsdoc::ast::text_nodes::{DocErrorText, DocEscapedText, DocPlainText, DocSoftBreak};
use crate::tsdoc::ast::visitor::{AstNode, DocNodeVisitor};
use crate::tsdoc::ast::xml::{DocXmlAttribute, DocXmlElement, DocXmlEndTag, DocXmlStartTag};
use crate::tsdoc::config::configuration::TsdocConfiguration;
use crate::tsdoc::parsing::token_sequence::TokenSequence;

/// The built-in node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocNodeKind {
    Block,
    BlockTag,
    CodeSpan,
    Comment,
    ErrorText,
    EscapedText,
    FencedCode,
    InheritDocTag,
    InlineTag,
    LinkTag,
    Paragraph,
    ParamBlock,
    ParamCollection,
    PlainText,
    Section,
    SoftBreak,
    XmlAttribute,
    XmlElement,
    XmlEndTag,
    XmlStartTag,
}

pub const ALL_DOC_NODE_KINDS: &[DocNodeKind] = &[
    DocNodeKind::Block,
    DocNodeKind::BlockTag,
    DocNodeKind::CodeSpan,
    DocNodeKind::Comment,
    DocNodeKind::ErrorText,
    DocNodeKind::EscapedText,
    DocNodeKind::FencedCode,
    DocNodeKind::InheritDocTag,
    DocNodeKind::InlineTag,
    DocNodeKind::LinkTag,
    DocNodeKind::Paragraph,
    DocNodeKind::ParamBlock,
    DocNodeKind::ParamCollection,
    DocNodeKind::PlainText,
    DocNodeKind::Section,
    DocNodeKind::SoftBreak,
    DocNodeKind::XmlAttribute,
    DocNodeKind::XmlElement,
    DocNodeKind::XmlEndTag,
    DocNodeKind::XmlStartTag,
];

impl DocNodeKind {
    pub fn kind_id(self) -> &'static str {
        match self {
            DocNodeKind::Block => "Block",
            DocNodeKind::BlockTag => "BlockTag",
            DocNodeKind::CodeSpan => "CodeSpan",
            DocNodeKind::Comment => "Comment",
            DocNodeKind::ErrorText => "ErrorText",
            DocNodeKind::EscapedText => "EscapedText",
            DocNodeKind::FencedCode => "FencedCode",
            DocNodeKind::InheritDocTag => "InheritDocTag",
            DocNodeKind::InlineTag => "InlineTag",
            DocNodeKind::LinkTag => "LinkTag",
            DocNodeKind::Paragraph => "Paragraph",
            DocNodeKind::ParamBlock => "ParamBlock",
            DocNodeKind::ParamCollection => "ParamCollection",
            DocNodeKind::PlainText => "PlainText",
            DocNodeKind::Section => "Section",
            DocNodeKind::SoftBreak => "SoftBreak",
            DocNodeKind::XmlAttribute => "XmlAttribute",
            DocNodeKind::XmlElement => "XmlElement",
            DocNodeKind::XmlEndTag => "XmlEndTag",
            DocNodeKind::XmlStartTag => "XmlStartTag",
        }
    }
}

/// A node whose kind was registered by the application rather than built
/// in. The kind id must be registered with the configuration's node
/// manager before the node can be appended anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct DocCustomNode {
    kind_id: String,
    nodes: Vec<DocNode>,
}

impl DocCustomNode {
    pub fn new(kind_id: impl Into<String>) -> Self {
        Self {
            kind_id: kind_id.into(),
            nodes: Vec::new(),
        }
    }

    pub fn kind_id(&self) -> &str {
        &self.kind_id
    }

    pub fn nodes(&self) -> &[DocNode] {
        &self.nodes
    }

    pub fn append_node(&mut self, node: DocNode, configuration: &TsdocConfiguration) {
        configuration
            .doc_node_manager()
            .ensure_allowed_child(&self.kind_id, &node);
        self.nodes.push(node);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocNode {
    Block(DocBlock),
    BlockTag(DocBlockTag),
    CodeSpan(DocCodeSpan),
    Comment(Box<DocComment>),
    Custom(DocCustomNode),
    ErrorText(DocErrorText),
    EscapedText(DocEscapedText),
    FencedCode(DocFencedCode),
    InheritDocTag(DocInheritDocTag),
    InlineTag(DocInlineTag),
    LinkTag(DocLinkTag),
    Paragraph(DocParagraph),
    ParamBlock(DocParamBlock),
    ParamCollection(DocParamCollection),
    PlainText(DocPlainText),
    Section(DocSection),
    SoftBreak(DocSoftBreak),
    XmlAttribute(DocXmlAttribute),
    XmlElement(DocXmlElement),
    XmlEndTag(DocXmlEndTag),
    XmlStartTag(DocXmlStartTag),
}

impl DocNode {
    /// The built-in kind of this node. `None` for custom nodes, whose
    /// kind ids exist only in the node registry.
    pub fn kind(&self) -> Option<DocNodeKind> {
        match self {
            DocNode::Block(_) => Some(DocNodeKind::Block),
            DocNode::BlockTag(_) => Some(DocNodeKind::BlockTag),
            DocNode::CodeSpan(_) => Some(DocNodeKind::CodeSpan),
            DocNode::Comment(_) => Some(DocNodeKind::Comment),
            DocNode::Custom(_) => None,
            DocNode::ErrorText(_) => Some(DocNodeKind::ErrorText),
            DocNode::EscapedText(_) => Some(DocNodeKind::EscapedText),
            DocNode::FencedCode(_) => Some(DocNodeKind::FencedCode),
            DocNode::InheritDocTag(_) => Some(DocNodeKind::InheritDocTag),
            DocNode::InlineTag(_) => Some(DocNodeKind::InlineTag),
            DocNode::LinkTag(_) => Some(DocNodeKind::LinkTag),
            DocNode::Paragraph(_) => Some(DocNodeKind::Paragraph),
            DocNode::ParamBlock(_) => Some(DocNodeKind::ParamBlock),
            DocNode::ParamCollection(_) => Some(DocNodeKind::ParamCollection),
            DocNode::PlainText(_) => Some(DocNodeKind::PlainText),
            DocNode::Section(_) => Some(DocNodeKind::Section),
            DocNode::SoftBreak(_) => Some(DocNodeKind::SoftBreak),
            DocNode::XmlAttribute(_) => Some(DocNodeKind::XmlAttribute),
            DocNode::XmlElement(_) => Some(DocNodeKind::XmlElement),
            DocNode::XmlEndTag(_) => Some(DocNodeKind::XmlEndTag),
            DocNode::XmlStartTag(_) => Some(DocNodeKind::XmlStartTag),
        }
    }

    pub fn kind_id(&self) -> &str {
        match self {
            DocNode::Block(_) => DocNodeKind::Block.kind_id(),
            DocNode::BlockTag(_) => DocNodeKind::BlockTag.kind_id(),
            DocNode::CodeSpan(_) => DocNodeKind::CodeSpan.kind_id(),
            DocNode::Comment(_) => DocNodeKind::Comment.kind_id(),
            DocNode::Custom(node) => node.kind_id(),
            DocNode::ErrorText(_) => DocNodeKind::ErrorText.kind_id(),
            DocNode::EscapedText(_) => DocNodeKind::EscapedText.kind_id(),
            DocNode::FencedCode(_) => DocNodeKind::FencedCode.kind_id(),
            DocNode::InheritDocTag(_) => DocNodeKind::InheritDocTag.kind_id(),
            DocNode::InlineTag(_) => DocNodeKind::InlineTag.kind_id(),
            DocNode::LinkTag(_) => DocNodeKind::LinkTag.kind_id(),
            DocNode::Paragraph(_) => DocNodeKind::Paragraph.kind_id(),
            DocNode::ParamBlock(_) => DocNodeKind::ParamBlock.kind_id(),
            DocNode::ParamCollection(_) => DocNodeKind::ParamCollection.kind_id(),
            DocNode::PlainText(_) => DocNodeKind::PlainText.kind_id(),
            DocNode::Section(_) => DocNodeKind::Section.kind_id(),
            DocNode::SoftBreak(_) => DocNodeKind::SoftBreak.kind_id(),
            DocNode::XmlAttribute(_) => DocNodeKind::XmlAttribute.kind_id(),
            DocNode::XmlElement(_) => DocNodeKind::XmlElement.kind_id(),
            DocNode::XmlEndTag(_) => DocNodeKind::XmlEndTag.kind_id(),
            DocNode::XmlStartTag(_) => DocNodeKind::XmlStartTag.kind_id(),
        }
    }

    pub fn accept(&self, visitor: &mut dyn DocNodeVisitor) {
        match self {
            DocNode::Block(node) => node.accept(visitor),
            DocNode::BlockTag(node) => node.accept(visitor),
            DocNode::CodeSpan(node) => node.accept(visitor),
            DocNode::Comment(node) => node.accept(visitor),
            DocNode::Custom(node) => node.accept(visitor),
            DocNode::ErrorText(node) => node.accept(visitor),
            DocNode::EscapedText(node) => node.accept(visitor),
            DocNode::FencedCode(node) => node.accept(visitor),
            DocNode::InheritDocTag(node) => node.accept(visitor),
            DocNode::InlineTag(node) => node.accept(visitor),
            DocNode::LinkTag(node) => node.accept(visitor),
            DocNode::Paragraph(node) => node.accept(visitor),
            DocNode::ParamBlock(node) => node.accept(visitor),
            DocNode::ParamCollection(node) => node.accept(visitor),
            DocNode::PlainText(node) => node.accept(visitor),
            DocNode::Section(node) => node.accept(visitor),
            DocNode::SoftBreak(node) => node.accept(visitor),
            DocNode::XmlAttribute(node) => node.accept(visitor),
            DocNode::XmlElement(node) => node.accept(visitor),
            DocNode::XmlEndTag(node) => node.accept(visitor),
            DocNode::XmlStartTag(node) => node.accept(visitor),
        }
    }

    /// Invoke `callback` for every excerpt in this subtree, in source
    /// order. Programmatically built nodes have no excerpts and
    /// contribute nothing.
    pub fn for_each_excerpt(&self, callback: &mut dyn FnMut(&TokenSequence)) {
        match self {
            DocNode::Block(node) => walk_block(node, callback),
            DocNode::BlockTag(node) => walk_block_tag(node, callback),
            DocNode::CodeSpan(node) => {
                emit(node.opening_excerpt(), callback);
                emit(node.code_content().excerpt(), callback);
                emit(node.closing_excerpt(), callback);
            }
            DocNode::Comment(node) => node.for_each_excerpt(callback),
            DocNode::Custom(node) => {
                for child in node.nodes() {
                    child.for_each_excerpt(callback);
                }
            }
            DocNode::ErrorText(node) => callback(node.text_excerpt()),
            DocNode::EscapedText(node) => callback(node.encoded_excerpt()),
            DocNode::FencedCode(node) => {
                emit(node.opening_fence_excerpt(), callback);
                emit(node.spacing_after_opening_fence(), callback);
                emit(node.language_content().excerpt(), callback);
                emit(node.spacing_after_language(), callback);
                emit(node.code_content().excerpt(), callback);
                emit(node.spacing_before_closing_fence(), callback);
                emit(node.closing_fence_excerpt(), callback);
                emit(node.spacing_after_closing_fence(), callback);
            }
            DocNode::InheritDocTag(node) => walk_inherit_doc_tag(node, callback),
            DocNode::InlineTag(node) => {
                walk_inline_tag_opening(node.parts(), callback);
                emit(node.tag_content().excerpt(), callback);
                emit(node.parts().closing_excerpt(), callback);
            }
            DocNode::LinkTag(node) => {
                walk_inline_tag_opening(node.parts(), callback);
                if let Some(destination) = node.destination() {
                    emit(destination.excerpt(), callback);
                }
                emit(node.spacing_after_destination(), callback);
                emit(node.pipe_excerpt(), callback);
                emit(node.spacing_after_pipe(), callback);
                if let Some(link_text) = node.link_text() {
                    emit(link_text.excerpt(), callback);
                }
                emit(node.spacing_after_link_text(), callback);
                emit(node.parts().closing_excerpt(), callback);
            }
            DocNode::Paragraph(node) => {
                for child in node.nodes() {
                    child.for_each_excerpt(callback);
                }
            }
            DocNode::ParamBlock(node) => walk_param_block(node, callback),
            DocNode::ParamCollection(node) => {
                for block in node.blocks() {
                    walk_param_block(block, callback);
                }
            }
            DocNode::PlainText(node) => emit(node.content().excerpt(), callback),
            DocNode::Section(node) => walk_section(node, callback),
            DocNode::SoftBreak(node) => emit(node.excerpt(), callback),
            DocNode::XmlAttribute(node) => walk_xml_attribute(node, callback),
            DocNode::XmlElement(node) => {
                walk_xml_start_tag(node.start_tag(), callback);
                for child in node.nodes() {
                    child.for_each_excerpt(callback);
                }
                walk_xml_end_tag(node.end_tag(), callback);
            }
            DocNode::XmlEndTag(node) => walk_xml_end_tag(node, callback),
            DocNode::XmlStartTag(node) => walk_xml_start_tag(node, callback),
        }
    }

    /// The source text this subtree was parsed from, reconstructed by
    /// concatenating its excerpts.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        self.for_each_excerpt(&mut |excerpt| text.push_str(&excerpt.to_string()));
        text
    }
}

fn emit(excerpt: Option<&TokenSequence>, callback: &mut dyn FnMut(&TokenSequence)) {
    if let Some(excerpt) = excerpt {
        callback(excerpt);
    }
}

fn walk_inline_tag_opening(parts: &InlineTagParts, callback: &mut dyn FnMut(&TokenSequence)) {
    emit(parts.opening_excerpt(), callback);
    emit(parts.tag_name_excerpt(), callback);
    emit(parts.spacing_after_tag_name(), callback);
}

pub(crate) fn walk_block_tag(tag: &DocBlockTag, callback: &mut dyn FnMut(&TokenSequence)) {
    emit(tag.excerpt(), callback);
}

pub(crate) fn walk_inherit_doc_tag(
    tag: &DocInheritDocTag,
    callback: &mut dyn FnMut(&TokenSequence),
) {
    walk_inline_tag_opening(tag.parts(), callback);
    emit(tag.reference_excerpt(), callback);
    emit(tag.parts().closing_excerpt(), callback);
}

pub(crate) fn walk_section(section: &DocSection, callback: &mut dyn FnMut(&TokenSequence)) {
    for node in section.nodes() {
        node.for_each_excerpt(callback);
    }
}

pub(crate) fn walk_block(block: &DocBlock, callback: &mut dyn FnMut(&TokenSequence)) {
    walk_block_tag(block.block_tag(), callback);
    walk_section(block.content(), callback);
}

pub(crate) fn walk_param_block(block: &DocParamBlock, callback: &mut dyn FnMut(&TokenSequence)) {
    walk_block_tag(block.block_tag(), callback);
    emit(block.spacing_before_parameter_name_excerpt(), callback);
    emit(block.unsupported_jsdoc_type_excerpt(), callback);
    emit(block.parameter_name_excerpt(), callback);
    emit(block.spacing_after_parameter_name_excerpt(), callback);
    emit(block.hyphen_excerpt(), callback);
    emit(block.spacing_after_hyphen_excerpt(), callback);
    walk_section(block.content(), callback);
}

fn walk_xml_attribute(attribute: &DocXmlAttribute, callback: &mut dyn FnMut(&TokenSequence)) {
    emit(attribute.name_content().excerpt(), callback);
    emit(attribute.spacing_after_name(), callback);
    emit(attribute.equals_excerpt(), callback);
    emit(attribute.spacing_after_equals(), callback);
    emit(attribute.value_content().excerpt(), callback);
    emit(attribute.spacing_after_value(), callback);
}

fn walk_xml_start_tag(tag: &DocXmlStartTag, callback: &mut dyn FnMut(&TokenSequence)) {
    emit(tag.opening_excerpt(), callback);
    emit(tag.name_content().excerpt(), callback);
    emit(tag.spacing_after_name(), callback);
    for attribute in tag.attributes() {
        walk_xml_attribute(attribute, callback);
    }
    emit(tag.closing_excerpt(), callback);
}

fn walk_xml_end_tag(tag: &DocXmlEndTag, callback: &mut dyn FnMut(&TokenSequence)) {
    emit(tag.opening_excerpt(), callback);
    emit(tag.name_content().excerpt(), callback);
    emit(tag.spacing_after_name(), callback);
    emit(tag.closing_excerpt(), callback);
}

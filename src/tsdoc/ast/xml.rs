//! XML element nodes
//!
//! Start tags, end tags, and attributes are parsed in the verbatim stage;
//! the assembler later pairs matching start/end tags into `DocXmlElement`
//! nodes. Tags that never pair stay in the tree as-is.

use crate::tsdoc::ast::node::DocNode;
use crate::tsdoc::ast::text_content::TextContent;
use crate::tsdoc::parsing::token_sequence::TokenSequence;

/// One `name="value"` attribute. The value keeps its quotes exactly as
/// written.
#[derive(Debug, Clone, PartialEq)]
pub struct DocXmlAttribute {
    name: TextContent,
    spacing_after_name: Option<TokenSequence>,
    equals: Option<TokenSequence>,
    spacing_after_equals: Option<TokenSequence>,
    value: TextContent,
    spacing_after_value: Option<TokenSequence>,
}

impl DocXmlAttribute {
    pub fn new(name: impl Into<String>, quoted_value: impl Into<String>) -> Self {
        Self {
            name: TextContent::from_literal(name),
            spacing_after_name: None,
            equals: None,
            spacing_after_equals: None,
            value: TextContent::from_literal(quoted_value),
            spacing_after_value: None,
        }
    }

    pub fn from_excerpts(
        name: TokenSequence,
        spacing_after_name: Option<TokenSequence>,
        equals: TokenSequence,
        spacing_after_equals: Option<TokenSequence>,
        value: TokenSequence,
        spacing_after_value: Option<TokenSequence>,
    ) -> Self {
        Self {
            name: TextContent::from_excerpt(name),
            spacing_after_name,
            equals: Some(equals),
            spacing_after_equals,
            value: TextContent::from_excerpt(value),
            spacing_after_value,
        }
    }

    pub fn name(&self) -> String {
        self.name.text()
    }

    pub fn name_content(&self) -> &TextContent {
        &self.name
    }

    /// The value including its surrounding quotes.
    pub fn value(&self) -> String {
        self.value.text()
    }

    pub fn value_content(&self) -> &TextContent {
        &self.value
    }

    pub fn spacing_after_name(&self) -> Option<&TokenSequence> {
        self.spacing_after_name.as_ref()
    }

    pub fn equals_excerpt(&self) -> Option<&TokenSequence> {
        self.equals.as_ref()
    }

    pub fn spacing_after_equals(&self) -> Option<&TokenSequence> {
        self.spacing_after_equals.as_ref()
    }

    pub fn spacing_after_value(&self) -> Option<&TokenSequence> {
        self.spacing_after_value.as_ref()
    }
}

/// `<name attr="value">` or the self-closing `<name/>` form.
#[derive(Debug, Clone, PartialEq)]
pub struct DocXmlStartTag {
    opening: Option<TokenSequence>,
    name: TextContent,
    spacing_after_name: Option<TokenSequence>,
    attributes: Vec<DocXmlAttribute>,
    self_closing: bool,
    closing: Option<TokenSequence>,
}

impl DocXmlStartTag {
    pub fn new(name: impl Into<String>, self_closing: bool) -> Self {
        Self {
            opening: None,
            name: TextContent::from_literal(name),
            spacing_after_name: None,
            attributes: Vec::new(),
            self_closing,
            closing: None,
        }
    }

    pub fn from_excerpts(
        opening: TokenSequence,
        name: TokenSequence,
        spacing_after_name: Option<TokenSequence>,
        attributes: Vec<DocXmlAttribute>,
        self_closing: bool,
        closing: TokenSequence,
    ) -> Self {
        Self {
            opening: Some(opening),
            name: TextContent::from_excerpt(name),
            spacing_after_name,
            attributes,
            self_closing,
            closing: Some(closing),
        }
    }

    pub fn name(&self) -> String {
        self.name.text()
    }

    pub fn name_content(&self) -> &TextContent {
        &self.name
    }

    pub fn attributes(&self) -> &[DocXmlAttribute] {
        &self.attributes
    }

    pub fn add_attribute(&mut self, attribute: DocXmlAttribute) {
        self.attributes.push(attribute);
    }

    pub fn self_closing(&self) -> bool {
        self.self_closing
    }

    pub fn opening_excerpt(&self) -> Option<&TokenSequence> {
        self.opening.as_ref()
    }

    pub fn spacing_after_name(&self) -> Option<&TokenSequence> {
        self.spacing_after_name.as_ref()
    }

    pub fn closing_excerpt(&self) -> Option<&TokenSequence> {
        self.closing.as_ref()
    }
}

/// `</name>`.
#[derive(Debug, Clone, PartialEq)]
pub struct DocXmlEndTag {
    opening: Option<TokenSequence>,
    name: TextContent,
    spacing_after_name: Option<TokenSequence>,
    closing: Option<TokenSequence>,
}

impl DocXmlEndTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            opening: None,
            name: TextContent::from_literal(name),
            spacing_after_name: None,
            closing: None,
        }
    }

    pub fn from_excerpts(
        opening: TokenSequence,
        name: TokenSequence,
        spacing_after_name: Option<TokenSequence>,
        closing: TokenSequence,
    ) -> Self {
        Self {
            opening: Some(opening),
            name: TextContent::from_excerpt(name),
            spacing_after_name,
            closing: Some(closing),
        }
    }

    pub fn name(&self) -> String {
        self.name.text()
    }

    pub fn name_content(&self) -> &TextContent {
        &self.name
    }

    pub fn opening_excerpt(&self) -> Option<&TokenSequence> {
        self.opening.as_ref()
    }

    pub fn spacing_after_name(&self) -> Option<&TokenSequence> {
        self.spacing_after_name.as_ref()
    }

    pub fn closing_excerpt(&self) -> Option<&TokenSequence> {
        self.closing.as_ref()
    }
}

/// A paired start tag, its content, and the matching end tag. Built by
/// the assembler when tags pair up; never produced directly by the
/// verbatim stage.
#[derive(Debug, Clone, PartialEq)]
pub struct DocXmlElement {
    start_tag: DocXmlStartTag,
    nodes: Vec<DocNode>,
    end_tag: DocXmlEndTag,
}

impl DocXmlElement {
    pub fn new(start_tag: DocXmlStartTag, nodes: Vec<DocNode>, end_tag: DocXmlEndTag) -> Self {
        Self {
            start_tag,
            nodes,
            end_tag,
        }
    }

    pub fn start_tag(&self) -> &DocXmlStartTag {
        &self.start_tag
    }

    pub fn name(&self) -> String {
        self.start_tag.name()
    }

    pub fn nodes(&self) -> &[DocNode] {
        &self.nodes
    }

    pub fn end_tag(&self) -> &DocXmlEndTag {
        &self.end_tag
    }
}

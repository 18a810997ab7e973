//! Canonical comment rendering
//!
//! The emitter writes a comment from its model fields, not its source
//! excerpts, so programmatically built comments render the same way as
//! parsed ones. The output is normalized: one blank comment line between
//! paragraphs and blocks, never two in a row, trailing whitespace removed,
//! modifier tags gathered on one final line. Emission is deterministic,
//! and emitting a reparsed emission reproduces it exactly.

use crate::tsdoc::ast::blocks::{DocBlock, DocParamBlock};
use crate::tsdoc::ast::comment::DocComment;
use crate::tsdoc::ast::inline_tags::{DocInheritDocTag, DocLinkTag, LinkDestination};
use crate::tsdoc::ast::modifier_tag_set::StandardModifierTagSet;
use crate::tsdoc::ast::node::DocNode;
use crate::tsdoc::ast::sections::{DocParagraph, DocSection};
use crate::tsdoc::ast::xml::DocXmlStartTag;
use crate::tsdoc::declaration_reference::DeclarationReference;

/// Renders a [`DocComment`] back to `/** ... */` text.
#[derive(Debug, Default)]
pub struct TsdocEmitter {
    lines: Vec<String>,
    current: String,
}

impl TsdocEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the whole comment in canonical form.
    ///
    /// An `@inheritDoc` tag renders first, then the summary paragraphs,
    /// then the blocks in classification order, then the modifier tags on
    /// one line. A comment with no content renders as `/** */`.
    pub fn render_comment(mut self, comment: &DocComment) -> String {
        if let Some(tag) = &comment.inherit_doc_tag {
            self.ensure_blank_line();
            self.write(&render_inherit_doc_tag(tag));
        }
        self.render_section(&comment.summary_section);
        for block in [
            &comment.remarks_block,
            &comment.private_remarks,
            &comment.deprecated_block,
        ]
        .into_iter()
        .flatten()
        {
            self.render_block(block);
        }
        for block in comment.params.blocks() {
            self.render_param_block(block);
        }
        for block in comment.type_params.blocks() {
            self.render_param_block(block);
        }
        if let Some(block) = &comment.returns_block {
            self.render_block(block);
        }
        for block in &comment.see_blocks {
            self.render_block(block);
        }
        for block in &comment.custom_blocks {
            self.render_block(block);
        }
        self.render_modifier_tags(&comment.modifier_tag_set);
        self.finish()
    }

    /// Render a declaration reference in canonical form.
    pub fn render_declaration_reference(
        &self,
        declaration_reference: &DeclarationReference,
    ) -> String {
        declaration_reference.to_string()
    }

    fn render_section(&mut self, section: &DocSection) {
        for node in section.nodes() {
            match node {
                DocNode::Paragraph(paragraph) => self.render_paragraph(paragraph),
                node => self.write(&render_node(node)),
            }
        }
    }

    fn render_paragraph(&mut self, paragraph: &DocParagraph) {
        let text = render_nodes(paragraph.nodes());
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        self.ensure_blank_line();
        self.write(trimmed);
    }

    fn render_block(&mut self, block: &DocBlock) {
        self.ensure_blank_line();
        self.write(block.block_tag().tag_name());
        // Loose (programmatic) content follows on the same line; parsed
        // content is paragraphs, which separate themselves.
        if matches!(block.content().nodes().first(), Some(node) if !matches!(node, DocNode::Paragraph(_)))
        {
            self.write(" ");
        }
        self.render_section(block.content());
    }

    /// `@param name - description`, with the first description paragraph
    /// on the tag's own line.
    fn render_param_block(&mut self, block: &DocParamBlock) {
        self.ensure_blank_line();
        self.write(block.block_tag().tag_name());
        self.write(" ");
        if !block.parameter_name().is_empty() {
            self.write(block.parameter_name());
            self.write(" - ");
        }
        let mut inline = true;
        for node in block.content().nodes() {
            match node {
                DocNode::Paragraph(paragraph) if inline => {
                    inline = false;
                    self.write(render_nodes(paragraph.nodes()).trim());
                }
                DocNode::Paragraph(paragraph) => self.render_paragraph(paragraph),
                node => self.write(&render_node(node)),
            }
        }
    }

    fn render_modifier_tags(&mut self, tag_set: &StandardModifierTagSet) {
        if tag_set.nodes().is_empty() {
            return;
        }
        self.ensure_blank_line();
        let names: Vec<&str> = tag_set.nodes().iter().map(|tag| tag.tag_name()).collect();
        self.write(&names.join(" "));
    }

    /// Append text to the output, starting a new line at each `\n`.
    fn write(&mut self, text: &str) {
        for (index, piece) in text.split('\n').enumerate() {
            if index > 0 {
                self.finish_line();
            }
            self.current.push_str(piece);
        }
    }

    fn finish_line(&mut self) {
        self.lines.push(std::mem::take(&mut self.current));
    }

    fn ensure_fresh_line(&mut self) {
        if !self.current.is_empty() {
            self.finish_line();
        }
    }

    /// Separate the next chunk from the previous one by exactly one blank
    /// line. Does nothing at the very start of the comment.
    fn ensure_blank_line(&mut self) {
        if self.lines.is_empty() && self.current.is_empty() {
            return;
        }
        self.ensure_fresh_line();
        if self
            .lines
            .last()
            .map(|line| !line.trim().is_empty())
            .unwrap_or(false)
        {
            self.lines.push(String::new());
        }
    }

    fn finish(mut self) -> String {
        self.ensure_fresh_line();
        while self
            .lines
            .last()
            .map(|line| line.trim().is_empty())
            .unwrap_or(false)
        {
            self.lines.pop();
        }
        if self.lines.is_empty() {
            return "/** */".to_string();
        }
        let mut output = String::from("/**\n");
        for line in &self.lines {
            let line = line.trim_end();
            if line.is_empty() {
                output.push_str(" *\n");
            } else {
                output.push_str(" * ");
                output.push_str(line);
                output.push('\n');
            }
        }
        output.push_str(" */");
        output
    }
}

fn render_nodes(nodes: &[DocNode]) -> String {
    nodes.iter().map(render_node).collect()
}

/// One node's canonical text. Line breaks in the result are real line
/// breaks in the emitted comment.
fn render_node(node: &DocNode) -> String {
    match node {
        DocNode::PlainText(text) => text.text(),
        DocNode::SoftBreak(_) => "\n".to_string(),
        DocNode::EscapedText(text) => format!("\\{}", text.decoded_text()),
        DocNode::ErrorText(text) => text.text(),
        DocNode::InlineTag(tag) => {
            let content = tag.tag_content().text();
            if content.is_empty() {
                format!("{{{}}}", tag.tag_name())
            } else {
                format!("{{{} {}}}", tag.tag_name(), content)
            }
        }
        DocNode::LinkTag(tag) => render_link_tag(tag),
        DocNode::InheritDocTag(tag) => render_inherit_doc_tag(tag),
        DocNode::CodeSpan(span) => format!("`{}`", span.code()),
        DocNode::FencedCode(code) => {
            let mut body = code.code();
            if !body.is_empty() && !body.ends_with('\n') {
                body.push('\n');
            }
            format!("```{}\n{}```", code.language(), body)
        }
        DocNode::XmlStartTag(tag) => render_xml_start_tag(tag),
        DocNode::XmlEndTag(tag) => format!("</{}>", tag.name()),
        DocNode::XmlElement(element) => format!(
            "{}{}</{}>",
            render_xml_start_tag(element.start_tag()),
            render_nodes(element.nodes()),
            element.end_tag().name(),
        ),
        DocNode::XmlAttribute(attribute) => {
            format!("{}={}", attribute.name(), attribute.value())
        }
        DocNode::Paragraph(paragraph) => render_nodes(paragraph.nodes()),
        DocNode::Section(section) => render_nodes(section.nodes()),
        DocNode::BlockTag(tag) => tag.tag_name().to_string(),
        DocNode::Custom(custom) => render_nodes(custom.nodes()),
        // Containers below never appear as section content; rendering
        // their children keeps the function total anyway.
        DocNode::Block(block) => {
            format!(
                "{}{}",
                block.block_tag().tag_name(),
                render_nodes(block.content().nodes())
            )
        }
        DocNode::ParamBlock(block) => {
            format!(
                "{} {} - {}",
                block.block_tag().tag_name(),
                block.parameter_name(),
                render_nodes(block.content().nodes())
            )
        }
        DocNode::ParamCollection(collection) => collection
            .blocks()
            .iter()
            .map(|block| render_node(&DocNode::ParamBlock(block.clone())))
            .collect(),
        DocNode::Comment(comment) => TsdocEmitter::new().render_comment(comment),
    }
}

fn render_link_tag(tag: &DocLinkTag) -> String {
    let mut output = String::from("{");
    output.push_str(tag.parts().tag_name());
    let destination = match tag.destination() {
        Some(LinkDestination::Url { url, .. }) => Some(url.clone()),
        Some(LinkDestination::Reference { reference, .. }) => Some(reference.to_string()),
        None => None,
    };
    if let Some(destination) = destination {
        output.push(' ');
        output.push_str(&destination);
    }
    if let Some(link_text) = tag.link_text() {
        output.push_str(" | ");
        output.push_str(link_text.text().trim());
    }
    output.push('}');
    output
}

fn render_inherit_doc_tag(tag: &DocInheritDocTag) -> String {
    match tag.declaration_reference() {
        Some(reference) => format!("{{{} {}}}", tag.parts().tag_name(), reference),
        None => format!("{{{}}}", tag.parts().tag_name()),
    }
}

fn render_xml_start_tag(tag: &DocXmlStartTag) -> String {
    let mut output = String::from("<");
    output.push_str(&tag.name());
    for attribute in tag.attributes() {
        output.push(' ');
        output.push_str(&attribute.name());
        output.push('=');
        output.push_str(&attribute.value());
    }
    if tag.self_closing() {
        output.push_str("/>");
    } else {
        output.push('>');
    }
    output
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::tsdoc::ast::block_tag::DocBlockTag;
    use crate::tsdoc::ast::text_nodes::{DocPlainText, DocSoftBreak};
    use crate::tsdoc::config::configuration::TsdocConfiguration;
    use crate::tsdoc::parsing::parser::TsdocParser;

    fn emit(source: &str) -> String {
        let context = TsdocParser::new().parse_string(source);
        context.doc_comment.emit_as_tsdoc()
    }

    #[test]
    fn test_empty_comment() {
        assert_eq!(emit("/** */"), "/** */");
        assert_eq!(emit("/***/"), "/** */");
    }

    #[test]
    fn test_summary_renders_framed() {
        assert_eq!(emit("/** Hello world. */"), "/**\n * Hello world.\n */");
    }

    #[test]
    fn test_paragraphs_are_separated_by_one_blank_line() {
        let source = "/**\n * First.\n *\n *\n *\n * Second.\n */";
        assert_eq!(emit(source), "/**\n * First.\n *\n * Second.\n */");
    }

    #[test]
    fn test_blocks_render_after_the_summary() {
        let source = "/**\n * Summary.\n * @remarks\n * Detail.\n */";
        assert_eq!(
            emit(source),
            "/**\n * Summary.\n *\n * @remarks\n *\n * Detail.\n */"
        );
    }

    #[test]
    fn test_param_block_renders_inline() {
        let source = "/**\n * @param x - the x coordinate\n */";
        assert_eq!(emit(source), "/**\n * @param x - the x coordinate\n */");
    }

    #[test]
    fn test_modifier_tags_render_on_one_line() {
        let source = "/**\n * Summary.\n * @alpha\n * @beta\n */";
        assert_eq!(
            emit(source),
            "/**\n * Summary.\n *\n * @alpha @beta\n */"
        );
    }

    #[test]
    fn test_inherit_doc_renders_first() {
        let source = "/** {@inheritDoc Base.method} */";
        assert_eq!(emit(source), "/**\n * {@inheritDoc Base.method}\n */");
    }

    #[test]
    fn test_inline_constructs_render_canonically() {
        let source = "/** See {@link https://example.com | the site} and `code`. */";
        assert_eq!(
            emit(source),
            "/**\n * See {@link https://example.com | the site} and `code`.\n */"
        );
    }

    #[test]
    fn test_emission_is_idempotent() {
        let sources = [
            "/** */",
            "/** Hello. */",
            "/**\n * One.\n *\n * Two.\n */",
            "/**\n * Summary text.\n * @remarks\n * Detail text.\n * @param a - first\n * @param b - second\n * @returns a sum\n * @alpha @beta\n */",
            "/**\n * <b>bold</b> and <br/> breaks.\n */",
            "/**\n * ```ts\n * let x = 1;\n * ```\n */",
            "/** {@inheritDoc Base.method} */",
        ];
        let parser = TsdocParser::new();
        for source in sources {
            let first = parser.parse_string(source).doc_comment.emit_as_tsdoc();
            let second = parser.parse_string(&first).doc_comment.emit_as_tsdoc();
            assert_eq!(second, first, "source: {source:?}");
        }
    }

    #[test]
    fn test_programmatic_comment_renders_like_a_parsed_one() {
        let configuration = Arc::new(TsdocConfiguration::new());
        let mut comment = DocComment::new();
        comment.summary_section.append_nodes(
            vec![
                DocNode::PlainText(DocPlainText::new("Built by hand.")),
                DocNode::SoftBreak(DocSoftBreak::new()),
            ],
            &configuration,
        );
        let mut block = DocBlock::new(DocBlockTag::new("@remarks"));
        block.content_mut().append_node(
            DocNode::PlainText(DocPlainText::new("Extra detail.")),
            &configuration,
        );
        comment.remarks_block = Some(block);
        assert_eq!(
            comment.emit_as_tsdoc(),
            "/**\n * Built by hand.\n *\n * @remarks Extra detail.\n */"
        );
    }
}

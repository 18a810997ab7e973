//! Tag classification
//!
//! The second parsing stage. In the verbatim node list, block tags and
//! `@inheritDoc` tags sit flat between ordinary content nodes. This pass
//! looks every tag up in the configuration, moves modifier tags into the
//! comment's modifier set, turns block tags into classified blocks that own
//! the content following them, reads the `@param` name/hyphen micro-syntax,
//! pairs XML start and end tags into elements, and reports the tag-level
//! diagnostics. Content that fails classification stays in the tree as a
//! custom block or a flat node, so the comment still round-trips.

use std::collections::HashSet;

use crate::tsdoc::ast::blocks::{DocBlock, DocParamBlock, ParamBlockParts};
use crate::tsdoc::ast::block_tag::DocBlockTag;
use crate::tsdoc::ast::comment::DocComment;
use crate::tsdoc::ast::inline_tags::{DocInheritDocTag, InlineTagParts};
use crate::tsdoc::ast::node::DocNode;
use crate::tsdoc::ast::text_nodes::DocPlainText;
use crate::tsdoc::ast::xml::{DocXmlElement, DocXmlStartTag};
use crate::tsdoc::config::configuration::TsdocConfiguration;
use crate::tsdoc::config::standard_tags;
use crate::tsdoc::config::tag_definition::TsdocTagSyntaxKind;
use crate::tsdoc::messages::message_id::TsdocMessageId;
use crate::tsdoc::messages::message_log::ParserMessageLog;
use crate::tsdoc::parsing::token_reader::{Marker, TokenReader};
use crate::tsdoc::parsing::token_sequence::TokenSequence;
use crate::tsdoc::text::TextRange;
use crate::tsdoc::token::TokenKind;

/// Classify a verbatim node list into a populated comment.
///
/// The input must be the node parser's output. Every token excerpt in the
/// input survives into some field of the returned comment, so concatenating
/// the comment's excerpts still reproduces the source lines exactly.
pub fn assemble_comment(
    verbatim_nodes: &[DocNode],
    configuration: &TsdocConfiguration,
    log: &mut ParserMessageLog,
) -> DocComment {
    let assembler = Assembler {
        configuration,
        comment: DocComment::new(),
        summary_nodes: Vec::new(),
        open_block: None,
        seen_tags: HashSet::new(),
    };
    assembler.run(verbatim_nodes, log)
}

struct Assembler<'a> {
    configuration: &'a TsdocConfiguration,
    comment: DocComment,
    /// Content seen before the first block tag.
    summary_nodes: Vec<DocNode>,
    /// The block currently receiving content, if any.
    open_block: Option<OpenBlock>,
    /// Upper-cased names of tags already seen, for the allow-multiple check.
    seen_tags: HashSet<String>,
}

struct OpenBlock {
    kind: OpenBlockKind,
    tag: DocBlockTag,
    nodes: Vec<DocNode>,
}

enum OpenBlockKind {
    Param {
        type_param: bool,
        syntax: Option<ParamSyntax>,
    },
    Plain(BlockPlacement),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum BlockPlacement {
    Remarks,
    PrivateRemarks,
    Deprecated,
    Returns,
    See,
    Custom,
}

/// Result of reading the `@param name - ` micro-syntax after the tag name.
struct ParamSyntax {
    parts: ParamBlockParts,
    /// Token index where the block's description content starts.
    content_start: Marker,
}

impl<'a> Assembler<'a> {
    fn run(mut self, verbatim_nodes: &[DocNode], log: &mut ParserMessageLog) -> DocComment {
        for node in verbatim_nodes.iter().cloned() {
            match node {
                DocNode::BlockTag(tag) => self.classify_block_tag(tag, log),
                DocNode::InheritDocTag(tag) => self.take_inherit_doc_tag(tag, log),
                node => {
                    self.check_content_node(&node, log);
                    self.append_content(node);
                }
            }
        }
        self.close_open_block(log);

        let summary = fold_xml_elements(std::mem::take(&mut self.summary_nodes), log);
        self.comment
            .summary_section
            .append_nodes(summary, self.configuration);
        self.check_inherit_doc_compatibility(log);
        self.comment
    }

    fn append_content(&mut self, node: DocNode) {
        match &mut self.open_block {
            Some(open) => open.nodes.push(node),
            None => self.summary_nodes.push(node),
        }
    }

    /// Route a block tag by its definition. Undefined, unsupported, and
    /// duplicated tags all become custom blocks so their content is kept.
    fn classify_block_tag(&mut self, tag: DocBlockTag, log: &mut ParserMessageLog) {
        let configuration = self.configuration;
        let Some(definition) =
            configuration.try_get_tag_definition_with_upper_case(tag.tag_name_with_upper_case())
        else {
            if !configuration.validation.ignore_undefined_tags {
                log_at(
                    log,
                    TsdocMessageId::UndefinedTag,
                    format!(
                        "The TSDoc tag {:?} is not defined in this configuration",
                        tag.tag_name()
                    ),
                    tag.excerpt(),
                );
            }
            self.open_plain_block(BlockPlacement::Custom, tag, log);
            return;
        };

        let canonical = definition.tag_name_with_upper_case().to_string();
        let duplicate = !definition.allow_multiple() && self.seen_tags.contains(&canonical);
        self.seen_tags.insert(canonical);

        if configuration.validation.report_unsupported_tags
            && !configuration.is_tag_supported(definition)
        {
            log_at(
                log,
                TsdocMessageId::UnsupportedTag,
                format!(
                    "The TSDoc tag {:?} is not supported by this tool",
                    tag.tag_name()
                ),
                tag.excerpt(),
            );
            self.open_plain_block(BlockPlacement::Custom, tag, log);
            return;
        }

        if duplicate {
            log_at(
                log,
                TsdocMessageId::DuplicateBlockTag,
                format!(
                    "The TSDoc tag {:?} must not be used more than once in a comment",
                    tag.tag_name()
                ),
                tag.excerpt(),
            );
            self.open_plain_block(BlockPlacement::Custom, tag, log);
            return;
        }

        match definition.syntax_kind() {
            TsdocTagSyntaxKind::InlineTag => {
                log_at(
                    log,
                    TsdocMessageId::InlineTagMissingBraces,
                    format!(
                        "The TSDoc tag {:?} is an inline tag; it must be enclosed in \"{{ }}\" braces",
                        tag.tag_name()
                    ),
                    tag.excerpt(),
                );
                self.open_plain_block(BlockPlacement::Custom, tag, log);
            }
            TsdocTagSyntaxKind::ModifierTag => {
                // Modifier tags do not close the block in progress; the
                // surrounding content keeps flowing into the same section.
                self.comment.modifier_tag_set.add_tag(tag);
            }
            TsdocTagSyntaxKind::BlockTag => {
                let upper = definition.tag_name_with_upper_case();
                if upper == standard_tags::param().tag_name_with_upper_case() {
                    self.open_param_block(tag, false, log);
                } else if upper == standard_tags::type_param().tag_name_with_upper_case() {
                    self.open_param_block(tag, true, log);
                } else if upper == standard_tags::remarks().tag_name_with_upper_case() {
                    self.open_plain_block(BlockPlacement::Remarks, tag, log);
                } else if upper == standard_tags::private_remarks().tag_name_with_upper_case() {
                    self.open_plain_block(BlockPlacement::PrivateRemarks, tag, log);
                } else if upper == standard_tags::deprecated().tag_name_with_upper_case() {
                    self.open_plain_block(BlockPlacement::Deprecated, tag, log);
                } else if upper == standard_tags::returns().tag_name_with_upper_case() {
                    self.open_plain_block(BlockPlacement::Returns, tag, log);
                } else if upper == standard_tags::see().tag_name_with_upper_case() {
                    self.open_plain_block(BlockPlacement::See, tag, log);
                } else {
                    self.open_plain_block(BlockPlacement::Custom, tag, log);
                }
            }
        }
    }

    fn open_plain_block(
        &mut self,
        placement: BlockPlacement,
        tag: DocBlockTag,
        log: &mut ParserMessageLog,
    ) {
        self.close_open_block(log);
        self.open_block = Some(OpenBlock {
            kind: OpenBlockKind::Plain(placement),
            tag,
            nodes: Vec::new(),
        });
    }

    fn open_param_block(&mut self, tag: DocBlockTag, type_param: bool, log: &mut ParserMessageLog) {
        self.close_open_block(log);
        let syntax = try_read_param_syntax(&tag, log);
        self.open_block = Some(OpenBlock {
            kind: OpenBlockKind::Param { type_param, syntax },
            tag,
            nodes: Vec::new(),
        });
    }

    fn close_open_block(&mut self, log: &mut ParserMessageLog) {
        let Some(open) = self.open_block.take() else {
            return;
        };
        match open.kind {
            OpenBlockKind::Param { type_param, syntax } => {
                let block =
                    finish_param_block(open.tag, syntax, open.nodes, self.configuration, log);
                if type_param {
                    self.comment.type_params.add(block);
                } else {
                    self.comment.params.add(block);
                }
            }
            OpenBlockKind::Plain(placement) => {
                let folded = fold_xml_elements(open.nodes, log);
                if placement == BlockPlacement::Deprecated && !section_has_visible_content(&folded)
                {
                    log_at(
                        log,
                        TsdocMessageId::MissingDeprecationMessage,
                        "The @deprecated tag requires a deprecation message, e.g. \
                         \"@deprecated Use otherMethod() instead\"",
                        open.tag.excerpt(),
                    );
                }
                let mut block = DocBlock::new(open.tag);
                block.content_mut().append_nodes(folded, self.configuration);
                match placement {
                    BlockPlacement::Remarks => self.comment.remarks_block = Some(block),
                    BlockPlacement::PrivateRemarks => self.comment.private_remarks = Some(block),
                    BlockPlacement::Deprecated => self.comment.deprecated_block = Some(block),
                    BlockPlacement::Returns => self.comment.returns_block = Some(block),
                    BlockPlacement::See => self.comment.see_blocks.push(block),
                    BlockPlacement::Custom => self.comment.custom_blocks.push(block),
                }
            }
        }
    }

    /// The first `@inheritDoc` is recorded on the comment itself; any
    /// further one is reported and left in the content flow.
    fn take_inherit_doc_tag(&mut self, tag: DocInheritDocTag, log: &mut ParserMessageLog) {
        self.check_inline_tag_use(tag.parts(), log);
        if self.comment.inherit_doc_tag.is_none() {
            self.comment.inherit_doc_tag = Some(tag);
        } else {
            log_at(
                log,
                TsdocMessageId::ExtraInheritDocTag,
                "A doc comment cannot have more than one @inheritDoc tag",
                tag.parts().tag_name_excerpt(),
            );
            self.append_content(DocNode::InheritDocTag(tag));
        }
    }

    fn check_content_node(&self, node: &DocNode, log: &mut ParserMessageLog) {
        match node {
            DocNode::InlineTag(tag) => self.check_inline_tag_use(tag.parts(), log),
            DocNode::LinkTag(tag) => self.check_inline_tag_use(tag.parts(), log),
            DocNode::XmlStartTag(tag) => {
                self.check_xml_element_support(&tag.name(), tag.name_content().excerpt(), log);
            }
            DocNode::XmlEndTag(tag) => {
                self.check_xml_element_support(&tag.name(), tag.name_content().excerpt(), log);
            }
            _ => {}
        }
    }

    fn check_inline_tag_use(&self, parts: &InlineTagParts, log: &mut ParserMessageLog) {
        let configuration = self.configuration;
        let anchor = parts.tag_name_excerpt();
        match configuration.try_get_tag_definition_with_upper_case(parts.tag_name_with_upper_case())
        {
            None => {
                if !configuration.validation.ignore_undefined_tags {
                    log_at(
                        log,
                        TsdocMessageId::UndefinedTag,
                        format!(
                            "The TSDoc tag {:?} is not defined in this configuration",
                            parts.tag_name()
                        ),
                        anchor,
                    );
                }
            }
            Some(definition) => {
                if definition.syntax_kind() != TsdocTagSyntaxKind::InlineTag {
                    log_at(
                        log,
                        TsdocMessageId::TagShouldNotHaveBraces,
                        format!(
                            "The TSDoc tag {:?} is not an inline tag; it must not be enclosed \
                             in \"{{ }}\" braces",
                            parts.tag_name()
                        ),
                        anchor,
                    );
                }
                if configuration.validation.report_unsupported_tags
                    && !configuration.is_tag_supported(definition)
                {
                    log_at(
                        log,
                        TsdocMessageId::UnsupportedTag,
                        format!(
                            "The TSDoc tag {:?} is not supported by this tool",
                            parts.tag_name()
                        ),
                        anchor,
                    );
                }
            }
        }
    }

    fn check_xml_element_support(
        &self,
        name: &str,
        anchor: Option<&TokenSequence>,
        log: &mut ParserMessageLog,
    ) {
        let configuration = self.configuration;
        if configuration.validation.report_unsupported_xml_elements
            && !configuration.is_xml_element_supported(name)
        {
            log_at(
                log,
                TsdocMessageId::UnsupportedXmlElement,
                format!("The XML element {name:?} is not supported by this tool"),
                anchor,
            );
        }
    }

    fn check_inherit_doc_compatibility(&self, log: &mut ParserMessageLog) {
        let Some(tag) = &self.comment.inherit_doc_tag else {
            return;
        };
        if section_has_visible_content(self.comment.summary_section.nodes()) {
            log_at(
                log,
                TsdocMessageId::InheritDocIncompatibleSummary,
                "The summary section must not have any content, because it will be provided \
                 by the @inheritDoc target",
                tag.parts().tag_name_excerpt(),
            );
        }
        if let Some(remarks) = &self.comment.remarks_block {
            log_at(
                log,
                TsdocMessageId::InheritDocIncompatibleTag,
                format!(
                    "A {:?} block must not be used, because that content is provided by the \
                     @inheritDoc target",
                    remarks.block_tag().tag_name()
                ),
                remarks.block_tag().excerpt(),
            );
        }
    }
}

fn log_at(
    log: &mut ParserMessageLog,
    message_id: TsdocMessageId,
    text: impl Into<String>,
    excerpt: Option<&TokenSequence>,
) {
    match excerpt {
        Some(excerpt) => log.add_message_for_token_sequence(message_id, text, excerpt),
        None => log.add_message_for_text_range(message_id, text, &TextRange::empty()),
    }
}

/// True if the nodes carry anything other than line breaks and whitespace.
fn section_has_visible_content(nodes: &[DocNode]) -> bool {
    nodes.iter().any(|node| match node {
        DocNode::SoftBreak(_) => false,
        DocNode::PlainText(text) => !text.text().trim().is_empty(),
        _ => true,
    })
}

/// Read `@param`'s `{type} name - ` micro-syntax from the token stream
/// right after the tag name. On failure the block falls back to keeping
/// all of its raw content, so nothing is lost.
fn try_read_param_syntax(tag: &DocBlockTag, log: &mut ParserMessageLog) -> Option<ParamSyntax> {
    let tag_excerpt = tag.excerpt()?;
    let stream = tag_excerpt.full_stream();
    let window = TokenSequence::new(stream.clone(), tag_excerpt.end_index(), stream.len());
    let mut reader = TokenReader::for_sequence(&window);

    let spacing_before_parameter_name = read_spacing_and_newlines(&mut reader);

    let mut unsupported_jsdoc_type = None;
    if reader.peek_token_kind() == TokenKind::LeftCurlyBracket {
        let invalid_type_text = format!(
            "The {} block should not include a JSDoc-style \"{{type}}\"",
            tag.tag_name()
        );
        match read_jsdoc_type(&mut reader) {
            Some(excerpt) => {
                log.add_message_for_token_sequence(
                    TsdocMessageId::ParamTagWithInvalidType,
                    invalid_type_text,
                    &excerpt,
                );
                unsupported_jsdoc_type = Some(excerpt);
            }
            None => {
                log.add_message_for_token_sequence(
                    TsdocMessageId::ParamTagWithInvalidType,
                    invalid_type_text,
                    &reader.sequence_for_current_token(),
                );
                return None;
            }
        }
    }

    if reader.peek_token_kind() == TokenKind::LeftSquareBracket {
        log.add_message_for_token_sequence(
            TsdocMessageId::ParamTagWithInvalidOptionalName,
            format!(
                "The {} block should not include a JSDoc-style optional name; it must not \
                 be enclosed in \"[ ]\" brackets",
                tag.tag_name()
            ),
            &reader.sequence_for_current_token(),
        );
        return None;
    }

    while matches!(
        reader.peek_token_kind(),
        TokenKind::AsciiWord | TokenKind::Period | TokenKind::DollarSign
    ) {
        reader.read_token();
    }
    let Some(name_excerpt) = reader.try_extract_accumulated_sequence() else {
        log.add_message_for_token_sequence(
            TsdocMessageId::ParamTagWithInvalidName,
            format!(
                "The {} block should be followed by a parameter name",
                tag.tag_name()
            ),
            &reader.sequence_for_current_token(),
        );
        return None;
    };
    let parameter_name = name_excerpt.to_string();

    let spacing_after_parameter_name = read_spacing_and_newlines(&mut reader);

    if reader.peek_token_kind() != TokenKind::Hyphen {
        log.add_message_for_token_sequence(
            TsdocMessageId::ParamTagMissingHyphen,
            format!(
                "The {} block should be followed by a parameter name and then a hyphen",
                tag.tag_name()
            ),
            &reader.sequence_for_current_token(),
        );
        return None;
    }
    reader.read_token();
    let hyphen = reader.extract_accumulated_sequence();

    let spacing_after_hyphen = read_spacing_and_newlines(&mut reader);

    Some(ParamSyntax {
        parts: ParamBlockParts {
            spacing_before_parameter_name,
            unsupported_jsdoc_type,
            parameter_name,
            parameter_name_excerpt: Some(name_excerpt),
            spacing_after_parameter_name,
            hyphen: Some(hyphen),
            spacing_after_hyphen,
        },
        content_start: reader.create_marker(),
    })
}

fn read_spacing_and_newlines(reader: &mut TokenReader) -> Option<TokenSequence> {
    while matches!(
        reader.peek_token_kind(),
        TokenKind::Spacing | TokenKind::Newline
    ) {
        reader.read_token();
    }
    reader.try_extract_accumulated_sequence()
}

/// Read a balanced `{...}` group, honoring quoted strings so braces inside
/// them do not count. Trailing spacing is folded into the same excerpt.
/// Returns `None` if the group never closes on this line.
fn read_jsdoc_type(reader: &mut TokenReader) -> Option<TokenSequence> {
    reader.read_token();
    let mut depth = 1usize;
    let mut quote: Option<TokenKind> = None;
    while depth > 0 {
        let kind = reader.peek_token_kind();
        if matches!(kind, TokenKind::Newline | TokenKind::EndOfInput) {
            return None;
        }
        reader.read_token();
        match kind {
            TokenKind::SingleQuote | TokenKind::DoubleQuote => match quote {
                Some(open) if open == kind => quote = None,
                None => quote = Some(kind),
                Some(_) => {}
            },
            TokenKind::LeftCurlyBracket if quote.is_none() => depth += 1,
            TokenKind::RightCurlyBracket if quote.is_none() => depth -= 1,
            _ => {}
        }
    }
    while matches!(
        reader.peek_token_kind(),
        TokenKind::Spacing | TokenKind::Newline
    ) {
        reader.read_token();
    }
    Some(reader.extract_accumulated_sequence())
}

fn finish_param_block(
    tag: DocBlockTag,
    syntax: Option<ParamSyntax>,
    nodes: Vec<DocNode>,
    configuration: &TsdocConfiguration,
    log: &mut ParserMessageLog,
) -> DocParamBlock {
    let Some(syntax) = syntax else {
        return param_block_with_all_nodes(tag, nodes, configuration, log);
    };

    // The buffered verbatim nodes re-cover the tokens the micro-syntax
    // consumed. Drop the nodes that fall entirely before the content
    // boundary and clip the one plain-text node that straddles it. Any
    // other straddling node means the boundary landed inside structured
    // content; keep everything raw in that case.
    let boundary = syntax.content_start;
    if !nodes_split_cleanly(&nodes, boundary) {
        return param_block_with_all_nodes(tag, nodes, configuration, log);
    }

    let mut content = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node_token_bounds(&node) {
            Some((_, end)) if end <= boundary => {}
            Some((start, end)) if start < boundary => {
                if let DocNode::PlainText(text) = node {
                    if let Some(excerpt) = text.content().excerpt() {
                        let remainder = excerpt.get_new_sequence(boundary, end);
                        content.push(DocNode::PlainText(DocPlainText::from_excerpt(remainder)));
                    }
                }
            }
            _ => content.push(node),
        }
    }

    let mut block = DocParamBlock::from_parts(tag, syntax.parts);
    block
        .content_mut()
        .append_nodes(fold_xml_elements(content, log), configuration);
    block
}

fn param_block_with_all_nodes(
    tag: DocBlockTag,
    nodes: Vec<DocNode>,
    configuration: &TsdocConfiguration,
    log: &mut ParserMessageLog,
) -> DocParamBlock {
    let mut block = DocParamBlock::from_parts(tag, ParamBlockParts::default());
    block
        .content_mut()
        .append_nodes(fold_xml_elements(nodes, log), configuration);
    block
}

fn nodes_split_cleanly(nodes: &[DocNode], boundary: usize) -> bool {
    nodes.iter().all(|node| match node_token_bounds(node) {
        None => true,
        Some((start, end)) => {
            end <= boundary
                || start >= boundary
                || matches!(node, DocNode::PlainText(text) if text.content().excerpt().is_some())
        }
    })
}

/// Smallest and largest token index covered by the node's excerpts.
fn node_token_bounds(node: &DocNode) -> Option<(usize, usize)> {
    let mut bounds: Option<(usize, usize)> = None;
    node.for_each_excerpt(&mut |excerpt| {
        if excerpt.is_empty() {
            return;
        }
        bounds = Some(match bounds {
            None => (excerpt.start_index(), excerpt.end_index()),
            Some((start, end)) => (
                start.min(excerpt.start_index()),
                end.max(excerpt.end_index()),
            ),
        });
    });
    bounds
}

/// Pair XML start and end tags into elements. Tag names match
/// case-insensitively. A mismatched or unmatched tag is left flat, with its
/// children spliced back into the surrounding flow.
fn fold_xml_elements(nodes: Vec<DocNode>, log: &mut ParserMessageLog) -> Vec<DocNode> {
    let mut output: Vec<DocNode> = Vec::with_capacity(nodes.len());
    let mut stack: Vec<(DocXmlStartTag, Vec<DocNode>)> = Vec::new();

    fn place(stack: &mut [(DocXmlStartTag, Vec<DocNode>)], output: &mut Vec<DocNode>, node: DocNode) {
        match stack.last_mut() {
            Some((_, children)) => children.push(node),
            None => output.push(node),
        }
    }

    for node in nodes {
        match node {
            DocNode::XmlStartTag(tag) if !tag.self_closing() => {
                stack.push((tag, Vec::new()));
            }
            DocNode::XmlEndTag(end_tag) => match stack.pop() {
                Some((start_tag, children))
                    if start_tag.name().eq_ignore_ascii_case(&end_tag.name()) =>
                {
                    let element = DocXmlElement::new(start_tag, children, end_tag);
                    place(&mut stack, &mut output, DocNode::XmlElement(element));
                }
                Some((start_tag, children)) => {
                    log_at(
                        log,
                        TsdocMessageId::XmlTagNameMismatch,
                        format!(
                            "The closing tag \"</{}>\" does not match the opening tag \"<{}>\"",
                            end_tag.name(),
                            start_tag.name()
                        ),
                        end_tag.name_content().excerpt(),
                    );
                    place(&mut stack, &mut output, DocNode::XmlStartTag(start_tag));
                    for child in children {
                        place(&mut stack, &mut output, child);
                    }
                    place(&mut stack, &mut output, DocNode::XmlEndTag(end_tag));
                }
                None => {
                    log_at(
                        log,
                        TsdocMessageId::XmlTagNameMismatch,
                        format!(
                            "The closing tag \"</{}>\" does not have a matching opening tag",
                            end_tag.name()
                        ),
                        end_tag.name_content().excerpt(),
                    );
                    place(&mut stack, &mut output, DocNode::XmlEndTag(end_tag));
                }
            },
            node => place(&mut stack, &mut output, node),
        }
    }

    // Unclosed start tags stay flat.
    while let Some((start_tag, children)) = stack.pop() {
        place(&mut stack, &mut output, DocNode::XmlStartTag(start_tag));
        for child in children {
            place(&mut stack, &mut output, child);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::tsdoc::lexing::read_tokens;
    use crate::tsdoc::parsing::node_parser::parse_verbatim_nodes;
    use crate::tsdoc::token::Token;

    fn tokens_for(text: &str) -> Arc<[Token]> {
        let buffer = TextRange::from_string(text.to_string());
        let mut lines = Vec::new();
        let mut pos = 0;
        for segment in text.split('\n') {
            lines.push(buffer.get_new_range(pos, pos + segment.len()));
            pos += segment.len() + 1;
        }
        Arc::from(read_tokens(&lines))
    }

    fn assemble(text: &str) -> (DocComment, ParserMessageLog) {
        assemble_with(text, &TsdocConfiguration::new())
    }

    fn assemble_with(
        text: &str,
        configuration: &TsdocConfiguration,
    ) -> (DocComment, ParserMessageLog) {
        let mut log = ParserMessageLog::new();
        let nodes = parse_verbatim_nodes(tokens_for(text), &mut log);
        let comment = assemble_comment(&nodes, configuration, &mut log);
        (comment, log)
    }

    fn section_text(nodes: &[DocNode]) -> String {
        nodes.iter().map(|node| node.to_text()).collect()
    }

    fn has_message(log: &ParserMessageLog, message_id: TsdocMessageId) -> bool {
        log.messages()
            .iter()
            .any(|message| message.message_id() == message_id)
    }

    fn count_messages(log: &ParserMessageLog, message_id: TsdocMessageId) -> usize {
        log.messages()
            .iter()
            .filter(|message| message.message_id() == message_id)
            .count()
    }

    #[test]
    fn test_summary_only() {
        let (comment, log) = assemble("Just a summary.");
        assert!(log.is_empty());
        assert_eq!(
            section_text(comment.summary_section.nodes()),
            "Just a summary.\n"
        );
        assert!(comment.remarks_block.is_none());
        assert!(comment.custom_blocks.is_empty());
    }

    #[test]
    fn test_remarks_block_owns_following_content() {
        let (comment, log) = assemble("Intro line.\n@remarks\nMore detail here.");
        assert!(log.is_empty());
        assert_eq!(section_text(comment.summary_section.nodes()), "Intro line.\n");
        let remarks = comment.remarks_block.as_ref().unwrap();
        assert_eq!(remarks.block_tag().tag_name(), "@remarks");
        assert!(section_text(remarks.content().nodes()).contains("More detail here."));
    }

    #[test]
    fn test_param_block() {
        let (comment, log) = assemble("@param x - the x coordinate");
        assert!(log.is_empty());
        assert_eq!(comment.params.count(), 1);
        let block = &comment.params.blocks()[0];
        assert_eq!(block.parameter_name(), "x");
        assert!(block.parameter_name_excerpt().is_some());
        assert!(block.hyphen_excerpt().is_some());
        assert_eq!(
            section_text(block.content().nodes()),
            "the x coordinate\n"
        );
    }

    #[test]
    fn test_param_block_with_jsdoc_type() {
        let (comment, log) = assemble("@param {string} x - the x");
        assert!(has_message(&log, TsdocMessageId::ParamTagWithInvalidType));
        let block = &comment.params.blocks()[0];
        assert_eq!(block.parameter_name(), "x");
        assert!(block.unsupported_jsdoc_type_excerpt().is_some());
        assert!(section_text(block.content().nodes()).contains("the x"));
    }

    #[test]
    fn test_param_block_missing_hyphen() {
        let (comment, log) = assemble("@param x the x");
        assert!(has_message(&log, TsdocMessageId::ParamTagMissingHyphen));
        let block = &comment.params.blocks()[0];
        assert_eq!(block.parameter_name(), "");
        assert!(block.hyphen_excerpt().is_none());
        // The raw content is kept so the comment still round-trips.
        assert!(section_text(block.content().nodes()).contains("x the x"));
    }

    #[test]
    fn test_param_block_with_optional_name_syntax() {
        let (comment, log) = assemble("@param [x] - the x");
        assert!(has_message(
            &log,
            TsdocMessageId::ParamTagWithInvalidOptionalName
        ));
        assert_eq!(comment.params.blocks()[0].parameter_name(), "");
    }

    #[test]
    fn test_type_param_block() {
        let (comment, log) = assemble("@typeParam T - the element type");
        assert!(log.is_empty());
        assert_eq!(comment.type_params.count(), 1);
        assert_eq!(comment.type_params.blocks()[0].parameter_name(), "T");
        assert!(comment.params.is_empty());
    }

    #[test]
    fn test_modifier_tags_collect_into_the_set() {
        let (comment, log) = assemble("@alpha @beta");
        assert!(log.is_empty());
        assert_eq!(comment.modifier_tag_set.nodes().len(), 2);
        assert!(comment.modifier_tag_set.is_alpha());
        assert!(comment.modifier_tag_set.is_beta());
        assert!(!comment.modifier_tag_set.is_public());
    }

    #[test]
    fn test_modifier_tag_between_content_keeps_the_section_flowing() {
        let (comment, log) = assemble("one @public two");
        assert!(log.is_empty());
        assert!(comment.modifier_tag_set.is_public());
        let summary = section_text(comment.summary_section.nodes());
        assert!(summary.contains("one "));
        assert!(summary.contains(" two"));
    }

    #[test]
    fn test_duplicate_modifier_tag_becomes_a_custom_block() {
        let (comment, log) = assemble("@alpha\n@alpha");
        assert!(has_message(&log, TsdocMessageId::DuplicateBlockTag));
        assert_eq!(comment.modifier_tag_set.nodes().len(), 1);
        assert_eq!(comment.custom_blocks.len(), 1);
        assert_eq!(comment.custom_blocks[0].block_tag().tag_name(), "@alpha");
    }

    #[test]
    fn test_duplicate_remarks_block() {
        let (comment, log) = assemble("@remarks one\n@remarks two");
        assert_eq!(count_messages(&log, TsdocMessageId::DuplicateBlockTag), 1);
        let remarks = comment.remarks_block.as_ref().unwrap();
        assert!(section_text(remarks.content().nodes()).contains("one"));
        assert_eq!(comment.custom_blocks.len(), 1);
        assert!(section_text(comment.custom_blocks[0].content().nodes()).contains("two"));
    }

    #[test]
    fn test_undefined_tag_becomes_a_custom_block() {
        let (comment, log) = assemble("@squiggle some content");
        assert!(has_message(&log, TsdocMessageId::UndefinedTag));
        assert_eq!(comment.custom_blocks.len(), 1);
        assert_eq!(
            comment.custom_blocks[0].block_tag().tag_name(),
            "@squiggle"
        );
        assert!(
            section_text(comment.custom_blocks[0].content().nodes()).contains("some content")
        );
    }

    #[test]
    fn test_undefined_tag_can_be_ignored() {
        let mut configuration = TsdocConfiguration::new();
        configuration.validation.ignore_undefined_tags = true;
        let (comment, log) = assemble_with("@squiggle some content", &configuration);
        assert!(!has_message(&log, TsdocMessageId::UndefinedTag));
        assert_eq!(comment.custom_blocks.len(), 1);
    }

    #[test]
    fn test_unsupported_tag_becomes_a_custom_block() {
        let mut configuration = TsdocConfiguration::new();
        configuration.set_support_for_tag(standard_tags::param(), true);
        let (comment, log) = assemble_with("@remarks detail", &configuration);
        assert!(has_message(&log, TsdocMessageId::UnsupportedTag));
        assert!(comment.remarks_block.is_none());
        assert_eq!(comment.custom_blocks.len(), 1);
    }

    #[test]
    fn test_inline_syntax_tag_in_block_position() {
        let (comment, log) = assemble("@label Overview");
        assert!(has_message(&log, TsdocMessageId::InlineTagMissingBraces));
        assert_eq!(comment.custom_blocks.len(), 1);
    }

    #[test]
    fn test_block_syntax_tag_with_braces() {
        let (comment, log) = assemble("{@remarks}");
        assert!(has_message(&log, TsdocMessageId::TagShouldNotHaveBraces));
        let nodes = comment.summary_section.nodes();
        assert!(nodes
            .iter()
            .any(|node| matches!(node, DocNode::InlineTag(_))));
    }

    #[test]
    fn test_inherit_doc_moves_to_the_comment() {
        let (comment, log) = assemble("{@inheritDoc Base.method}");
        assert!(log.is_empty());
        let tag = comment.inherit_doc_tag.as_ref().unwrap();
        assert!(tag.declaration_reference().is_some());
        assert!(!comment
            .summary_section
            .nodes()
            .iter()
            .any(|node| matches!(node, DocNode::InheritDocTag(_))));
    }

    #[test]
    fn test_second_inherit_doc_is_reported_and_kept_in_the_flow() {
        let (comment, log) = assemble("{@inheritDoc} and {@inheritDoc}");
        assert!(has_message(&log, TsdocMessageId::ExtraInheritDocTag));
        assert!(comment.inherit_doc_tag.is_some());
        let extras = comment
            .summary_section
            .nodes()
            .iter()
            .filter(|node| matches!(node, DocNode::InheritDocTag(_)))
            .count();
        assert_eq!(extras, 1);
    }

    #[test]
    fn test_inherit_doc_incompatibilities() {
        let (_comment, log) = assemble("Summary text\n{@inheritDoc Base.method}\n@remarks extra");
        assert!(has_message(
            &log,
            TsdocMessageId::InheritDocIncompatibleSummary
        ));
        assert!(has_message(&log, TsdocMessageId::InheritDocIncompatibleTag));
    }

    #[test]
    fn test_inherit_doc_alone_is_compatible() {
        let (_comment, log) = assemble("{@inheritDoc Base.method}");
        assert!(!has_message(
            &log,
            TsdocMessageId::InheritDocIncompatibleSummary
        ));
    }

    #[test]
    fn test_xml_elements_fold() {
        let (comment, log) = assemble("<b>bold</b>");
        assert!(log.is_empty());
        let nodes = comment.summary_section.nodes();
        let element = nodes
            .iter()
            .find_map(|node| match node {
                DocNode::XmlElement(element) => Some(element),
                _ => None,
            })
            .unwrap();
        assert_eq!(element.name(), "b");
        assert_eq!(section_text(element.nodes()), "bold");
        assert_eq!(section_text(nodes), "<b>bold</b>\n");
    }

    #[test]
    fn test_xml_element_names_match_case_insensitively() {
        let (comment, _log) = assemble("<B>bold</b>");
        assert!(comment
            .summary_section
            .nodes()
            .iter()
            .any(|node| matches!(node, DocNode::XmlElement(_))));
    }

    #[test]
    fn test_self_closing_tag_stays_flat() {
        let (comment, log) = assemble("line one<br/>line two");
        assert!(log.is_empty());
        assert!(comment
            .summary_section
            .nodes()
            .iter()
            .any(|node| matches!(node, DocNode::XmlStartTag(_))));
    }

    #[test]
    fn test_xml_name_mismatch_keeps_both_tags_flat() {
        let (comment, log) = assemble("<a>inner</b>");
        assert!(has_message(&log, TsdocMessageId::XmlTagNameMismatch));
        let nodes = comment.summary_section.nodes();
        assert!(!nodes.iter().any(|node| matches!(node, DocNode::XmlElement(_))));
        assert!(nodes.iter().any(|node| matches!(node, DocNode::XmlStartTag(_))));
        assert!(nodes.iter().any(|node| matches!(node, DocNode::XmlEndTag(_))));
        assert_eq!(section_text(nodes), "<a>inner</b>\n");
    }

    #[test]
    fn test_unmatched_closing_tag_is_reported() {
        let (_comment, log) = assemble("text</b>");
        assert!(has_message(&log, TsdocMessageId::XmlTagNameMismatch));
    }

    #[test]
    fn test_unclosed_start_tag_stays_flat() {
        let (comment, _log) = assemble("<a>unclosed");
        let nodes = comment.summary_section.nodes();
        assert!(!nodes.iter().any(|node| matches!(node, DocNode::XmlElement(_))));
        assert_eq!(section_text(nodes), "<a>unclosed\n");
    }

    #[test]
    fn test_unsupported_xml_element() {
        let mut configuration = TsdocConfiguration::new();
        configuration.set_supported_xml_elements(&["b"]);
        let (_comment, log) = assemble_with("<i>italic</i>", &configuration);
        assert_eq!(
            count_messages(&log, TsdocMessageId::UnsupportedXmlElement),
            2
        );
        let (_comment, log) = assemble_with("<b>bold</b>", &configuration);
        assert_eq!(
            count_messages(&log, TsdocMessageId::UnsupportedXmlElement),
            0
        );
    }

    #[test]
    fn test_deprecated_requires_a_message() {
        let (_comment, log) = assemble("@deprecated");
        assert!(has_message(&log, TsdocMessageId::MissingDeprecationMessage));

        let (comment, log) = assemble("@deprecated Use otherMethod() instead");
        assert!(!has_message(&log, TsdocMessageId::MissingDeprecationMessage));
        assert!(comment.deprecated_block.is_some());
    }

    #[test]
    fn test_see_blocks_collect() {
        let (comment, log) = assemble("@see first reference\n@see second reference");
        assert!(!has_message(&log, TsdocMessageId::DuplicateBlockTag));
        assert_eq!(comment.see_blocks.len(), 2);
    }

    #[test]
    fn test_assembly_preserves_every_character() {
        let inputs = [
            "summary\n@remarks detail <b>bold</b>\n@param x - the x\n@alpha",
            "@param {a{b}c} x - nested\n@see <a>mismatch</b>",
            "@squiggle kept\n{@inheritDoc} {@inheritDoc}",
        ];
        for input in inputs {
            let (comment, _log) = assemble(input);
            // The walk visits fields, not source positions, so order the
            // pieces by token index before joining them back up.
            let mut pieces: Vec<(usize, String)> = Vec::new();
            comment.for_each_excerpt(&mut |excerpt| {
                if !excerpt.is_empty() {
                    pieces.push((excerpt.start_index(), excerpt.to_string()));
                }
            });
            pieces.sort_by_key(|(start, _)| *start);
            let text: String = pieces.into_iter().map(|(_, text)| text).collect();
            assert_eq!(text, format!("{input}\n"), "input: {input:?}");
        }
    }
}

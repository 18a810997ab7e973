//! Parser facade
//!
//! `TsdocParser` drives the whole pipeline: line extraction, tokenization,
//! verbatim node parsing, tag classification, and paragraph grouping. A
//! parser is cheap to construct and can be reused across comments; each
//! parse returns an independent [`ParserContext`].
//!
//! Parsing never fails. When the input has no well-formed `/** ... */`
//! frame, the context carries an empty comment and the log explains why;
//! every later-stage problem becomes a log message beside a best-effort
//! tree.

use std::sync::Arc;

use crate::tsdoc::ast::comment::DocComment;
use crate::tsdoc::config::configuration::TsdocConfiguration;
use crate::tsdoc::lexing::{extract_lines, read_tokens};
use crate::tsdoc::messages::message_log::ParserMessageLog;
use crate::tsdoc::parsing::assembler::assemble_comment;
use crate::tsdoc::parsing::node_parser::parse_verbatim_nodes;
use crate::tsdoc::parsing::paragraph_splitter::split_paragraphs;
use crate::tsdoc::parsing::parser_context::ParserContext;
use crate::tsdoc::text::TextRange;
use crate::tsdoc::token::Token;

#[derive(Debug, Clone)]
pub struct TsdocParser {
    configuration: Arc<TsdocConfiguration>,
}

impl TsdocParser {
    /// A parser over the standard tag definitions and default validation
    /// switches.
    pub fn new() -> Self {
        Self::with_configuration(Arc::new(TsdocConfiguration::new()))
    }

    pub fn with_configuration(configuration: Arc<TsdocConfiguration>) -> Self {
        Self { configuration }
    }

    pub fn configuration(&self) -> &Arc<TsdocConfiguration> {
        &self.configuration
    }

    pub fn parse_string(&self, text: impl Into<String>) -> ParserContext {
        self.parse_range(TextRange::from_string(text.into()))
    }

    pub fn parse_range(&self, source_range: TextRange) -> ParserContext {
        let mut log = ParserMessageLog::new();

        let Some(extracted) = extract_lines(&source_range, &mut log) else {
            return ParserContext {
                configuration: Arc::clone(&self.configuration),
                source_range,
                comment_range: TextRange::empty(),
                lines: Vec::new(),
                tokens: Arc::from(Vec::new()),
                verbatim_nodes: Vec::new(),
                doc_comment: DocComment::new(),
                log,
            };
        };

        let tokens: Arc<[Token]> = Arc::from(read_tokens(&extracted.lines));
        let verbatim_nodes = parse_verbatim_nodes(Arc::clone(&tokens), &mut log);
        let mut doc_comment = assemble_comment(&verbatim_nodes, &self.configuration, &mut log);
        doc_comment.lines = extracted.lines.clone();
        split_paragraphs(&mut doc_comment, &self.configuration);

        ParserContext {
            configuration: Arc::clone(&self.configuration),
            source_range,
            comment_range: extracted.comment_range,
            lines: extracted.lines,
            tokens,
            verbatim_nodes,
            doc_comment,
            log,
        }
    }
}

impl Default for TsdocParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsdoc::ast::node::DocNode;
    use crate::tsdoc::messages::message_id::TsdocMessageId;

    #[test]
    fn test_empty_comment_parses_cleanly() {
        let context = TsdocParser::new().parse_string("/** */");
        assert!(context.log.is_empty());
        assert!(context.doc_comment.summary_section.is_empty());
        assert_eq!(context.comment_range.as_str(), "/** */");
    }

    #[test]
    fn test_missing_comment_produces_an_empty_context() {
        let context = TsdocParser::new().parse_string("const x = 1;");
        assert_eq!(context.log.messages().len(), 1);
        assert_eq!(
            context.log.messages()[0].message_id(),
            TsdocMessageId::CommentOpeningDelimiterSyntax
        );
        assert!(context.lines.is_empty());
        assert!(context.verbatim_nodes.is_empty());
        assert!(context.doc_comment.summary_section.is_empty());
    }

    #[test]
    fn test_full_pipeline_on_a_typical_comment() {
        let source = "/**\n * Adds two numbers.\n *\n * @remarks\n * Works on integers.\n *\n * @param a - the first operand\n * @param b - the second operand\n * @returns the sum\n * @public\n */";
        let context = TsdocParser::new().parse_string(source);
        assert!(context.log.is_empty());

        let comment = &context.doc_comment;
        assert!(comment
            .summary_section
            .nodes()
            .iter()
            .any(|node| matches!(node, DocNode::Paragraph(_))));
        assert!(comment.remarks_block.is_some());
        assert_eq!(comment.params.count(), 2);
        assert_eq!(comment.params.blocks()[0].parameter_name(), "a");
        assert_eq!(comment.params.blocks()[1].parameter_name(), "b");
        assert!(comment.returns_block.is_some());
        assert!(comment.modifier_tag_set.is_public());
        assert_eq!(comment.lines.len(), context.lines.len());
    }

    #[test]
    fn test_summary_paragraphs_are_grouped() {
        let source = "/**\n * First paragraph.\n *\n * Second paragraph.\n */";
        let context = TsdocParser::new().parse_string(source);
        let paragraphs = context
            .doc_comment
            .summary_section
            .nodes()
            .iter()
            .filter(|node| matches!(node, DocNode::Paragraph(_)))
            .count();
        assert_eq!(paragraphs, 2);
    }

    #[test]
    fn test_parser_is_reusable() {
        let parser = TsdocParser::new();
        let first = parser.parse_string("/** one */");
        let second = parser.parse_string("/** two */");
        assert!(Arc::ptr_eq(&first.configuration, &second.configuration));
        assert_ne!(
            first.doc_comment.summary_section.nodes().len(),
            0
        );
        assert_ne!(
            second.doc_comment.summary_section.nodes().len(),
            0
        );
    }

    #[test]
    fn test_configured_parser_applies_its_switches() {
        let mut configuration = TsdocConfiguration::new();
        configuration.validation.ignore_undefined_tags = true;
        let parser = TsdocParser::with_configuration(Arc::new(configuration));
        let context = parser.parse_string("/** @notDefined text */");
        assert!(!context
            .log
            .messages()
            .iter()
            .any(|message| message.message_id() == TsdocMessageId::UndefinedTag));
        assert_eq!(context.doc_comment.custom_blocks.len(), 1);
    }
}

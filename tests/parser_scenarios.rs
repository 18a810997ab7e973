//! End-to-end scenarios for the comment parsing pipeline.

use tsdoc_parser::tsdoc::ast::{DocNode, DocParamBlock};
use tsdoc_parser::tsdoc::declaration_reference::{
    Component, DeclarationReference, Meaning, Navigation, Source,
};
use tsdoc_parser::tsdoc::messages::TsdocMessageId;
use tsdoc_parser::tsdoc::parsing::{ParserContext, TsdocParser};
use tsdoc_parser::tsdoc::testing::{assert_full_token_coverage, assert_verbatim_round_trip};

fn parse(input: &str) -> ParserContext {
    TsdocParser::new().parse_string(input)
}

fn section_text(nodes: &[DocNode]) -> String {
    nodes.iter().map(|node| node.to_text()).collect()
}

fn message_ids(context: &ParserContext) -> Vec<TsdocMessageId> {
    context
        .log
        .messages()
        .iter()
        .map(|message| message.message_id())
        .collect()
}

#[test]
fn test_empty_comment_parses_to_an_empty_model() {
    let context = parse("/** */");
    assert!(context.log.is_empty(), "unexpected: {:?}", context.log);
    assert!(context.lines.is_empty());
    assert!(context.doc_comment.summary_section.nodes().is_empty());
    assert!(context.doc_comment.params.is_empty());
    assert!(context.doc_comment.modifier_tag_set.nodes().is_empty());
    assert_eq!(context.doc_comment.emit_as_tsdoc(), "/** */");
    assert_full_token_coverage(&context);
}

#[test]
fn test_comment_followed_by_source_text_parses_to_a_single_paragraph() {
    let context = parse("/**\nA great function!\n */\nfunction foobar() {}\n");
    assert!(context.log.is_empty(), "unexpected: {:?}", context.log);

    // Extraction stops at "*/"; the declaration after it is not comment
    // content.
    assert_eq!(context.comment_range.as_str(), "/**\nA great function!\n */");
    assert_eq!(context.lines.len(), 1);
    assert_eq!(context.lines[0].as_str(), "A great function!");

    let summary = context.doc_comment.summary_section.nodes();
    assert_eq!(summary.len(), 1);
    assert!(matches!(summary[0], DocNode::Paragraph(_)));
    assert_eq!(section_text(summary), "A great function!\n");

    assert_verbatim_round_trip(&context);
    assert_full_token_coverage(&context);
}

#[test]
fn test_unterminated_code_span_degrades_to_error_text() {
    let context = parse("/** This `is wrong */");
    assert_eq!(
        message_ids(&context),
        vec![TsdocMessageId::CodeSpanMissingDelimiter]
    );

    // The backtick survives as an error-text node and everything after it
    // is still parsed as plain content.
    let summary = section_text(context.doc_comment.summary_section.nodes());
    assert!(summary.contains("This "), "summary was {summary:?}");
    assert!(summary.contains("is wrong"), "summary was {summary:?}");
    let mut error_texts = Vec::new();
    for node in context.doc_comment.summary_section.nodes() {
        collect_error_texts(node, &mut error_texts);
    }
    assert_eq!(error_texts, vec!["`".to_string()]);

    assert_verbatim_round_trip(&context);
    assert_full_token_coverage(&context);
}

fn collect_error_texts(node: &DocNode, output: &mut Vec<String>) {
    match node {
        DocNode::ErrorText(error) => output.push(error.text().to_string()),
        DocNode::Paragraph(paragraph) => {
            for child in paragraph.nodes() {
                collect_error_texts(child, output);
            }
        }
        _ => {}
    }
}

#[test]
fn test_param_tag_produces_a_named_param_block() {
    let context = parse("/** @param x - the x */");
    assert!(context.log.is_empty(), "unexpected: {:?}", context.log);

    assert_eq!(context.doc_comment.params.count(), 1);
    let block: &DocParamBlock = &context.doc_comment.params.blocks()[0];
    assert_eq!(block.parameter_name(), "x");
    let content = section_text(block.content().nodes());
    assert!(content.contains("the x"), "content was {content:?}");

    assert_verbatim_round_trip(&context);
    assert_full_token_coverage(&context);
}

#[test]
fn test_modifier_tags_accumulate_without_duplicates() {
    let context = parse("/** @alpha @beta */");
    assert!(context.log.is_empty(), "unexpected: {:?}", context.log);

    let modifiers = &context.doc_comment.modifier_tag_set;
    assert!(modifiers.is_alpha());
    assert!(modifiers.is_beta());
    assert_eq!(modifiers.nodes().len(), 2);
    let names: Vec<_> = modifiers
        .nodes()
        .iter()
        .map(|tag| tag.tag_name().to_string())
        .collect();
    assert_eq!(names, vec!["@alpha".to_string(), "@beta".to_string()]);

    assert_full_token_coverage(&context);
}

#[test]
fn test_declaration_reference_grammar_end_to_end() {
    let reference = DeclarationReference::parse("foo/bar!N.C#z:member(1)").unwrap();

    match reference.source() {
        Some(Source::Module(module)) => {
            assert_eq!(module.path(), "foo/bar");
            assert_eq!(module.package_name(), "foo");
            assert_eq!(module.import_path(), "bar");
        }
        other => panic!("unexpected source: {other:?}"),
    }
    assert_eq!(reference.navigation(), Some(Navigation::Exports));

    let symbol = reference.symbol().unwrap();
    assert_eq!(symbol.meaning(), Some(Meaning::Member));
    assert_eq!(symbol.overload_index(), Some(1));

    let path = symbol.component_path().unwrap();
    assert_eq!(path.component(), &Component::String("z".to_string()));
    let parent = path.parent().unwrap();
    assert_eq!(parent.component(), &Component::String("C".to_string()));
    let root = parent.parent().unwrap();
    assert_eq!(root.component(), &Component::String("N".to_string()));
    assert!(root.parent().is_none());

    assert_eq!(reference.to_string(), "foo/bar!N.C#z:member(1)");
}

#[test]
fn test_bad_link_destination_is_reported_and_parsing_continues() {
    let context = parse("/** See {@link a..b} for details. */");
    assert_eq!(
        message_ids(&context),
        vec![TsdocMessageId::LinkTagDestinationSyntax]
    );

    let mut error_texts = Vec::new();
    for node in context.doc_comment.summary_section.nodes() {
        collect_error_texts(node, &mut error_texts);
    }
    assert_eq!(error_texts, vec!["{@link a..b}".to_string()]);

    let summary = section_text(context.doc_comment.summary_section.nodes());
    assert!(summary.contains("for details."), "summary was {summary:?}");

    assert_verbatim_round_trip(&context);
    assert_full_token_coverage(&context);
}

#[test]
fn test_typical_comment_distributes_content_across_fields() {
    let context = parse(
        "/**\n\
         \x20* Adds two numbers together.\n\
         \x20*\n\
         \x20* @remarks\n\
         \x20* Uses IEEE 754 semantics.\n\
         \x20* @param x - the first number\n\
         \x20* @param y - the second number\n\
         \x20* @returns the sum\n\
         \x20* @public\n\
         \x20*/",
    );
    assert!(context.log.is_empty(), "unexpected: {:?}", context.log);

    let comment = &context.doc_comment;
    let summary = section_text(comment.summary_section.nodes());
    assert!(summary.contains("Adds two numbers together."));
    let remarks = comment.remarks_block.as_ref().unwrap();
    assert!(section_text(remarks.content().nodes()).contains("IEEE 754"));
    assert_eq!(comment.params.count(), 2);
    assert_eq!(comment.params.blocks()[0].parameter_name(), "x");
    assert_eq!(comment.params.blocks()[1].parameter_name(), "y");
    assert!(comment.returns_block.is_some());
    assert!(comment.modifier_tag_set.is_public());

    assert_verbatim_round_trip(&context);
    assert_full_token_coverage(&context);
}

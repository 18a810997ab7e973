//! Property tests for the parser's structural guarantees: parsing is
//! total, verbatim nodes reproduce the input, every token is owned by
//! exactly one excerpt, emission reaches a fixed point, and component
//! escaping is invertible.

use proptest::prelude::*;
use tsdoc_parser::tsdoc::declaration_reference::{
    escape_component_string, unescape_component_string,
};
use tsdoc_parser::tsdoc::parsing::TsdocParser;
use tsdoc_parser::tsdoc::testing::TokenCoverageChecker;

/// One plausible piece of comment content, including the malformed kinds
/// the parser must recover from.
fn comment_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z0-9 ]{0,12}",
        "@[a-zA-Z]{1,10}",
        Just("{@link Button}".to_string()),
        Just("{@link a..b}".to_string()),
        Just("{@label chosen}".to_string()),
        Just("`render()`".to_string()),
        Just("`broken".to_string()),
        Just("\\@escaped".to_string()),
        Just("<b>bold</b>".to_string()),
        Just("<br/>".to_string()),
        Just("</unmatched>".to_string()),
        Just("}".to_string()),
        Just("@param x - the value".to_string()),
        Just("@returns a number".to_string()),
        Just("@inheritDoc".to_string()),
    ]
}

fn comment_line() -> impl Strategy<Value = String> {
    proptest::collection::vec(comment_fragment(), 0..5)
        .prop_map(|fragments| fragments.join(" "))
}

/// A multi-line `/** ... */` comment in the conventional framing.
fn framed_comment() -> impl Strategy<Value = String> {
    proptest::collection::vec(comment_line(), 1..5).prop_map(|lines| {
        let mut source = String::from("/**\n");
        for line in &lines {
            source.push_str(" * ");
            source.push_str(line);
            source.push('\n');
        }
        source.push_str(" */");
        source
    })
}

/// Arbitrary printable text, mostly not a well-formed comment at all.
fn arbitrary_source() -> impl Strategy<Value = String> {
    "[ -~\n]{0,60}"
}

proptest! {
    #[test]
    fn test_parsing_is_total(source in arbitrary_source()) {
        let context = TsdocParser::new().parse_string(source);
        // Force the lazy pieces; the point is that nothing panics.
        let _ = context.doc_comment.emit_as_tsdoc();
        let _ = context.log.messages().len();
    }

    #[test]
    fn test_verbatim_nodes_reproduce_the_comment(source in framed_comment()) {
        let context = TsdocParser::new().parse_string(source);
        let rendered: String = context
            .verbatim_nodes
            .iter()
            .map(|node| node.to_text())
            .collect();
        let mut expected = String::new();
        for line in &context.lines {
            expected.push_str(line.as_str());
            expected.push('\n');
        }
        prop_assert_eq!(rendered, expected);
    }

    #[test]
    fn test_every_token_is_owned_by_exactly_one_excerpt(source in framed_comment()) {
        let context = TsdocParser::new().parse_string(source);
        prop_assert_eq!(TokenCoverageChecker::new(&context).find_defect(), None);
    }

    #[test]
    fn test_emission_reaches_a_fixed_point(source in framed_comment()) {
        let parser = TsdocParser::new();
        let first = parser.parse_string(source).doc_comment.emit_as_tsdoc();
        let second = parser.parse_string(first.clone()).doc_comment.emit_as_tsdoc();
        prop_assert_eq!(second, first);
    }

    #[test]
    fn test_component_escaping_is_invertible(text in any::<String>()) {
        let escaped = escape_component_string(&text);
        prop_assert_eq!(unescape_component_string(&escaped).unwrap(), text);
    }
}

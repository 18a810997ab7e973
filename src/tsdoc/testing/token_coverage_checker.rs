//! Token coverage and round-trip checking
//!
//! The parser guarantees that every token of a successfully extracted
//! comment ends up in exactly one excerpt of the final comment tree, and
//! that the verbatim node list reproduces the comment text character for
//! character. The checkers here verify both guarantees for one parse.

use crate::tsdoc::parsing::parser_context::ParserContext;
use crate::tsdoc::token::TokenKind;

/// A violation of the one-excerpt-per-token guarantee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverageDefect {
    /// The tokens in `[start_index, end_index)` belong to no excerpt.
    Gap { start_index: usize, end_index: usize },
    /// The token at `index` belongs to more than one excerpt.
    Overlap { index: usize },
}

/// Checks that the comment's excerpts exactly partition the token stream.
///
/// The trailing `EndOfInput` marker is synthetic and never owned by a
/// node, so it is excluded from the checked range. Excerpt order in the
/// tree does not matter; the checker sorts by token index.
pub struct TokenCoverageChecker<'a> {
    context: &'a ParserContext,
}

impl<'a> TokenCoverageChecker<'a> {
    pub fn new(context: &'a ParserContext) -> Self {
        Self { context }
    }

    /// The first gap or overlap in token order, if any.
    pub fn find_defect(&self) -> Option<CoverageDefect> {
        let limit = match self.context.tokens.last() {
            Some(token) if token.kind() == TokenKind::EndOfInput => self.context.tokens.len() - 1,
            Some(_) => self.context.tokens.len(),
            None => 0,
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        self.context.doc_comment.for_each_excerpt(&mut |excerpt| {
            if !excerpt.is_empty() {
                ranges.push((excerpt.start_index(), excerpt.end_index()));
            }
        });
        ranges.sort_unstable();

        let mut expected = 0;
        for (start, end) in ranges {
            if start < expected {
                return Some(CoverageDefect::Overlap { index: start });
            }
            if start > expected {
                return Some(CoverageDefect::Gap {
                    start_index: expected,
                    end_index: start,
                });
            }
            expected = end;
        }
        if expected < limit {
            return Some(CoverageDefect::Gap {
                start_index: expected,
                end_index: limit,
            });
        }
        None
    }

    /// Panic with the offending token range if coverage is broken.
    pub fn assert_full_coverage(&self) {
        if let Some(defect) = self.find_defect() {
            panic!(
                "token coverage defect {:?} in comment {:?}",
                defect,
                self.context.comment_range.as_str()
            );
        }
    }
}

/// Assert that every token of `context` is owned by exactly one excerpt.
pub fn assert_full_token_coverage(context: &ParserContext) {
    TokenCoverageChecker::new(context).assert_full_coverage();
}

/// Assert that the verbatim node list reproduces the comment's interior
/// text: the extracted lines joined by `\n`, with one trailing `\n`
/// whenever any line exists.
pub fn assert_verbatim_round_trip(context: &ParserContext) {
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
    assert_eq!(
        rendered, expected,
        "verbatim nodes must reproduce the comment text"
    );
}

//! Token stream views
//!
//! A `TokenSequence` is a half-open `[start, end)` window over the shared
//! token stream. AST nodes hold their excerpts as sequences, so the whole
//! tree points into one token allocation and one text buffer.

use std::fmt;
use std::sync::Arc;

use crate::tsdoc::text::TextRange;
use crate::tsdoc::token::Token;

#[derive(Debug, Clone)]
pub struct TokenSequence {
    tokens: Arc<[Token]>,
    start_index: usize,
    end_index: usize,
}

impl TokenSequence {
    /// A window over `tokens`. Panics when the bounds are inverted or out
    /// of range; windows are only built from reader positions.
    pub fn new(tokens: Arc<[Token]>, start_index: usize, end_index: usize) -> Self {
        assert!(
            start_index <= end_index,
            "sequence bounds are inverted: {start_index} > {end_index}"
        );
        assert!(
            end_index <= tokens.len(),
            "sequence end {end_index} is outside the token stream"
        );
        Self {
            tokens,
            start_index,
            end_index,
        }
    }

    pub fn empty() -> Self {
        Self {
            tokens: Arc::from(Vec::new()),
            start_index: 0,
            end_index: 0,
        }
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn end_index(&self) -> usize {
        self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }

    /// The tokens inside this window.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens[self.start_index..self.end_index]
    }

    /// The full stream this window views.
    pub fn full_stream(&self) -> &Arc<[Token]> {
        &self.tokens
    }

    /// A new window over the same stream. Indexes are absolute stream
    /// positions, with the same bounds checks as [TokenSequence::new].
    pub fn get_new_sequence(&self, start_index: usize, end_index: usize) -> Self {
        Self::new(self.tokens.clone(), start_index, end_index)
    }

    /// The source range from the first token's start to the last token's
    /// end. Empty sequences map to the empty range.
    pub fn get_containing_text_range(&self) -> TextRange {
        if self.is_empty() {
            return TextRange::empty();
        }
        let first = &self.tokens[self.start_index];
        let last = &self.tokens[self.end_index - 1];
        first
            .range()
            .get_new_range(first.range().pos(), last.range().end())
    }
}

impl PartialEq for TokenSequence {
    fn eq(&self, other: &Self) -> bool {
        self.tokens() == other.tokens()
    }
}

impl fmt::Display for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in self.tokens() {
            f.write_str(&token.to_string())?;
        }
        Ok(())
    }
}

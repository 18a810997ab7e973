//! Cursor over the token stream
//!
//! The reader tracks two positions: the current read position and the
//! start of the accumulated run. Tokens pass from the stream into the
//! accumulation as they are read; extracting hands the run over as a
//! `TokenSequence` and restarts it. Markers snapshot the read position so
//! speculative parses can back out, rewinding the accumulation with them
//! when needed.
//!
//! Reading past the end, expired markers, and extraction misuse are parser
//! bugs and panic; they cannot be triggered by any input text.

use std::sync::Arc;

use crate::tsdoc::parsing::token_sequence::TokenSequence;
use crate::tsdoc::token::{Token, TokenKind};

/// A snapshot of the read position, redeemable with
/// [`TokenReader::backtrack_to_marker`].
pub type Marker = usize;

pub struct TokenReader {
    tokens: Arc<[Token]>,
    end_index: usize,
    current_index: usize,
    accumulated_start_index: usize,
}

impl TokenReader {
    /// A reader over the whole stream.
    pub fn new(tokens: Arc<[Token]>) -> Self {
        let end_index = tokens.len();
        Self {
            tokens,
            end_index,
            current_index: 0,
            accumulated_start_index: 0,
        }
    }

    /// A reader embedded in a sub-sequence, used to re-parse the content
    /// of an inline tag. It shares the stream and is bounded by the
    /// sequence's window.
    pub fn for_sequence(sequence: &TokenSequence) -> Self {
        Self {
            tokens: sequence.full_stream().clone(),
            end_index: sequence.end_index(),
            current_index: sequence.start_index(),
            accumulated_start_index: sequence.start_index(),
        }
    }

    /// Extract the accumulated run as a sequence and restart the
    /// accumulation. Panics when the run is empty.
    pub fn extract_accumulated_sequence(&mut self) -> TokenSequence {
        assert!(
            self.accumulated_start_index != self.current_index,
            "cannot extract an empty accumulated sequence"
        );
        let sequence = TokenSequence::new(
            self.tokens.clone(),
            self.accumulated_start_index,
            self.current_index,
        );
        self.accumulated_start_index = self.current_index;
        sequence
    }

    /// Like [`Self::extract_accumulated_sequence`], but `None` when
    /// nothing was accumulated.
    pub fn try_extract_accumulated_sequence(&mut self) -> Option<TokenSequence> {
        if self.is_accumulated_sequence_empty() {
            None
        } else {
            Some(self.extract_accumulated_sequence())
        }
    }

    /// Panics if tokens were read but never extracted. Called on state
    /// transitions where a leftover accumulation would mean lost text.
    pub fn assert_accumulated_sequence_is_empty(&self) {
        assert!(
            self.is_accumulated_sequence_empty(),
            "tokens were accumulated but never extracted"
        );
    }

    pub fn is_accumulated_sequence_empty(&self) -> bool {
        self.accumulated_start_index == self.current_index
    }

    pub fn peek_token(&self) -> &Token {
        &self.tokens[self.current_index]
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        if self.current_index >= self.end_index {
            return TokenKind::EndOfInput;
        }
        self.tokens[self.current_index].kind()
    }

    pub fn peek_token_after_kind(&self) -> TokenKind {
        if self.current_index + 1 >= self.end_index {
            return TokenKind::EndOfInput;
        }
        self.tokens[self.current_index + 1].kind()
    }

    pub fn peek_token_after_after_kind(&self) -> TokenKind {
        if self.current_index + 2 >= self.end_index {
            return TokenKind::EndOfInput;
        }
        self.tokens[self.current_index + 2].kind()
    }

    /// The kind before the current position, or `EndOfInput` at the very
    /// start of the stream. The start-of-input answer doubles as a word
    /// boundary, which is exactly what position-sensitive rules need.
    pub fn peek_previous_token_kind(&self) -> TokenKind {
        if self.current_index == 0 {
            return TokenKind::EndOfInput;
        }
        self.tokens[self.current_index - 1].kind()
    }

    /// Read the current token and advance. Panics past the end of the
    /// stream; the trailing `EndOfInput` token is readable, so loops that
    /// stop on it never trip this.
    pub fn read_token(&mut self) -> Token {
        assert!(
            self.current_index < self.end_index,
            "cannot read past the end of the token stream"
        );
        let token = self.tokens[self.current_index].clone();
        self.current_index += 1;
        token
    }

    pub fn create_marker(&self) -> Marker {
        self.current_index
    }

    /// Rewind to a marker. The accumulation start rewinds with it when the
    /// marker lies inside the accumulated run.
    pub fn backtrack_to_marker(&mut self, marker: Marker) {
        assert!(
            marker <= self.current_index,
            "the marker is ahead of the current position"
        );
        self.current_index = marker;
        if marker < self.accumulated_start_index {
            self.accumulated_start_index = marker;
        }
    }

    /// A one-token window at the current position, without reading it.
    /// Diagnostics use this to point at the token a recognizer stopped on.
    /// At the end of the window the result is an empty sequence there.
    pub fn sequence_for_current_token(&self) -> TokenSequence {
        if self.current_index >= self.end_index {
            return TokenSequence::new(self.tokens.clone(), self.end_index, self.end_index);
        }
        TokenSequence::new(self.tokens.clone(), self.current_index, self.current_index + 1)
    }

    /// The window from a marker up to the current position, independent of
    /// the accumulation.
    pub fn sequence_from_marker(&self, marker: Marker) -> TokenSequence {
        TokenSequence::new(self.tokens.clone(), marker, self.current_index)
    }
}

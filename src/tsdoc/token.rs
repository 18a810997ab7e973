//! Token definitions for doc comment content
//!
//! This module defines the tokens produced by the content tokenizer. The
//! kinds are defined with the logos derive macro; the two kinds without a
//! logos attribute (`EndOfInput` and `Newline`) are synthetic and appended
//! by the tokenizer itself rather than matched against text.

use logos::Logos;

use crate::tsdoc::text::{TextLocation, TextRange};

/// All token kinds that can appear in extracted doc comment content.
///
/// Every character of the input maps to exactly one kind, so a token
/// stream always covers its source lines completely.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Synthetic markers appended by the tokenizer
    EndOfInput,
    Newline,

    // Runs
    #[regex(r"[ \t]+")]
    Spacing,
    #[regex(r"[A-Za-z0-9_]+")]
    AsciiWord,

    // Single significant characters
    #[token("\\")]
    Backslash,
    #[token("<")]
    LessThan,
    #[token(">")]
    GreaterThan,
    #[token("=")]
    Equals,
    #[token("'")]
    SingleQuote,
    #[token("\"")]
    DoubleQuote,
    #[token("/")]
    Slash,
    #[token("-")]
    Hyphen,
    #[token("@")]
    AtSign,
    #[token("{")]
    LeftCurlyBracket,
    #[token("}")]
    RightCurlyBracket,
    #[token("`")]
    Backtick,
    #[token(".")]
    Period,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("[")]
    LeftSquareBracket,
    #[token("]")]
    RightSquareBracket,
    #[token("|")]
    Pipe,
    #[token("(")]
    LeftParenthesis,
    #[token(")")]
    RightParenthesis,
    #[token("#")]
    PoundSymbol,
    #[token("+")]
    Plus,
    #[token("$")]
    DollarSign,

    // Remaining printable ASCII punctuation, one character per token
    #[regex(r"[!%&*;?^~]")]
    OtherPunctuation,

    // Anything else (control characters, non-ASCII text), as runs
    #[regex(r"[^ -~\t]+")]
    Other,
}

impl TokenKind {
    /// Check if this kind is punctuation that a backslash may escape.
    pub fn is_punctuation(&self) -> bool {
        matches!(
            self,
            TokenKind::Backslash
                | TokenKind::LessThan
                | TokenKind::GreaterThan
                | TokenKind::Equals
                | TokenKind::SingleQuote
                | TokenKind::DoubleQuote
                | TokenKind::Slash
                | TokenKind::Hyphen
                | TokenKind::AtSign
                | TokenKind::LeftCurlyBracket
                | TokenKind::RightCurlyBracket
                | TokenKind::Backtick
                | TokenKind::Period
                | TokenKind::Colon
                | TokenKind::Comma
                | TokenKind::LeftSquareBracket
                | TokenKind::RightSquareBracket
                | TokenKind::Pipe
                | TokenKind::LeftParenthesis
                | TokenKind::RightParenthesis
                | TokenKind::PoundSymbol
                | TokenKind::Plus
                | TokenKind::DollarSign
                | TokenKind::OtherPunctuation
        )
    }

    /// Check if this kind separates words: spacing, a line break, or the
    /// end of the input.
    pub fn is_word_boundary(&self) -> bool {
        matches!(
            self,
            TokenKind::Spacing | TokenKind::Newline | TokenKind::EndOfInput
        )
    }
}

/// A single token: a kind plus the range it covers and the comment line it
/// came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    range: TextRange,
    line: TextRange,
}

impl Token {
    pub fn new(kind: TokenKind, range: TextRange, line: TextRange) -> Self {
        Self { kind, range, line }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The exact characters this token covers. Empty for the synthetic
    /// kinds.
    pub fn range(&self) -> &TextRange {
        &self.range
    }

    /// The full extracted line this token belongs to.
    pub fn line(&self) -> &TextRange {
        &self.line
    }

    pub fn location(&self) -> TextLocation {
        self.range.get_location(self.range.pos())
    }

    /// The token rendered as text. `Newline` renders as `"\n"` even though
    /// its range is zero-width, so concatenating a line's tokens
    /// reconstructs the line with its break.
    pub fn to_string(&self) -> String {
        match self.kind {
            TokenKind::Newline => "\n".to_string(),
            _ => self.range.as_str().to_string(),
        }
    }
}

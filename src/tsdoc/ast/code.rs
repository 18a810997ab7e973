//! Code span and fenced code nodes

use crate::tsdoc::ast::text_content::TextContent;
use crate::tsdoc::parsing::token_sequence::TokenSequence;

/// Inline code delimited by single backticks.
#[derive(Debug, Clone, PartialEq)]
pub struct DocCodeSpan {
    opening: Option<TokenSequence>,
    code: TextContent,
    closing: Option<TokenSequence>,
}

impl DocCodeSpan {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            opening: None,
            code: TextContent::from_literal(code),
            closing: None,
        }
    }

    pub fn from_excerpts(
        opening: TokenSequence,
        code: TokenSequence,
        closing: TokenSequence,
    ) -> Self {
        Self {
            opening: Some(opening),
            code: TextContent::from_excerpt(code),
            closing: Some(closing),
        }
    }

    /// The text between the backticks.
    pub fn code(&self) -> String {
        self.code.text()
    }

    pub fn code_content(&self) -> &TextContent {
        &self.code
    }

    pub fn opening_excerpt(&self) -> Option<&TokenSequence> {
        self.opening.as_ref()
    }

    pub fn closing_excerpt(&self) -> Option<&TokenSequence> {
        self.closing.as_ref()
    }
}

/// A triple-backtick fenced code block with an optional language
/// specifier on the opening fence line.
#[derive(Debug, Clone, PartialEq)]
pub struct DocFencedCode {
    opening_fence: Option<TokenSequence>,
    spacing_after_opening_fence: Option<TokenSequence>,
    language: TextContent,
    spacing_after_language: Option<TokenSequence>,
    code: TextContent,
    spacing_before_closing_fence: Option<TokenSequence>,
    closing_fence: Option<TokenSequence>,
    spacing_after_closing_fence: Option<TokenSequence>,
}

/// The excerpt pieces of a parsed fenced code block, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct FencedCodeExcerpts {
    pub opening_fence: TokenSequence,
    pub spacing_after_opening_fence: Option<TokenSequence>,
    pub language: Option<TokenSequence>,
    pub spacing_after_language: Option<TokenSequence>,
    pub code: TokenSequence,
    pub spacing_before_closing_fence: Option<TokenSequence>,
    pub closing_fence: TokenSequence,
    pub spacing_after_closing_fence: Option<TokenSequence>,
}

impl DocFencedCode {
    pub fn new(language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            opening_fence: None,
            spacing_after_opening_fence: None,
            language: TextContent::from_literal(language),
            spacing_after_language: None,
            code: TextContent::from_literal(code),
            spacing_before_closing_fence: None,
            closing_fence: None,
            spacing_after_closing_fence: None,
        }
    }

    pub fn from_excerpts(excerpts: FencedCodeExcerpts) -> Self {
        let language = match excerpts.language {
            Some(sequence) => TextContent::from_excerpt(sequence),
            None => TextContent::from_literal(""),
        };
        Self {
            opening_fence: Some(excerpts.opening_fence),
            spacing_after_opening_fence: excerpts.spacing_after_opening_fence,
            language,
            spacing_after_language: excerpts.spacing_after_language,
            code: TextContent::from_excerpt(excerpts.code),
            spacing_before_closing_fence: excerpts.spacing_before_closing_fence,
            closing_fence: Some(excerpts.closing_fence),
            spacing_after_closing_fence: excerpts.spacing_after_closing_fence,
        }
    }

    /// The language specifier, or an empty string when none was given.
    pub fn language(&self) -> String {
        self.language.text()
    }

    pub fn language_content(&self) -> &TextContent {
        &self.language
    }

    /// The code lines between the fences, with their line breaks.
    pub fn code(&self) -> String {
        self.code.text()
    }

    pub fn code_content(&self) -> &TextContent {
        &self.code
    }

    pub fn opening_fence_excerpt(&self) -> Option<&TokenSequence> {
        self.opening_fence.as_ref()
    }

    pub fn spacing_after_opening_fence(&self) -> Option<&TokenSequence> {
        self.spacing_after_opening_fence.as_ref()
    }

    pub fn spacing_after_language(&self) -> Option<&TokenSequence> {
        self.spacing_after_language.as_ref()
    }

    pub fn spacing_before_closing_fence(&self) -> Option<&TokenSequence> {
        self.spacing_before_closing_fence.as_ref()
    }

    pub fn closing_fence_excerpt(&self) -> Option<&TokenSequence> {
        self.closing_fence.as_ref()
    }

    pub fn spacing_after_closing_fence(&self) -> Option<&TokenSequence> {
        self.spacing_after_closing_fence.as_ref()
    }
}

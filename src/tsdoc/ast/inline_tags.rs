//! Inline tag nodes
//!
//! The `{@tag ...}` constructs. `{@link}` and `{@inheritDoc}` get their
//! own node types with parsed structure; every other inline tag becomes a
//! generic `DocInlineTag` whose content is kept as raw text.

use crate::tsdoc::ast::text_content::TextContent;
use crate::tsdoc::config::tag_definition::explain_invalid_tag_name;
use crate::tsdoc::declaration_reference::DeclarationReference;
use crate::tsdoc::parsing::token_sequence::TokenSequence;

/// The delimiter and name pieces shared by every inline tag:
/// `{`, `@tag`, the spacing after it, and the closing `}`.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineTagParts {
    opening: Option<TokenSequence>,
    tag_name: String,
    tag_name_with_upper_case: String,
    tag_name_excerpt: Option<TokenSequence>,
    spacing_after_tag_name: Option<TokenSequence>,
    closing: Option<TokenSequence>,
}

impl InlineTagParts {
    /// Programmatic form with no source excerpts. Panics when `tag_name`
    /// is not a valid TSDoc tag name.
    pub fn new(tag_name: &str) -> Self {
        Self::build(tag_name.to_string(), None, None, None, None)
    }

    /// Parsed form carrying the delimiter excerpts.
    pub fn from_excerpts(
        opening: TokenSequence,
        tag_name: String,
        tag_name_excerpt: TokenSequence,
        spacing_after_tag_name: Option<TokenSequence>,
        closing: TokenSequence,
    ) -> Self {
        Self::build(
            tag_name,
            Some(opening),
            Some(tag_name_excerpt),
            spacing_after_tag_name,
            Some(closing),
        )
    }

    fn build(
        tag_name: String,
        opening: Option<TokenSequence>,
        tag_name_excerpt: Option<TokenSequence>,
        spacing_after_tag_name: Option<TokenSequence>,
        closing: Option<TokenSequence>,
    ) -> Self {
        if let Some(explanation) = explain_invalid_tag_name(&tag_name) {
            panic!("invalid TSDoc tag name {tag_name:?}: {explanation}");
        }
        let tag_name_with_upper_case = tag_name.to_uppercase();
        Self {
            opening,
            tag_name,
            tag_name_with_upper_case,
            tag_name_excerpt,
            spacing_after_tag_name,
            closing,
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn tag_name_with_upper_case(&self) -> &str {
        &self.tag_name_with_upper_case
    }

    pub fn opening_excerpt(&self) -> Option<&TokenSequence> {
        self.opening.as_ref()
    }

    pub fn tag_name_excerpt(&self) -> Option<&TokenSequence> {
        self.tag_name_excerpt.as_ref()
    }

    pub fn spacing_after_tag_name(&self) -> Option<&TokenSequence> {
        self.spacing_after_tag_name.as_ref()
    }

    pub fn closing_excerpt(&self) -> Option<&TokenSequence> {
        self.closing.as_ref()
    }
}

/// A generic inline tag: `{@label Overview}`, `{@myTag anything}`.
/// The content after the tag name is not interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct DocInlineTag {
    parts: InlineTagParts,
    tag_content: TextContent,
}

impl DocInlineTag {
    pub fn new(tag_name: &str, tag_content: impl Into<String>) -> Self {
        Self {
            parts: InlineTagParts::new(tag_name),
            tag_content: TextContent::from_literal(tag_content),
        }
    }

    pub fn from_parts(parts: InlineTagParts, tag_content: TextContent) -> Self {
        Self { parts, tag_content }
    }

    pub fn parts(&self) -> &InlineTagParts {
        &self.parts
    }

    pub fn tag_name(&self) -> &str {
        self.parts.tag_name()
    }

    /// The raw text between the tag name and the closing brace.
    pub fn tag_content(&self) -> &TextContent {
        &self.tag_content
    }
}

/// Where a `{@link}` points: a URL, or a declaration reference.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkDestination {
    Url {
        url: String,
        excerpt: Option<TokenSequence>,
    },
    Reference {
        reference: DeclarationReference,
        excerpt: Option<TokenSequence>,
    },
}

impl LinkDestination {
    pub fn from_url(url: impl Into<String>) -> Self {
        LinkDestination::Url {
            url: url.into(),
            excerpt: None,
        }
    }

    pub fn from_reference(reference: DeclarationReference) -> Self {
        LinkDestination::Reference {
            reference,
            excerpt: None,
        }
    }

    pub fn excerpt(&self) -> Option<&TokenSequence> {
        match self {
            LinkDestination::Url { excerpt, .. } => excerpt.as_ref(),
            LinkDestination::Reference { excerpt, .. } => excerpt.as_ref(),
        }
    }
}

/// `{@link destination}` or `{@link destination | link text}`.
#[derive(Debug, Clone, PartialEq)]
pub struct DocLinkTag {
    parts: InlineTagParts,
    destination: Option<LinkDestination>,
    spacing_after_destination: Option<TokenSequence>,
    pipe: Option<TokenSequence>,
    spacing_after_pipe: Option<TokenSequence>,
    link_text: Option<TextContent>,
    spacing_after_link_text: Option<TokenSequence>,
}

impl DocLinkTag {
    pub fn new(destination: LinkDestination, link_text: Option<String>) -> Self {
        Self {
            parts: InlineTagParts::new("@link"),
            destination: Some(destination),
            spacing_after_destination: None,
            pipe: None,
            spacing_after_pipe: None,
            link_text: link_text.map(TextContent::from_literal),
            spacing_after_link_text: None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        parts: InlineTagParts,
        destination: Option<LinkDestination>,
        spacing_after_destination: Option<TokenSequence>,
        pipe: Option<TokenSequence>,
        spacing_after_pipe: Option<TokenSequence>,
        link_text: Option<TextContent>,
        spacing_after_link_text: Option<TokenSequence>,
    ) -> Self {
        Self {
            parts,
            destination,
            spacing_after_destination,
            pipe,
            spacing_after_pipe,
            link_text,
            spacing_after_link_text,
        }
    }

    pub fn parts(&self) -> &InlineTagParts {
        &self.parts
    }

    pub fn destination(&self) -> Option<&LinkDestination> {
        self.destination.as_ref()
    }

    /// The display text after the `|`, when present.
    pub fn link_text(&self) -> Option<&TextContent> {
        self.link_text.as_ref()
    }

    pub fn spacing_after_destination(&self) -> Option<&TokenSequence> {
        self.spacing_after_destination.as_ref()
    }

    pub fn pipe_excerpt(&self) -> Option<&TokenSequence> {
        self.pipe.as_ref()
    }

    pub fn spacing_after_pipe(&self) -> Option<&TokenSequence> {
        self.spacing_after_pipe.as_ref()
    }

    pub fn spacing_after_link_text(&self) -> Option<&TokenSequence> {
        self.spacing_after_link_text.as_ref()
    }
}

/// `{@inheritDoc}` with an optional declaration reference naming the
/// source to copy documentation from.
#[derive(Debug, Clone, PartialEq)]
pub struct DocInheritDocTag {
    parts: InlineTagParts,
    declaration_reference: Option<DeclarationReference>,
    reference_excerpt: Option<TokenSequence>,
}

impl DocInheritDocTag {
    pub fn new(declaration_reference: Option<DeclarationReference>) -> Self {
        Self {
            parts: InlineTagParts::new("@inheritDoc"),
            declaration_reference,
            reference_excerpt: None,
        }
    }

    pub fn from_parts(
        parts: InlineTagParts,
        declaration_reference: Option<DeclarationReference>,
        reference_excerpt: Option<TokenSequence>,
    ) -> Self {
        Self {
            parts,
            declaration_reference,
            reference_excerpt,
        }
    }

    pub fn parts(&self) -> &InlineTagParts {
        &self.parts
    }

    pub fn declaration_reference(&self) -> Option<&DeclarationReference> {
        self.declaration_reference.as_ref()
    }

    pub fn reference_excerpt(&self) -> Option<&TokenSequence> {
        self.reference_excerpt.as_ref()
    }
}

//! Tag-owned blocks
//!
//! A block tag such as `@remarks` opens a block: the tag itself plus all
//! of the content up to the next block tag. `@param` and `@typeParam`
//! blocks additionally carry the parsed parameter name and the excerpts
//! of the `name - description` syntax around it.

use crate::tsdoc::ast::block_tag::DocBlockTag;
use crate::tsdoc::ast::sections::DocSection;
use crate::tsdoc::parsing::token_sequence::TokenSequence;

/// A block tag together with its content section.
#[derive(Debug, Clone, PartialEq)]
pub struct DocBlock {
    block_tag: DocBlockTag,
    content: DocSection,
}

impl DocBlock {
    pub fn new(block_tag: DocBlockTag) -> Self {
        Self {
            block_tag,
            content: DocSection::new(),
        }
    }

    pub fn block_tag(&self) -> &DocBlockTag {
        &self.block_tag
    }

    pub fn content(&self) -> &DocSection {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut DocSection {
        &mut self.content
    }
}

/// Excerpts captured while parsing the `name - description` syntax of a
/// parameter block. All fields are optional; a malformed block keeps the
/// pieces that were recognized before the parse gave up.
#[derive(Debug, Clone, Default)]
pub struct ParamBlockParts {
    pub spacing_before_parameter_name: Option<TokenSequence>,
    pub unsupported_jsdoc_type: Option<TokenSequence>,
    pub parameter_name: String,
    pub parameter_name_excerpt: Option<TokenSequence>,
    pub spacing_after_parameter_name: Option<TokenSequence>,
    pub hyphen: Option<TokenSequence>,
    pub spacing_after_hyphen: Option<TokenSequence>,
}

/// A `@param` or `@typeParam` block: the tag, the parameter name, and the
/// description content.
#[derive(Debug, Clone, PartialEq)]
pub struct DocParamBlock {
    block_tag: DocBlockTag,
    spacing_before_parameter_name: Option<TokenSequence>,
    unsupported_jsdoc_type: Option<TokenSequence>,
    parameter_name: String,
    parameter_name_excerpt: Option<TokenSequence>,
    spacing_after_parameter_name: Option<TokenSequence>,
    hyphen: Option<TokenSequence>,
    spacing_after_hyphen: Option<TokenSequence>,
    content: DocSection,
}

impl DocParamBlock {
    pub fn new(block_tag: DocBlockTag, parameter_name: impl Into<String>) -> Self {
        Self::from_parts(
            block_tag,
            ParamBlockParts {
                parameter_name: parameter_name.into(),
                ..ParamBlockParts::default()
            },
        )
    }

    pub fn from_parts(block_tag: DocBlockTag, parts: ParamBlockParts) -> Self {
        Self {
            block_tag,
            spacing_before_parameter_name: parts.spacing_before_parameter_name,
            unsupported_jsdoc_type: parts.unsupported_jsdoc_type,
            parameter_name: parts.parameter_name,
            parameter_name_excerpt: parts.parameter_name_excerpt,
            spacing_after_parameter_name: parts.spacing_after_parameter_name,
            hyphen: parts.hyphen,
            spacing_after_hyphen: parts.spacing_after_hyphen,
            content: DocSection::new(),
        }
    }

    pub fn block_tag(&self) -> &DocBlockTag {
        &self.block_tag
    }

    /// The parameter name, or the empty string when the `name - description`
    /// syntax could not be parsed.
    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    pub fn spacing_before_parameter_name_excerpt(&self) -> Option<&TokenSequence> {
        self.spacing_before_parameter_name.as_ref()
    }

    /// The tokens of a JSDoc-style `{type}` annotation, including any
    /// spacing that followed it. The annotation is not part of the TSDoc
    /// grammar and is reported as an error, but the tokens are retained.
    pub fn unsupported_jsdoc_type_excerpt(&self) -> Option<&TokenSequence> {
        self.unsupported_jsdoc_type.as_ref()
    }

    pub fn parameter_name_excerpt(&self) -> Option<&TokenSequence> {
        self.parameter_name_excerpt.as_ref()
    }

    pub fn spacing_after_parameter_name_excerpt(&self) -> Option<&TokenSequence> {
        self.spacing_after_parameter_name.as_ref()
    }

    pub fn hyphen_excerpt(&self) -> Option<&TokenSequence> {
        self.hyphen.as_ref()
    }

    pub fn spacing_after_hyphen_excerpt(&self) -> Option<&TokenSequence> {
        self.spacing_after_hyphen.as_ref()
    }

    pub fn content(&self) -> &DocSection {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut DocSection {
        &mut self.content
    }
}

/// The ordered `@param` (or `@typeParam`) blocks of one comment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocParamCollection {
    blocks: Vec<DocParamBlock>,
}

impl DocParamCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, block: DocParamBlock) {
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[DocParamBlock] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [DocParamBlock] {
        &mut self.blocks
    }

    pub fn count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Find the first block whose parameter name matches exactly.
    pub fn try_get_block_by_name(&self, parameter_name: &str) -> Option<&DocParamBlock> {
        self.blocks
            .iter()
            .find(|block| block.parameter_name() == parameter_name)
    }
}

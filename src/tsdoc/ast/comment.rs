//! The root of a parsed doc comment
//!
//! All of the classified pieces of one `/** ... */` comment. Fields are
//! public: the comment is assembled once by the parser and then read (or
//! built up programmatically) by callers.

use crate::tsdoc::ast::blocks::{DocBlock, DocParamCollection};
use crate::tsdoc::ast::inline_tags::DocInheritDocTag;
use crate::tsdoc::ast::modifier_tag_set::StandardModifierTagSet;
use crate::tsdoc::ast::node::{
    walk_block, walk_block_tag, walk_inherit_doc_tag, walk_param_block, walk_section,
};
use crate::tsdoc::ast::sections::DocSection;
use crate::tsdoc::parsing::token_sequence::TokenSequence;
use crate::tsdoc::text::TextRange;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocComment {
    /// Content that appeared before the first block tag.
    pub summary_section: DocSection,
    pub remarks_block: Option<DocBlock>,
    pub private_remarks: Option<DocBlock>,
    pub deprecated_block: Option<DocBlock>,
    pub params: DocParamCollection,
    pub type_params: DocParamCollection,
    pub returns_block: Option<DocBlock>,
    pub see_blocks: Vec<DocBlock>,
    /// Blocks whose tag is defined by the configuration but has no
    /// dedicated field above, in source order.
    pub custom_blocks: Vec<DocBlock>,
    pub inherit_doc_tag: Option<DocInheritDocTag>,
    pub modifier_tag_set: StandardModifierTagSet,
    /// The content of each comment line, with delimiters and leading
    /// asterisks removed.
    pub lines: Vec<TextRange>,
}

impl DocComment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the comment back to `/** ... */` source text in normalized
    /// form.
    pub fn emit_as_tsdoc(&self) -> String {
        crate::tsdoc::emit::tsdoc_emitter::TsdocEmitter::new().render_comment(self)
    }

    /// Invoke `callback` for every excerpt in the comment.
    pub fn for_each_excerpt(&self, callback: &mut dyn FnMut(&TokenSequence)) {
        walk_section(&self.summary_section, callback);
        for block in [
            &self.remarks_block,
            &self.private_remarks,
            &self.deprecated_block,
        ]
        .into_iter()
        .flatten()
        {
            walk_block(block, callback);
        }
        for block in self.params.blocks() {
            walk_param_block(block, callback);
        }
        for block in self.type_params.blocks() {
            walk_param_block(block, callback);
        }
        if let Some(block) = &self.returns_block {
            walk_block(block, callback);
        }
        for block in &self.see_blocks {
            walk_block(block, callback);
        }
        for block in &self.custom_blocks {
            walk_block(block, callback);
        }
        if let Some(tag) = &self.inherit_doc_tag {
            walk_inherit_doc_tag(tag, callback);
        }
        for tag in self.modifier_tag_set.nodes() {
            walk_block_tag(tag, callback);
        }
    }
}

//! Doc comment AST
//!
//! The node types produced by the parser and consumed by the emitter.
//! `DocComment` is the root; it owns the summary section, the classified
//! blocks, and the modifier tag set. Content positions hold `DocNode`
//! values, and `DocNodeVisitor` walks a tree in preorder.
//!
//! Nodes parsed from source carry excerpts: token sequences that tie each
//! piece of the tree back to the exact input characters it came from.
//! Nodes can also be built programmatically, in which case their text is
//! stored as plain strings and no excerpts exist.

pub mod block_tag;
pub mod blocks;
pub mod code;
pub mod comment;
pub mod inline_tags;
pub mod modifier_tag_set;
pub mod node;
pub mod sections;
pub mod text_content;
pub mod text_nodes;
pub mod visitor;
pub mod xml;

pub use block_tag::DocBlockTag;
pub use blocks::{DocBlock, DocParamBlock, DocParamCollection, ParamBlockParts};
pub use code::{DocCodeSpan, DocFencedCode, FencedCodeExcerpts};
pub use comment::DocComment;
pub use inline_tags::{
    DocInheritDocTag, DocInlineTag, DocLinkTag, InlineTagParts, LinkDestination,
};
pub use modifier_tag_set::{ModifierTagSet, StandardModifierTagSet};
pub use node::{DocCustomNode, DocNode, DocNodeKind, ALL_DOC_NODE_KINDS};
pub use sections::{DocParagraph, DocSection};
pub use text_content::TextContent;
pub use text_nodes::{DocErrorText, DocEscapedText, DocPlainText, DocSoftBreak};
pub use visitor::{visit_children, AstNode, DocNodeVisitor};
pub use xml::{DocXmlAttribute, DocXmlElement, DocXmlEndTag, DocXmlStartTag};

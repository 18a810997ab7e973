//! Block tag node

use crate::tsdoc::config::tag_definition::explain_invalid_tag_name;
use crate::tsdoc::parsing::token_sequence::TokenSequence;

/// A block tag such as `@remarks`, as written in the source. Tag names
/// keep their original casing; matching against definitions uses the
/// upper-cased form.
#[derive(Debug, Clone, PartialEq)]
pub struct DocBlockTag {
    tag_name: String,
    tag_name_with_upper_case: String,
    excerpt: Option<TokenSequence>,
}

impl DocBlockTag {
    /// A programmatic block tag. Panics when `tag_name` is not a valid
    /// TSDoc tag name; passing one is a caller bug, not an input error.
    pub fn new(tag_name: &str) -> Self {
        Self::build(tag_name.to_string(), None)
    }

    /// A block tag backed by its source excerpt.
    pub fn from_excerpt(tag_name: String, excerpt: TokenSequence) -> Self {
        Self::build(tag_name, Some(excerpt))
    }

    fn build(tag_name: String, excerpt: Option<TokenSequence>) -> Self {
        if let Some(explanation) = explain_invalid_tag_name(&tag_name) {
            panic!("invalid TSDoc tag name {tag_name:?}: {explanation}");
        }
        let tag_name_with_upper_case = tag_name.to_uppercase();
        Self {
            tag_name,
            tag_name_with_upper_case,
            excerpt,
        }
    }

    /// The tag name including the `@`, with the casing from the source.
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// The canonical upper-cased form used for lookups.
    pub fn tag_name_with_upper_case(&self) -> &str {
        &self.tag_name_with_upper_case
    }

    pub fn excerpt(&self) -> Option<&TokenSequence> {
        self.excerpt.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_case_form() {
        let tag = DocBlockTag::new("@typeParam");
        assert_eq!(tag.tag_name(), "@typeParam");
        assert_eq!(tag.tag_name_with_upper_case(), "@TYPEPARAM");
    }

    #[test]
    #[should_panic(expected = "invalid TSDoc tag name")]
    fn test_invalid_name_panics() {
        let _ = DocBlockTag::new("remarks");
    }
}

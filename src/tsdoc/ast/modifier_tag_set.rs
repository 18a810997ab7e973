//! Modifier tag collection
//!
//! Modifier tags such as `@public` or `@readonly` carry no content; the
//! comment simply has them or not. Lookup is by the upper-cased tag name
//! so `@ALPHA` and `@alpha` refer to the same tag.

use crate::tsdoc::ast::block_tag::DocBlockTag;
use crate::tsdoc::config::standard_tags;
use crate::tsdoc::config::tag_definition::TsdocTagDefinition;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModifierTagSet {
    nodes: Vec<DocBlockTag>,
}

impl ModifierTagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tag nodes in the order they were added.
    pub fn nodes(&self) -> &[DocBlockTag] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a tag to the set. Returns `false` if an equivalent tag was
    /// already present, in which case the set is unchanged.
    pub fn add_tag(&mut self, tag: DocBlockTag) -> bool {
        if self.has_tag_name(tag.tag_name()) {
            return false;
        }
        self.nodes.push(tag);
        true
    }

    pub fn has_tag(&self, definition: &TsdocTagDefinition) -> bool {
        self.has_upper_case(definition.tag_name_with_upper_case())
    }

    /// Case-insensitive membership test for a `@tagName` string.
    pub fn has_tag_name(&self, tag_name: &str) -> bool {
        self.has_upper_case(&tag_name.to_uppercase())
    }

    pub fn try_get_tag(&self, definition: &TsdocTagDefinition) -> Option<&DocBlockTag> {
        let upper = definition.tag_name_with_upper_case();
        self.nodes
            .iter()
            .find(|tag| tag.tag_name_with_upper_case() == upper)
    }

    fn has_upper_case(&self, tag_name_with_upper_case: &str) -> bool {
        self.nodes
            .iter()
            .any(|tag| tag.tag_name_with_upper_case() == tag_name_with_upper_case)
    }
}

/// A modifier tag set with convenience accessors for the standard
/// modifiers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StandardModifierTagSet {
    inner: ModifierTagSet,
}

impl StandardModifierTagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[DocBlockTag] {
        self.inner.nodes()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn add_tag(&mut self, tag: DocBlockTag) -> bool {
        self.inner.add_tag(tag)
    }

    pub fn has_tag(&self, definition: &TsdocTagDefinition) -> bool {
        self.inner.has_tag(definition)
    }

    pub fn has_tag_name(&self, tag_name: &str) -> bool {
        self.inner.has_tag_name(tag_name)
    }

    pub fn try_get_tag(&self, definition: &TsdocTagDefinition) -> Option<&DocBlockTag> {
        self.inner.try_get_tag(definition)
    }

    pub fn is_alpha(&self) -> bool {
        self.inner.has_tag(standard_tags::alpha())
    }

    pub fn is_beta(&self) -> bool {
        self.inner.has_tag(standard_tags::beta())
    }

    pub fn is_experimental(&self) -> bool {
        self.inner.has_tag(standard_tags::experimental())
    }

    pub fn is_internal(&self) -> bool {
        self.inner.has_tag(standard_tags::internal())
    }

    pub fn is_override(&self) -> bool {
        self.inner.has_tag(standard_tags::override_tag())
    }

    pub fn is_package_documentation(&self) -> bool {
        self.inner.has_tag(standard_tags::package_documentation())
    }

    pub fn is_public(&self) -> bool {
        self.inner.has_tag(standard_tags::public())
    }

    pub fn is_readonly(&self) -> bool {
        self.inner.has_tag(standard_tags::readonly())
    }

    pub fn is_sealed(&self) -> bool {
        self.inner.has_tag(standard_tags::sealed())
    }

    pub fn is_virtual(&self) -> bool {
        self.inner.has_tag(standard_tags::virtual_tag())
    }

    pub fn is_event_property(&self) -> bool {
        self.inner.has_tag(standard_tags::event_property())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_tag_is_case_insensitive_and_idempotent() {
        let mut set = ModifierTagSet::new();
        assert!(set.add_tag(DocBlockTag::new("@alpha")));
        assert!(!set.add_tag(DocBlockTag::new("@ALPHA")));
        assert_eq!(set.nodes().len(), 1);
        assert!(set.has_tag_name("@Alpha"));
        assert!(!set.has_tag_name("@beta"));
    }

    #[test]
    fn standard_accessors_reflect_added_tags() {
        let mut set = StandardModifierTagSet::new();
        set.add_tag(DocBlockTag::new("@readonly"));
        assert!(set.is_readonly());
        assert!(!set.is_public());
        assert!(!set.is_sealed());
    }
}

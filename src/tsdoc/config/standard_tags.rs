//! The standard tag table
//!
//! Every tag in the TSDoc standard, grouped by standardization level:
//! Core tags are part of the baseline grammar, Extended tags are optional
//! but have fixed meanings, and Discretionary tags have tool-defined
//! semantics. The default configuration registers all of them.

use once_cell::sync::Lazy;

use crate::tsdoc::config::tag_definition::{
    Standardization, TsdocTagDefinition, TsdocTagSyntaxKind,
};

macro_rules! standard_tag {
    ($static_name:ident, $accessor:ident, $tag_name:literal, $syntax:ident, $std:ident) => {
        static $static_name: Lazy<TsdocTagDefinition> = Lazy::new(|| {
            TsdocTagDefinition::new($tag_name, TsdocTagSyntaxKind::$syntax)
                .with_standardization(Standardization::$std)
        });

        pub fn $accessor() -> &'static TsdocTagDefinition {
            &$static_name
        }
    };
    ($static_name:ident, $accessor:ident, $tag_name:literal, $syntax:ident, $std:ident, multiple) => {
        static $static_name: Lazy<TsdocTagDefinition> = Lazy::new(|| {
            TsdocTagDefinition::new($tag_name, TsdocTagSyntaxKind::$syntax)
                .with_standardization(Standardization::$std)
                .with_allow_multiple()
        });

        pub fn $accessor() -> &'static TsdocTagDefinition {
            &$static_name
        }
    };
}

standard_tag!(ALPHA, alpha, "@alpha", ModifierTag, Discretionary);
standard_tag!(BETA, beta, "@beta", ModifierTag, Discretionary);
standard_tag!(DECORATOR, decorator, "@decorator", BlockTag, Extended, multiple);
standard_tag!(DEFAULT_VALUE, default_value, "@defaultValue", BlockTag, Extended);
standard_tag!(DEPRECATED, deprecated, "@deprecated", BlockTag, Core);
standard_tag!(EVENT_PROPERTY, event_property, "@eventProperty", ModifierTag, Extended);
standard_tag!(EXAMPLE, example, "@example", BlockTag, Extended, multiple);
standard_tag!(EXPERIMENTAL, experimental, "@experimental", ModifierTag, Discretionary);
standard_tag!(INHERIT_DOC, inherit_doc, "@inheritDoc", InlineTag, Extended);
standard_tag!(INTERNAL, internal, "@internal", ModifierTag, Discretionary);
standard_tag!(LABEL, label, "@label", InlineTag, Core);
standard_tag!(LINK, link, "@link", InlineTag, Core, multiple);
standard_tag!(OVERRIDE, override_tag, "@override", ModifierTag, Extended);
standard_tag!(PACKAGE_DOCUMENTATION, package_documentation, "@packageDocumentation", ModifierTag, Core);
standard_tag!(PARAM, param, "@param", BlockTag, Core, multiple);
standard_tag!(PRIVATE_REMARKS, private_remarks, "@privateRemarks", BlockTag, Core);
standard_tag!(PUBLIC, public, "@public", ModifierTag, Discretionary);
standard_tag!(READONLY, readonly, "@readonly", ModifierTag, Extended);
standard_tag!(REMARKS, remarks, "@remarks", BlockTag, Core);
standard_tag!(RETURNS, returns, "@returns", BlockTag, Core);
standard_tag!(SEALED, sealed, "@sealed", ModifierTag, Extended);
standard_tag!(SEE, see, "@see", BlockTag, Extended, multiple);
standard_tag!(THROWS, throws, "@throws", BlockTag, Extended, multiple);
standard_tag!(TYPE_PARAM, type_param, "@typeParam", BlockTag, Core, multiple);
standard_tag!(VIRTUAL, virtual_tag, "@virtual", ModifierTag, Extended);

static ALL_DEFINITIONS: Lazy<Vec<&'static TsdocTagDefinition>> = Lazy::new(|| {
    vec![
        alpha(),
        beta(),
        decorator(),
        default_value(),
        deprecated(),
        event_property(),
        example(),
        experimental(),
        inherit_doc(),
        internal(),
        label(),
        link(),
        override_tag(),
        package_documentation(),
        param(),
        private_remarks(),
        public(),
        readonly(),
        remarks(),
        returns(),
        sealed(),
        see(),
        throws(),
        type_param(),
        virtual_tag(),
    ]
});

/// All standard definitions, in alphabetical order.
pub fn all_definitions() -> &'static [&'static TsdocTagDefinition] {
    &ALL_DEFINITIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_complete_and_distinct() {
        let definitions = all_definitions();
        assert_eq!(definitions.len(), 25);
        let mut names: Vec<&str> = definitions
            .iter()
            .map(|d| d.tag_name_with_upper_case())
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 25);
    }

    #[test]
    fn core_tags_have_expected_syntax() {
        assert_eq!(param().syntax_kind(), TsdocTagSyntaxKind::BlockTag);
        assert!(param().allow_multiple());
        assert_eq!(link().syntax_kind(), TsdocTagSyntaxKind::InlineTag);
        assert_eq!(public().syntax_kind(), TsdocTagSyntaxKind::ModifierTag);
        assert_eq!(remarks().standardization(), Standardization::Core);
        assert_eq!(see().standardization(), Standardization::Extended);
    }
}

//! Stable message identifiers
//!
//! Every diagnostic the parser can report has a stable kebab-case string id.
//! Tools match on these strings to classify or suppress diagnostics, so the
//! set is closed and the string forms never change. The `tsdoc-config-*`
//! group is reserved for external configuration loaders that share this id
//! space; the parser itself never logs them.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Unique identifiers for the diagnostics reported by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TsdocMessageId {
    // Configuration loading (reserved for external loaders)
    ConfigFileNotFound,
    ConfigInvalidJson,
    ConfigFileUnsupportedSchema,
    ConfigFileSchemaError,
    ConfigFileCyclicExtends,
    ConfigFileUnresolvedExtends,
    ConfigFileUndefinedTag,
    ConfigFileDuplicateTagName,
    ConfigFileInvalidTagName,

    // Comment framing
    CommentNotFound,
    CommentOpeningDelimiterSyntax,
    CommentMissingClosingDelimiter,

    // Escapes
    UnnecessaryBackslash,
    EscapeRightBrace,
    EscapeGreaterThan,

    // Block tags
    AtSignInWord,
    AtSignWithoutTagName,
    MalformedTagName,
    CharactersAfterBlockTag,

    // Inline tags
    MalformedInlineTag,
    CharactersAfterInlineTag,
    InlineTagMissingRightBrace,
    InlineTagUnescapedBrace,

    // {@link}
    LinkTagEmpty,
    LinkTagInvalidUrl,
    LinkTagDestinationSyntax,
    LinkTagUnescapedText,

    // {@inheritDoc}
    InheritDocTagSyntax,
    ExtraInheritDocTag,
    InheritDocIncompatibleSummary,
    InheritDocIncompatibleTag,

    // XML elements
    MalformedXmlName,
    XmlTagMissingEquals,
    XmlTagMissingString,
    XmlStringMissingQuote,
    TextAfterXmlString,
    XmlTagMissingGreaterThan,
    XmlTagNameMismatch,
    UnsupportedXmlElement,

    // Code spans and fences
    CodeSpanEmpty,
    CodeSpanMissingDelimiter,
    CodeFenceOpeningIndent,
    CodeFenceSpecifierSyntax,
    CodeFenceClosingIndent,
    CodeFenceClosingSyntax,
    CodeFenceMissingDelimiter,

    // Tag classification and blocks
    UndefinedTag,
    UnsupportedTag,
    InlineTagMissingBraces,
    TagShouldNotHaveBraces,
    DuplicateBlockTag,
    MissingDeprecationMessage,
    ParamTagWithInvalidType,
    ParamTagWithInvalidOptionalName,
    ParamTagWithInvalidName,
    ParamTagMissingHyphen,

    // Declaration references
    ReferenceSyntax,
    ReferenceEmpty,
    ReferenceEmptyComponent,
    ReferenceMissingQuote,
    ReferenceInvalidEscape,
    ReferenceMissingRightBracket,
    ReferenceMissingRightParenthesis,
    ReferenceUnknownMeaning,
    ReferenceInvalidOverloadIndex,
    ReferenceTrailingCharacters,
}

/// All message ids, in catalog order.
pub const ALL_TSDOC_MESSAGE_IDS: &[TsdocMessageId] = &[
    TsdocMessageId::ConfigFileNotFound,
    TsdocMessageId::ConfigInvalidJson,
    TsdocMessageId::ConfigFileUnsupportedSchema,
    TsdocMessageId::ConfigFileSchemaError,
    TsdocMessageId::ConfigFileCyclicExtends,
    TsdocMessageId::ConfigFileUnresolvedExtends,
    TsdocMessageId::ConfigFileUndefinedTag,
    TsdocMessageId::ConfigFileDuplicateTagName,
    TsdocMessageId::ConfigFileInvalidTagName,
    TsdocMessageId::CommentNotFound,
    TsdocMessageId::CommentOpeningDelimiterSyntax,
    TsdocMessageId::CommentMissingClosingDelimiter,
    TsdocMessageId::UnnecessaryBackslash,
    TsdocMessageId::EscapeRightBrace,
    TsdocMessageId::EscapeGreaterThan,
    TsdocMessageId::AtSignInWord,
    TsdocMessageId::AtSignWithoutTagName,
    TsdocMessageId::MalformedTagName,
    TsdocMessageId::CharactersAfterBlockTag,
    TsdocMessageId::MalformedInlineTag,
    TsdocMessageId::CharactersAfterInlineTag,
    TsdocMessageId::InlineTagMissingRightBrace,
    TsdocMessageId::InlineTagUnescapedBrace,
    TsdocMessageId::LinkTagEmpty,
    TsdocMessageId::LinkTagInvalidUrl,
    TsdocMessageId::LinkTagDestinationSyntax,
    TsdocMessageId::LinkTagUnescapedText,
    TsdocMessageId::InheritDocTagSyntax,
    TsdocMessageId::ExtraInheritDocTag,
    TsdocMessageId::InheritDocIncompatibleSummary,
    TsdocMessageId::InheritDocIncompatibleTag,
    TsdocMessageId::MalformedXmlName,
    TsdocMessageId::XmlTagMissingEquals,
    TsdocMessageId::XmlTagMissingString,
    TsdocMessageId::XmlStringMissingQuote,
    TsdocMessageId::TextAfterXmlString,
    TsdocMessageId::XmlTagMissingGreaterThan,
    TsdocMessageId::XmlTagNameMismatch,
    TsdocMessageId::UnsupportedXmlElement,
    TsdocMessageId::CodeSpanEmpty,
    TsdocMessageId::CodeSpanMissingDelimiter,
    TsdocMessageId::CodeFenceOpeningIndent,
    TsdocMessageId::CodeFenceSpecifierSyntax,
    TsdocMessageId::CodeFenceClosingIndent,
    TsdocMessageId::CodeFenceClosingSyntax,
    TsdocMessageId::CodeFenceMissingDelimiter,
    TsdocMessageId::UndefinedTag,
    TsdocMessageId::UnsupportedTag,
    TsdocMessageId::InlineTagMissingBraces,
    TsdocMessageId::TagShouldNotHaveBraces,
    TsdocMessageId::DuplicateBlockTag,
    TsdocMessageId::MissingDeprecationMessage,
    TsdocMessageId::ParamTagWithInvalidType,
    TsdocMessageId::ParamTagWithInvalidOptionalName,
    TsdocMessageId::ParamTagWithInvalidName,
    TsdocMessageId::ParamTagMissingHyphen,
    TsdocMessageId::ReferenceSyntax,
    TsdocMessageId::ReferenceEmpty,
    TsdocMessageId::ReferenceEmptyComponent,
    TsdocMessageId::ReferenceMissingQuote,
    TsdocMessageId::ReferenceInvalidEscape,
    TsdocMessageId::ReferenceMissingRightBracket,
    TsdocMessageId::ReferenceMissingRightParenthesis,
    TsdocMessageId::ReferenceUnknownMeaning,
    TsdocMessageId::ReferenceInvalidOverloadIndex,
    TsdocMessageId::ReferenceTrailingCharacters,
];

impl TsdocMessageId {
    /// The stable string form of this id.
    pub fn as_str(&self) -> &'static str {
        match self {
            TsdocMessageId::ConfigFileNotFound => "tsdoc-config-file-not-found",
            TsdocMessageId::ConfigInvalidJson => "tsdoc-config-invalid-json",
            TsdocMessageId::ConfigFileUnsupportedSchema => "tsdoc-config-unsupported-schema",
            TsdocMessageId::ConfigFileSchemaError => "tsdoc-config-schema-error",
            TsdocMessageId::ConfigFileCyclicExtends => "tsdoc-config-cyclic-extends",
            TsdocMessageId::ConfigFileUnresolvedExtends => "tsdoc-config-unresolved-extends",
            TsdocMessageId::ConfigFileUndefinedTag => "tsdoc-config-undefined-tag",
            TsdocMessageId::ConfigFileDuplicateTagName => "tsdoc-config-duplicate-tag-name",
            TsdocMessageId::ConfigFileInvalidTagName => "tsdoc-config-invalid-tag-name",
            TsdocMessageId::CommentNotFound => "tsdoc-comment-not-found",
            TsdocMessageId::CommentOpeningDelimiterSyntax => {
                "tsdoc-comment-missing-opening-delimiter"
            }
            TsdocMessageId::CommentMissingClosingDelimiter => {
                "tsdoc-comment-missing-closing-delimiter"
            }
            TsdocMessageId::UnnecessaryBackslash => "tsdoc-unnecessary-backslash",
            TsdocMessageId::EscapeRightBrace => "tsdoc-escape-right-brace",
            TsdocMessageId::EscapeGreaterThan => "tsdoc-escape-greater-than",
            TsdocMessageId::AtSignInWord => "tsdoc-at-sign-in-word",
            TsdocMessageId::AtSignWithoutTagName => "tsdoc-at-sign-without-tag-name",
            TsdocMessageId::MalformedTagName => "tsdoc-malformed-tag-name",
            TsdocMessageId::CharactersAfterBlockTag => "tsdoc-characters-after-block-tag",
            TsdocMessageId::MalformedInlineTag => "tsdoc-malformed-inline-tag",
            TsdocMessageId::CharactersAfterInlineTag => "tsdoc-characters-after-inline-tag",
            TsdocMessageId::InlineTagMissingRightBrace => "tsdoc-inline-tag-missing-right-brace",
            TsdocMessageId::InlineTagUnescapedBrace => "tsdoc-inline-tag-unescaped-brace",
            TsdocMessageId::LinkTagEmpty => "tsdoc-link-tag-empty",
            TsdocMessageId::LinkTagInvalidUrl => "tsdoc-link-tag-invalid-url",
            TsdocMessageId::LinkTagDestinationSyntax => "tsdoc-link-tag-destination-syntax",
            TsdocMessageId::LinkTagUnescapedText => "tsdoc-link-tag-unescaped-text",
            TsdocMessageId::InheritDocTagSyntax => "tsdoc-inheritdoc-tag-syntax",
            TsdocMessageId::ExtraInheritDocTag => "tsdoc-extra-inheritdoc-tag",
            TsdocMessageId::InheritDocIncompatibleSummary => {
                "tsdoc-inheritdoc-incompatible-summary"
            }
            TsdocMessageId::InheritDocIncompatibleTag => "tsdoc-inheritdoc-incompatible-tag",
            TsdocMessageId::MalformedXmlName => "tsdoc-malformed-xml-name",
            TsdocMessageId::XmlTagMissingEquals => "tsdoc-xml-tag-missing-equals",
            TsdocMessageId::XmlTagMissingString => "tsdoc-xml-tag-missing-string",
            TsdocMessageId::XmlStringMissingQuote => "tsdoc-xml-string-missing-quote",
            TsdocMessageId::TextAfterXmlString => "tsdoc-text-after-xml-string",
            TsdocMessageId::XmlTagMissingGreaterThan => "tsdoc-xml-tag-missing-greater-than",
            TsdocMessageId::XmlTagNameMismatch => "tsdoc-xml-tag-name-mismatch",
            TsdocMessageId::UnsupportedXmlElement => "tsdoc-unsupported-xml-element",
            TsdocMessageId::CodeSpanEmpty => "tsdoc-code-span-empty",
            TsdocMessageId::CodeSpanMissingDelimiter => "tsdoc-code-span-missing-delimiter",
            TsdocMessageId::CodeFenceOpeningIndent => "tsdoc-code-fence-opening-indent",
            TsdocMessageId::CodeFenceSpecifierSyntax => "tsdoc-code-fence-specifier-syntax",
            TsdocMessageId::CodeFenceClosingIndent => "tsdoc-code-fence-closing-indent",
            TsdocMessageId::CodeFenceClosingSyntax => "tsdoc-code-fence-closing-syntax",
            TsdocMessageId::CodeFenceMissingDelimiter => "tsdoc-code-fence-missing-delimiter",
            TsdocMessageId::UndefinedTag => "tsdoc-undefined-tag",
            TsdocMessageId::UnsupportedTag => "tsdoc-unsupported-tag",
            TsdocMessageId::InlineTagMissingBraces => "tsdoc-inline-tag-missing-braces",
            TsdocMessageId::TagShouldNotHaveBraces => "tsdoc-tag-should-not-have-braces",
            TsdocMessageId::DuplicateBlockTag => "tsdoc-duplicate-block-tag",
            TsdocMessageId::MissingDeprecationMessage => "tsdoc-missing-deprecation-message",
            TsdocMessageId::ParamTagWithInvalidType => "tsdoc-param-tag-with-invalid-type",
            TsdocMessageId::ParamTagWithInvalidOptionalName => {
                "tsdoc-param-tag-with-invalid-optional-name"
            }
            TsdocMessageId::ParamTagWithInvalidName => "tsdoc-param-tag-with-invalid-name",
            TsdocMessageId::ParamTagMissingHyphen => "tsdoc-param-tag-missing-hyphen",
            TsdocMessageId::ReferenceSyntax => "tsdoc-reference-syntax",
            TsdocMessageId::ReferenceEmpty => "tsdoc-reference-empty",
            TsdocMessageId::ReferenceEmptyComponent => "tsdoc-reference-empty-component",
            TsdocMessageId::ReferenceMissingQuote => "tsdoc-reference-missing-quote",
            TsdocMessageId::ReferenceInvalidEscape => "tsdoc-reference-invalid-escape",
            TsdocMessageId::ReferenceMissingRightBracket => "tsdoc-reference-missing-right-bracket",
            TsdocMessageId::ReferenceMissingRightParenthesis => {
                "tsdoc-reference-missing-right-parenthesis"
            }
            TsdocMessageId::ReferenceUnknownMeaning => "tsdoc-reference-unknown-meaning",
            TsdocMessageId::ReferenceInvalidOverloadIndex => {
                "tsdoc-reference-invalid-overload-index"
            }
            TsdocMessageId::ReferenceTrailingCharacters => "tsdoc-reference-trailing-characters",
        }
    }
}

impl fmt::Display for TsdocMessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known message id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMessageIdError {
    pub text: String,
}

impl fmt::Display for UnknownMessageIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown TSDoc message id: {}", self.text)
    }
}

impl std::error::Error for UnknownMessageIdError {}

impl FromStr for TsdocMessageId {
    type Err = UnknownMessageIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_TSDOC_MESSAGE_IDS
            .iter()
            .find(|id| id.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownMessageIdError {
                text: s.to_string(),
            })
    }
}

impl Serialize for TsdocMessageId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_string_forms_round_trip() {
        for id in ALL_TSDOC_MESSAGE_IDS {
            let parsed: TsdocMessageId = id.as_str().parse().unwrap();
            assert_eq!(parsed, *id);
        }
    }

    #[test]
    fn test_string_forms_are_unique_kebab_case() {
        let mut seen = HashSet::new();
        for id in ALL_TSDOC_MESSAGE_IDS {
            let text = id.as_str();
            assert!(seen.insert(text), "duplicate id string: {text}");
            assert!(text.starts_with("tsdoc-"));
            assert!(text
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        let error = "tsdoc-no-such-id".parse::<TsdocMessageId>().unwrap_err();
        assert_eq!(error.text, "tsdoc-no-such-id");
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&TsdocMessageId::CodeSpanMissingDelimiter).unwrap();
        assert_eq!(json, "\"tsdoc-code-span-missing-delimiter\"");
    }
}

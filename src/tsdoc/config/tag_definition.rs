//! Tag definitions
//!
//! A `TsdocTagDefinition` describes one `@tagName`: its syntax kind
//! (inline, block, or modifier), its standardization level, whether it
//! may appear more than once, and any synonym names that resolve to it.
//! Definitions are value objects; the configuration owns the registered
//! set.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Lazy-compiled regex for validating `@tagName` syntax.
static TAG_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@[a-zA-Z][a-zA-Z0-9]*$").unwrap());

/// Explain why `tag_name` is not a valid TSDoc tag name, or `None` when
/// it is valid.
pub fn explain_invalid_tag_name(tag_name: &str) -> Option<String> {
    if !tag_name.starts_with('@') {
        return Some(r#"A tag name must start with an "@" symbol"#.to_string());
    }
    if !TAG_NAME_REGEX.is_match(tag_name) {
        return Some(
            "A tag name must start with a letter and contain only letters and numbers"
                .to_string(),
        );
    }
    None
}

/// Validate `tag_name`, returning the reason when it is rejected.
pub fn validate_tsdoc_tag_name(tag_name: &str) -> Result<(), InvalidTagNameError> {
    match explain_invalid_tag_name(tag_name) {
        Some(reason) => Err(InvalidTagNameError {
            tag_name: tag_name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTagNameError {
    tag_name: String,
    reason: String,
}

impl InvalidTagNameError {
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for InvalidTagNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid tag name {:?}: {}", self.tag_name, self.reason)
    }
}

impl std::error::Error for InvalidTagNameError {}

/// How a tag is written in a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TsdocTagSyntaxKind {
    /// Written as `{@tagName ...}`.
    InlineTag,
    /// Written as `@tagName` at the start of a line, owning the content
    /// that follows.
    BlockTag,
    /// Written as `@tagName` with no content of its own.
    ModifierTag,
}

/// Whether a tag belongs to the standard set, and at which level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standardization {
    Core,
    Extended,
    Discretionary,
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TsdocTagDefinition {
    tag_name: String,
    tag_name_with_upper_case: String,
    syntax_kind: TsdocTagSyntaxKind,
    standardization: Standardization,
    allow_multiple: bool,
    synonyms: Vec<String>,
}

impl TsdocTagDefinition {
    /// Create a definition, panicking if `tag_name` is not a valid tag
    /// name. Use [`TsdocTagDefinition::try_new`] when the name comes from
    /// untrusted input.
    pub fn new(tag_name: &str, syntax_kind: TsdocTagSyntaxKind) -> Self {
        match Self::try_new(tag_name, syntax_kind) {
            Ok(definition) => definition,
            Err(error) => panic!("{error}"),
        }
    }

    pub fn try_new(
        tag_name: &str,
        syntax_kind: TsdocTagSyntaxKind,
    ) -> Result<Self, InvalidTagNameError> {
        validate_tsdoc_tag_name(tag_name)?;
        Ok(Self {
            tag_name: tag_name.to_string(),
            tag_name_with_upper_case: tag_name.to_uppercase(),
            syntax_kind,
            standardization: Standardization::None,
            allow_multiple: false,
            synonyms: Vec::new(),
        })
    }

    pub fn with_standardization(mut self, standardization: Standardization) -> Self {
        self.standardization = standardization;
        self
    }

    pub fn with_allow_multiple(mut self) -> Self {
        self.allow_multiple = true;
        self
    }

    /// Replace the synonym list. Panics if any synonym is not a valid tag
    /// name.
    pub fn with_synonyms(mut self, synonyms: &[&str]) -> Self {
        for synonym in synonyms {
            if let Err(error) = validate_tsdoc_tag_name(synonym) {
                panic!("{error}");
            }
        }
        self.synonyms = synonyms.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn tag_name_with_upper_case(&self) -> &str {
        &self.tag_name_with_upper_case
    }

    pub fn syntax_kind(&self) -> TsdocTagSyntaxKind {
        self.syntax_kind
    }

    pub fn standardization(&self) -> Standardization {
        self.standardization
    }

    pub fn allow_multiple(&self) -> bool {
        self.allow_multiple
    }

    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_tag_names() {
        let definition = TsdocTagDefinition::new("@myTag", TsdocTagSyntaxKind::BlockTag);
        assert_eq!(definition.tag_name(), "@myTag");
        assert_eq!(definition.tag_name_with_upper_case(), "@MYTAG");
        assert_eq!(definition.standardization(), Standardization::None);
        assert!(!definition.allow_multiple());
    }

    #[test]
    fn rejects_names_without_at_sign() {
        let error = TsdocTagDefinition::try_new("remarks", TsdocTagSyntaxKind::BlockTag)
            .unwrap_err();
        assert!(error.reason().contains("\"@\" symbol"));
    }

    #[test]
    fn rejects_names_with_punctuation() {
        assert!(validate_tsdoc_tag_name("@my-tag").is_err());
        assert!(validate_tsdoc_tag_name("@1tag").is_err());
        assert!(validate_tsdoc_tag_name("@").is_err());
        assert!(validate_tsdoc_tag_name("@ok123").is_ok());
    }

    #[test]
    fn builder_flags_are_recorded() {
        let definition = TsdocTagDefinition::new("@example", TsdocTagSyntaxKind::BlockTag)
            .with_standardization(Standardization::Extended)
            .with_allow_multiple()
            .with_synonyms(&["@sample"]);
        assert_eq!(definition.standardization(), Standardization::Extended);
        assert!(definition.allow_multiple());
        assert_eq!(definition.synonyms(), ["@sample"]);
    }

    #[test]
    #[should_panic(expected = "Invalid tag name")]
    fn invalid_synonym_panics() {
        let _ = TsdocTagDefinition::new("@example", TsdocTagSyntaxKind::BlockTag)
            .with_synonyms(&["not-a-tag"]);
    }
}

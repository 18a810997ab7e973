//! Parser configuration
//!
//! `TsdocConfiguration` owns the effective tag-definition table, the
//! support markings, the validation switches, and the node-kind registry.
//! It is read-only input to the parsing passes; lookup maps are rebuilt
//! eagerly whenever the table changes, so reads never mutate.
//!
//! Synonyms never mutate a registered definition in place. Adding or
//! removing one derives a replacement definition and swaps it into the
//! table, so the original (possibly the shared standard definition) is
//! left untouched and only one version is ever reachable.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::tsdoc::ast::node::{DocNodeKind, ALL_DOC_NODE_KINDS};
use crate::tsdoc::config::doc_node_manager::DocNodeManager;
use crate::tsdoc::config::standard_tags;
use crate::tsdoc::config::tag_definition::{
    validate_tsdoc_tag_name, InvalidTagNameError, TsdocTagDefinition,
};
use crate::tsdoc::messages::{TsdocMessageId, ALL_TSDOC_MESSAGE_IDS};

/// Switches controlling which optional diagnostics the parser reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TsdocValidationConfiguration {
    /// Treat undefined tags as custom block tags instead of reporting
    /// `tsdoc-undefined-tag`.
    pub ignore_undefined_tags: bool,
    /// Report `tsdoc-unsupported-tag` for defined tags that were not
    /// marked as supported.
    pub report_unsupported_tags: bool,
    /// Report `tsdoc-unsupported-xml-element` for element names outside
    /// the supported set.
    pub report_unsupported_xml_elements: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagDefinitionError {
    InvalidTagName(InvalidTagNameError),
    UndefinedTag {
        tag_name: String,
    },
    NameConflict {
        tag_name: String,
        existing_tag_name: String,
    },
}

impl fmt::Display for TagDefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagDefinitionError::InvalidTagName(error) => error.fmt(f),
            TagDefinitionError::UndefinedTag { tag_name } => {
                write!(f, "The tag {tag_name:?} is not defined in this configuration")
            }
            TagDefinitionError::NameConflict {
                tag_name,
                existing_tag_name,
            } => {
                write!(
                    f,
                    "The name {tag_name:?} is already in use by the definition for \
                     {existing_tag_name:?}"
                )
            }
        }
    }
}

impl std::error::Error for TagDefinitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TagDefinitionError::InvalidTagName(error) => Some(error),
            _ => None,
        }
    }
}

impl From<InvalidTagNameError> for TagDefinitionError {
    fn from(error: InvalidTagNameError) -> Self {
        TagDefinitionError::InvalidTagName(error)
    }
}

#[derive(Debug, Clone)]
pub struct TsdocConfiguration {
    tag_definitions: Vec<Arc<TsdocTagDefinition>>,
    /// upper-cased tag name or synonym -> definition
    tag_lookup: HashMap<String, Arc<TsdocTagDefinition>>,
    /// upper-cased primary names marked as supported
    supported_tags: HashSet<String>,
    /// lower-cased element names
    supported_xml_elements: HashSet<String>,
    pub validation: TsdocValidationConfiguration,
    doc_node_manager: DocNodeManager,
}

impl TsdocConfiguration {
    /// A configuration with the standard tags and the built-in node kinds
    /// registered.
    pub fn new() -> Self {
        let mut configuration = Self {
            tag_definitions: Vec::new(),
            tag_lookup: HashMap::new(),
            supported_tags: HashSet::new(),
            supported_xml_elements: HashSet::new(),
            validation: TsdocValidationConfiguration::default(),
            doc_node_manager: DocNodeManager::new(),
        };
        configuration.register_builtin_node_kinds();
        for definition in standard_tags::all_definitions() {
            configuration.add_tag_definition((*definition).clone());
        }
        configuration
    }

    fn register_builtin_node_kinds(&mut self) {
        let kind_ids: Vec<&str> = ALL_DOC_NODE_KINDS.iter().map(|k| k.kind_id()).collect();
        self.doc_node_manager
            .register_doc_nodes(env!("CARGO_PKG_NAME"), &kind_ids);

        let content_kinds: Vec<&str> = [
            DocNodeKind::PlainText,
            DocNodeKind::SoftBreak,
            DocNodeKind::EscapedText,
            DocNodeKind::ErrorText,
            DocNodeKind::InlineTag,
            DocNodeKind::LinkTag,
            DocNodeKind::InheritDocTag,
            DocNodeKind::CodeSpan,
            DocNodeKind::FencedCode,
            DocNodeKind::XmlStartTag,
            DocNodeKind::XmlEndTag,
            DocNodeKind::XmlElement,
        ]
        .iter()
        .map(|k| k.kind_id())
        .collect();

        let mut section_kinds = content_kinds.clone();
        section_kinds.push(DocNodeKind::Paragraph.kind_id());
        self.doc_node_manager
            .register_allowable_children(DocNodeKind::Section.kind_id(), &section_kinds);
        self.doc_node_manager
            .register_allowable_children(DocNodeKind::Paragraph.kind_id(), &content_kinds);
        self.doc_node_manager
            .register_allowable_children(DocNodeKind::XmlElement.kind_id(), &content_kinds);
        self.doc_node_manager.register_allowable_children(
            DocNodeKind::ParamCollection.kind_id(),
            &[DocNodeKind::ParamBlock.kind_id()],
        );
    }

    /// The registered definitions, in registration order.
    pub fn tag_definitions(&self) -> &[Arc<TsdocTagDefinition>] {
        &self.tag_definitions
    }

    /// Look up a definition by `@name` or synonym, case-insensitively.
    pub fn try_get_tag_definition(&self, tag_name: &str) -> Option<&TsdocTagDefinition> {
        self.try_get_tag_definition_with_upper_case(&tag_name.to_uppercase())
    }

    /// Look up by an already upper-cased `@NAME`.
    pub fn try_get_tag_definition_with_upper_case(
        &self,
        tag_name_with_upper_case: &str,
    ) -> Option<&TsdocTagDefinition> {
        self.tag_lookup
            .get(tag_name_with_upper_case)
            .map(Arc::as_ref)
    }

    /// Register a definition. Panics if its name or one of its synonyms is
    /// already claimed.
    pub fn add_tag_definition(&mut self, definition: TsdocTagDefinition) {
        let mut names = vec![definition.tag_name_with_upper_case().to_string()];
        names.extend(definition.synonyms().iter().map(|s| s.to_uppercase()));
        for name in &names {
            if let Some(existing) = self.tag_lookup.get(name) {
                panic!(
                    "The name {:?} is already in use by the definition for {:?}",
                    name,
                    existing.tag_name()
                );
            }
        }
        self.tag_definitions.push(Arc::new(definition));
        self.rebuild_tag_lookup();
    }

    pub fn add_tag_definitions(
        &mut self,
        definitions: impl IntoIterator<Item = TsdocTagDefinition>,
    ) {
        for definition in definitions {
            self.add_tag_definition(definition);
        }
    }

    /// Make `synonym` resolve to the definition of `tag_name`. The
    /// registered definition is replaced by a derived copy; re-adding an
    /// existing synonym of the same tag is a no-op.
    pub fn add_synonym(&mut self, tag_name: &str, synonym: &str) -> Result<(), TagDefinitionError> {
        validate_tsdoc_tag_name(synonym)?;
        let base = self.resolve_definition(tag_name)?;
        let upper_synonym = synonym.to_uppercase();
        if let Some(existing) = self.tag_lookup.get(&upper_synonym) {
            if Arc::ptr_eq(existing, &base) {
                return Ok(());
            }
            return Err(TagDefinitionError::NameConflict {
                tag_name: synonym.to_string(),
                existing_tag_name: existing.tag_name().to_string(),
            });
        }
        let mut synonyms: Vec<String> = base.synonyms().to_vec();
        synonyms.push(synonym.to_string());
        self.replace_definition(&base, Self::derive_with_synonyms(&base, synonyms));
        Ok(())
    }

    /// Remove a synonym from the definition of `tag_name`. Removing a
    /// name that is not a synonym of that tag is a no-op.
    pub fn remove_synonym(
        &mut self,
        tag_name: &str,
        synonym: &str,
    ) -> Result<(), TagDefinitionError> {
        let base = self.resolve_definition(tag_name)?;
        let upper_synonym = synonym.to_uppercase();
        let synonyms: Vec<String> = base
            .synonyms()
            .iter()
            .filter(|s| s.to_uppercase() != upper_synonym)
            .cloned()
            .collect();
        if synonyms.len() == base.synonyms().len() {
            return Ok(());
        }
        self.replace_definition(&base, Self::derive_with_synonyms(&base, synonyms));
        Ok(())
    }

    /// Mark a tag as supported or not by the consuming tool. Turns on
    /// `report_unsupported_tags`, so every defined tag that is not marked
    /// will be diagnosed. Panics if the tag is not defined.
    pub fn set_support_for_tag(&mut self, definition: &TsdocTagDefinition, supported: bool) {
        let upper = definition.tag_name_with_upper_case();
        if !self.tag_lookup.contains_key(upper) {
            panic!(
                "The tag {:?} is not defined in this configuration",
                definition.tag_name()
            );
        }
        if supported {
            self.supported_tags.insert(upper.to_string());
        } else {
            self.supported_tags.remove(upper);
        }
        self.validation.report_unsupported_tags = true;
    }

    pub fn set_support_for_tags<'a>(
        &mut self,
        definitions: impl IntoIterator<Item = &'a TsdocTagDefinition>,
        supported: bool,
    ) {
        for definition in definitions {
            self.set_support_for_tag(definition, supported);
        }
    }

    pub fn is_tag_supported(&self, definition: &TsdocTagDefinition) -> bool {
        self.supported_tags
            .contains(definition.tag_name_with_upper_case())
    }

    pub fn supported_tag_definitions(&self) -> Vec<&TsdocTagDefinition> {
        self.tag_definitions
            .iter()
            .map(Arc::as_ref)
            .filter(|d| self.is_tag_supported(d))
            .collect()
    }

    /// Declare the XML element names the consuming tool understands, and
    /// turn on reporting for all others. Matching is case-insensitive.
    pub fn set_supported_xml_elements(&mut self, element_names: &[&str]) {
        self.supported_xml_elements = element_names
            .iter()
            .map(|name| name.to_lowercase())
            .collect();
        self.validation.report_unsupported_xml_elements = true;
    }

    pub fn is_xml_element_supported(&self, element_name: &str) -> bool {
        self.supported_xml_elements
            .contains(&element_name.to_lowercase())
    }

    pub fn doc_node_manager(&self) -> &DocNodeManager {
        &self.doc_node_manager
    }

    pub fn doc_node_manager_mut(&mut self) -> &mut DocNodeManager {
        &mut self.doc_node_manager
    }

    /// Every message id this crate can report, including the ids reserved
    /// for external configuration loaders.
    pub fn all_tsdoc_message_ids(&self) -> &'static [TsdocMessageId] {
        ALL_TSDOC_MESSAGE_IDS
    }

    pub fn is_known_message_id(&self, message_id: &str) -> bool {
        message_id.parse::<TsdocMessageId>().is_ok()
    }

    fn resolve_definition(
        &self,
        tag_name: &str,
    ) -> Result<Arc<TsdocTagDefinition>, TagDefinitionError> {
        self.tag_lookup
            .get(&tag_name.to_uppercase())
            .cloned()
            .ok_or_else(|| TagDefinitionError::UndefinedTag {
                tag_name: tag_name.to_string(),
            })
    }

    fn derive_with_synonyms(
        base: &TsdocTagDefinition,
        synonyms: Vec<String>,
    ) -> TsdocTagDefinition {
        let synonym_refs: Vec<&str> = synonyms.iter().map(String::as_str).collect();
        base.clone().with_synonyms(&synonym_refs)
    }

    fn replace_definition(&mut self, base: &Arc<TsdocTagDefinition>, derived: TsdocTagDefinition) {
        for slot in &mut self.tag_definitions {
            if Arc::ptr_eq(slot, base) {
                *slot = Arc::new(derived);
                break;
            }
        }
        self.rebuild_tag_lookup();
    }

    fn rebuild_tag_lookup(&mut self) {
        self.tag_lookup.clear();
        for definition in &self.tag_definitions {
            self.tag_lookup.insert(
                definition.tag_name_with_upper_case().to_string(),
                Arc::clone(definition),
            );
            for synonym in definition.synonyms() {
                self.tag_lookup
                    .insert(synonym.to_uppercase(), Arc::clone(definition));
            }
        }
    }
}

impl Default for TsdocConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

//! Declaration reference model
//!
//! The structured form of the `package/path!Navigation.member:meaning(1)`
//! micro-syntax used inside `{@link}` and `{@inheritDoc}` tags. Values
//! are built by [`DeclarationReference::parse`] or assembled directly;
//! `Display` renders the canonical text form, quoting component strings
//! on demand.

use std::fmt;

use crate::tsdoc::declaration_reference::parse::{self, ReferenceSyntaxError};
use crate::tsdoc::messages::TsdocMessageId;

/// Where a reference starts resolving from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Module(ModuleSource),
    /// A bare `!`: the global scope.
    Global,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Module(module) => write!(f, "{}!", module.path()),
            Source::Global => write!(f, "!"),
        }
    }
}

/// A module path such as `@scope/package/lib/file`. The package pieces
/// are computed when the value is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSource {
    path: String,
    scope_name: String,
    unscoped_package_name: String,
    package_name: String,
    import_path: String,
}

impl ModuleSource {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let mut rest = path.as_str();
        let mut scope_name = "";
        if rest.starts_with('@') {
            match rest.find('/') {
                Some(index) => {
                    scope_name = &rest[..index];
                    rest = &rest[index + 1..];
                }
                None => {
                    scope_name = rest;
                    rest = "";
                }
            }
        }
        let (unscoped_package_name, import_path) = match rest.find('/') {
            Some(index) => (&rest[..index], &rest[index + 1..]),
            None => (rest, ""),
        };
        let package_name = if scope_name.is_empty() {
            unscoped_package_name.to_string()
        } else {
            format!("{scope_name}/{unscoped_package_name}")
        };
        Self {
            scope_name: scope_name.to_string(),
            unscoped_package_name: unscoped_package_name.to_string(),
            package_name,
            import_path: import_path.to_string(),
            path,
        }
    }

    /// The path exactly as written, without the trailing `!`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The `@scope` part, or the empty string for unscoped packages.
    pub fn scope_name(&self) -> &str {
        &self.scope_name
    }

    pub fn unscoped_package_name(&self) -> &str {
        &self.unscoped_package_name
    }

    /// Scope and package, e.g. `@scope/package`.
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// The part after the package name, or the empty string.
    pub fn import_path(&self) -> &str {
        &self.import_path
    }
}

/// How one component path step resolves relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// `.`: an export of the parent.
    Exports,
    /// `#`: an instance member of the parent.
    Members,
    /// `~`: a local of the parent.
    Locals,
}

impl Navigation {
    pub fn as_char(self) -> char {
        match self {
            Navigation::Exports => '.',
            Navigation::Members => '#',
            Navigation::Locals => '~',
        }
    }
}

/// What kind of declaration the reference selects when one name has
/// several forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meaning {
    Class,
    Interface,
    TypeAlias,
    Enum,
    Namespace,
    Function,
    Variable,
    Constructor,
    Member,
    Event,
    CallSignature,
    ConstructSignature,
    IndexSignature,
    ComplexType,
}

pub const ALL_MEANINGS: &[Meaning] = &[
    Meaning::Class,
    Meaning::Interface,
    Meaning::TypeAlias,
    Meaning::Enum,
    Meaning::Namespace,
    Meaning::Function,
    Meaning::Variable,
    Meaning::Constructor,
    Meaning::Member,
    Meaning::Event,
    Meaning::CallSignature,
    Meaning::ConstructSignature,
    Meaning::IndexSignature,
    Meaning::ComplexType,
];

impl Meaning {
    pub fn as_str(self) -> &'static str {
        match self {
            Meaning::Class => "class",
            Meaning::Interface => "interface",
            Meaning::TypeAlias => "type",
            Meaning::Enum => "enum",
            Meaning::Namespace => "namespace",
            Meaning::Function => "function",
            Meaning::Variable => "var",
            Meaning::Constructor => "constructor",
            Meaning::Member => "member",
            Meaning::Event => "event",
            Meaning::CallSignature => "call",
            Meaning::ConstructSignature => "new",
            Meaning::IndexSignature => "index",
            Meaning::ComplexType => "complex",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        ALL_MEANINGS
            .iter()
            .copied()
            .find(|meaning| meaning.as_str() == keyword)
    }
}

impl fmt::Display for Meaning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One name in a component path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// A plain or quoted name; the stored text is the decoded form.
    String(String),
    /// `[...]` with the balanced interior preserved verbatim.
    Bracketed(String),
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::String(text) => {
                if text.is_empty() {
                    Ok(())
                } else {
                    f.write_str(&escape_component_string(text))
                }
            }
            Component::Bracketed(raw) => write!(f, "[{raw}]"),
        }
    }
}

/// A chain of components joined by navigation tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentPath {
    Root {
        component: Component,
    },
    Navigation {
        parent: Box<ComponentPath>,
        navigation: Navigation,
        component: Component,
    },
}

impl ComponentPath {
    /// The last component of the chain.
    pub fn component(&self) -> &Component {
        match self {
            ComponentPath::Root { component } => component,
            ComponentPath::Navigation { component, .. } => component,
        }
    }

    pub fn parent(&self) -> Option<&ComponentPath> {
        match self {
            ComponentPath::Root { .. } => None,
            ComponentPath::Navigation { parent, .. } => Some(parent),
        }
    }
}

impl fmt::Display for ComponentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentPath::Root { component } => component.fmt(f),
            ComponentPath::Navigation {
                parent,
                navigation,
                component,
            } => {
                write!(f, "{parent}{}{component}", navigation.as_char())
            }
        }
    }
}

/// The symbol part of a reference: the component chain plus the optional
/// `:meaning` and overload index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolReference {
    component_path: Option<ComponentPath>,
    meaning: Option<Meaning>,
    overload_index: Option<u32>,
}

impl SymbolReference {
    pub fn new(component_path: Option<ComponentPath>) -> Self {
        Self {
            component_path,
            meaning: None,
            overload_index: None,
        }
    }

    pub fn with_meaning(mut self, meaning: Meaning) -> Self {
        self.meaning = Some(meaning);
        self
    }

    pub fn with_overload_index(mut self, overload_index: u32) -> Self {
        self.overload_index = Some(overload_index);
        self
    }

    pub fn component_path(&self) -> Option<&ComponentPath> {
        self.component_path.as_ref()
    }

    pub fn meaning(&self) -> Option<Meaning> {
        self.meaning
    }

    pub fn overload_index(&self) -> Option<u32> {
        self.overload_index
    }
}

impl fmt::Display for SymbolReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.component_path {
            path.fmt(f)?;
        }
        match (self.meaning, self.overload_index) {
            (Some(meaning), Some(index)) => write!(f, ":{meaning}({index})"),
            (Some(meaning), None) => write!(f, ":{meaning}"),
            (None, Some(index)) => write!(f, ":{index}"),
            (None, None) => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeclarationReference {
    source: Option<Source>,
    navigation: Option<Navigation>,
    symbol: Option<SymbolReference>,
}

impl DeclarationReference {
    pub fn new(
        source: Option<Source>,
        navigation: Option<Navigation>,
        symbol: Option<SymbolReference>,
    ) -> Self {
        Self {
            source,
            navigation,
            symbol,
        }
    }

    /// Parse the canonical text form.
    pub fn parse(text: &str) -> Result<Self, ReferenceSyntaxError> {
        parse::parse_declaration_reference(text)
    }

    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    /// How the first component resolves against the source. Unstated
    /// navigation defaults to `Exports` when a source is present and
    /// `Locals` otherwise; `None` when there is no symbol at all.
    pub fn navigation(&self) -> Option<Navigation> {
        self.symbol.as_ref()?;
        if self.source.is_none() {
            return Some(Navigation::Locals);
        }
        Some(self.navigation.unwrap_or(Navigation::Exports))
    }

    pub fn symbol(&self) -> Option<&SymbolReference> {
        self.symbol.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.symbol.is_none()
    }
}

impl fmt::Display for DeclarationReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            source.fmt(f)?;
        }
        if self.source.is_some() && self.navigation == Some(Navigation::Locals) {
            write!(f, "~")?;
        }
        if let Some(symbol) = &self.symbol {
            symbol.fmt(f)?;
        }
        Ok(())
    }
}

/// Quote a component string when it contains reserved characters,
/// using JSON string syntax. Well-formed names pass through unchanged.
pub fn escape_component_string(text: &str) -> String {
    if parse::is_well_formed_component_string(text) {
        return text.to_string();
    }
    serde_json::to_string(text).unwrap_or_else(|_| format!("{text:?}"))
}

/// Undo [`escape_component_string`]. A leading-and-trailing-quote form is
/// decoded as a JSON string; malformed escapes are an error.
pub fn unescape_component_string(text: &str) -> Result<String, ReferenceSyntaxError> {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return serde_json::from_str::<String>(text).map_err(|_| {
            ReferenceSyntaxError::new(
                TsdocMessageId::ReferenceInvalidEscape,
                text,
                format!("Invalid escaped component string {text:?}"),
            )
        });
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_source_derives_package_pieces() {
        let source = ModuleSource::new("@scope/package/lib/file");
        assert_eq!(source.scope_name(), "@scope");
        assert_eq!(source.unscoped_package_name(), "package");
        assert_eq!(source.package_name(), "@scope/package");
        assert_eq!(source.import_path(), "lib/file");

        let plain = ModuleSource::new("my-package");
        assert_eq!(plain.scope_name(), "");
        assert_eq!(plain.package_name(), "my-package");
        assert_eq!(plain.import_path(), "");
    }

    #[test]
    fn navigation_defaults_are_computed() {
        let symbol = SymbolReference::new(Some(ComponentPath::Root {
            component: Component::String("Foo".to_string()),
        }));
        let with_source = DeclarationReference::new(
            Some(Source::Module(ModuleSource::new("pkg"))),
            None,
            Some(symbol.clone()),
        );
        assert_eq!(with_source.navigation(), Some(Navigation::Exports));

        let sourceless = DeclarationReference::new(None, None, Some(symbol));
        assert_eq!(sourceless.navigation(), Some(Navigation::Locals));

        let empty = DeclarationReference::default();
        assert_eq!(empty.navigation(), None);
        assert!(empty.is_empty());
    }

    #[test]
    fn display_quotes_components_on_demand() {
        let reference = DeclarationReference::new(
            Some(Source::Module(ModuleSource::new("pkg"))),
            None,
            Some(SymbolReference::new(Some(ComponentPath::Navigation {
                parent: Box::new(ComponentPath::Root {
                    component: Component::String("my class".to_string()),
                }),
                navigation: Navigation::Members,
                component: Component::String("member".to_string()),
            }))),
        );
        assert_eq!(reference.to_string(), "pkg!\"my class\"#member");
    }

    #[test]
    fn escape_and_unescape_are_inverses() {
        for text in ["plain", "has space", "dot.name", "quo\"te", "каталог"] {
            let escaped = escape_component_string(text);
            assert_eq!(unescape_component_string(&escaped).unwrap(), text);
        }
        assert!(unescape_component_string("\"broken\\q\"").is_err());
    }
}

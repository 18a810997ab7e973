//! Declaration reference parsing
//!
//! A hand-rolled scanner plus recursive-descent parser for the grammar:
//!
//! ```text
//! reference     := source? symbol?
//! source        := '!' | moduleSource '!'
//! symbol        := ('~')? componentPath meaning?
//! componentPath := component (navToken component)*
//! navToken      := '.' | '#' | '~'
//! component     := quoted string | '[' balanced ']' | plain text run
//! meaning       := ':' meaningKeyword ('(' digits ')')? | ':' digits
//! ```
//!
//! Plain text runs stop at the reserved punctuation `{ } ( ) [ ] ! . # ~
//! : , " @` and at whitespace; names containing those characters must be
//! quoted. Unlike the comment parser, malformed input here is a hard
//! error: `parse` never returns a partial reference.

use std::fmt;

use crate::tsdoc::declaration_reference::model::{
    Component, ComponentPath, DeclarationReference, Meaning, ModuleSource, Navigation, Source,
    SymbolReference,
};
use crate::tsdoc::messages::TsdocMessageId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSyntaxError {
    message_id: TsdocMessageId,
    input: String,
    details: String,
}

impl ReferenceSyntaxError {
    pub(crate) fn new(
        message_id: TsdocMessageId,
        input: &str,
        details: impl Into<String>,
    ) -> Self {
        Self {
            message_id,
            input: input.to_string(),
            details: details.into(),
        }
    }

    pub fn message_id(&self) -> TsdocMessageId {
        self.message_id
    }

    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn details(&self) -> &str {
        &self.details
    }
}

impl fmt::Display for ReferenceSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid declaration reference {:?}: {}",
            self.input, self.details
        )
    }
}

impl std::error::Error for ReferenceSyntaxError {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanToken {
    EndOfInput,
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Exclamation,
    Dot,
    Hash,
    Tilde,
    Colon,
    Comma,
    At,
    Whitespace,
    /// A run of decimal digits.
    DecimalDigits(String),
    /// A quoted string, raw text including both quotes.
    QuotedString(String),
    /// A run of unreserved characters.
    Text(String),
}

/// Characters that terminate a plain text run and can never appear
/// unquoted inside a component name.
const RESERVED: &str = "{}()[]!.#~:,\"@";

struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

#[derive(Debug)]
struct ScanError {
    message_id: TsdocMessageId,
    details: String,
}

impl Scanner {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn scan(&mut self) -> Result<ScanToken, ScanError> {
        let Some(&ch) = self.chars.get(self.pos) else {
            return Ok(ScanToken::EndOfInput);
        };
        self.pos += 1;
        let token = match ch {
            '{' => ScanToken::OpenBrace,
            '}' => ScanToken::CloseBrace,
            '(' => ScanToken::OpenParen,
            ')' => ScanToken::CloseParen,
            '[' => ScanToken::OpenBracket,
            ']' => ScanToken::CloseBracket,
            '!' => ScanToken::Exclamation,
            '.' => ScanToken::Dot,
            '#' => ScanToken::Hash,
            '~' => ScanToken::Tilde,
            ':' => ScanToken::Colon,
            ',' => ScanToken::Comma,
            '@' => ScanToken::At,
            '"' => {
                self.pos -= 1;
                return self.scan_quoted_string();
            }
            _ if ch.is_ascii_digit() => {
                let start = self.pos - 1;
                while self
                    .chars
                    .get(self.pos)
                    .is_some_and(|c| c.is_ascii_digit())
                {
                    self.pos += 1;
                }
                ScanToken::DecimalDigits(self.chars[start..self.pos].iter().collect())
            }
            _ if ch.is_whitespace() => {
                while self
                    .chars
                    .get(self.pos)
                    .is_some_and(|c| c.is_whitespace())
                {
                    self.pos += 1;
                }
                ScanToken::Whitespace
            }
            _ => {
                let start = self.pos - 1;
                while self
                    .chars
                    .get(self.pos)
                    .is_some_and(|c| !c.is_whitespace() && !RESERVED.contains(*c))
                {
                    self.pos += 1;
                }
                ScanToken::Text(self.chars[start..self.pos].iter().collect())
            }
        };
        Ok(token)
    }

    /// Read a `"..."` token verbatim, honoring backslash escapes.
    fn scan_quoted_string(&mut self) -> Result<ScanToken, ScanError> {
        let start = self.pos;
        self.pos += 1;
        let mut escaped = false;
        while let Some(&ch) = self.chars.get(self.pos) {
            self.pos += 1;
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                return Ok(ScanToken::QuotedString(
                    self.chars[start..self.pos].iter().collect(),
                ));
            }
        }
        Err(ScanError {
            message_id: TsdocMessageId::ReferenceMissingQuote,
            details: "The quoted string is missing its closing quote".to_string(),
        })
    }

    /// Read the interior of a `[...]` component verbatim. The opening
    /// bracket has already been consumed. Nested brackets must balance;
    /// brackets inside quoted strings do not count.
    fn scan_bracket_interior(&mut self) -> Result<String, ScanError> {
        let start = self.pos;
        let mut depth = 1usize;
        let mut in_string = false;
        let mut escaped = false;
        while let Some(&ch) = self.chars.get(self.pos) {
            self.pos += 1;
            if in_string {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == '"' {
                    in_string = false;
                }
            } else if ch == '"' {
                in_string = true;
            } else if ch == '[' {
                depth += 1;
            } else if ch == ']' {
                depth -= 1;
                if depth == 0 {
                    return Ok(self.chars[start..self.pos - 1].iter().collect());
                }
            }
        }
        Err(ScanError {
            message_id: TsdocMessageId::ReferenceMissingRightBracket,
            details: "The bracketed component is missing its closing \"]\"".to_string(),
        })
    }
}

/// True when `text` scans as a single plain text token, meaning it can be
/// written in a reference without quoting.
pub(crate) fn is_well_formed_component_string(text: &str) -> bool {
    let mut scanner = Scanner::new(text);
    matches!(scanner.scan(), Ok(ScanToken::Text(_))) && scanner.at_end()
}

struct Parser<'a> {
    /// The complete reference text, for error reporting.
    input: &'a str,
    scanner: Scanner,
    token: ScanToken,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, symbol_text: &str) -> Result<Self, ReferenceSyntaxError> {
        let mut parser = Self {
            input,
            scanner: Scanner::new(symbol_text),
            token: ScanToken::EndOfInput,
        };
        parser.advance()?;
        Ok(parser)
    }

    fn advance(&mut self) -> Result<(), ReferenceSyntaxError> {
        self.token = self
            .scanner
            .scan()
            .map_err(|error| self.wrap_scan_error(error))?;
        Ok(())
    }

    fn wrap_scan_error(&self, error: ScanError) -> ReferenceSyntaxError {
        ReferenceSyntaxError::new(error.message_id, self.input, error.details)
    }

    fn error(&self, message_id: TsdocMessageId, details: &str) -> ReferenceSyntaxError {
        ReferenceSyntaxError::new(message_id, self.input, details)
    }

    fn at_end(&self) -> bool {
        self.token == ScanToken::EndOfInput
    }

    fn is_start_of_component(&self) -> bool {
        matches!(
            self.token,
            ScanToken::Text(_)
                | ScanToken::DecimalDigits(_)
                | ScanToken::QuotedString(_)
                | ScanToken::OpenBracket
        )
    }

    fn parse_symbol(&mut self) -> Result<SymbolReference, ReferenceSyntaxError> {
        let component = self.parse_component()?;
        let path = self.parse_component_rest(ComponentPath::Root { component })?;
        self.parse_symbol_rest(path)
    }

    fn parse_component(&mut self) -> Result<Component, ReferenceSyntaxError> {
        match &self.token {
            ScanToken::Text(_) | ScanToken::DecimalDigits(_) => {
                let mut text = String::new();
                while let ScanToken::Text(part) | ScanToken::DecimalDigits(part) = &self.token {
                    text.push_str(part);
                    self.advance()?;
                }
                Ok(Component::String(text))
            }
            ScanToken::QuotedString(raw) => {
                let decoded = serde_json::from_str::<String>(raw).map_err(|_| {
                    ReferenceSyntaxError::new(
                        TsdocMessageId::ReferenceInvalidEscape,
                        self.input,
                        format!("Invalid escaped component string {raw:?}"),
                    )
                })?;
                self.advance()?;
                Ok(Component::String(decoded))
            }
            ScanToken::OpenBracket => {
                let raw = self
                    .scanner
                    .scan_bracket_interior()
                    .map_err(|error| self.wrap_scan_error(error))?;
                self.advance()?;
                Ok(Component::Bracketed(raw))
            }
            _ => Err(self.error(
                TsdocMessageId::ReferenceEmptyComponent,
                "Expected a component name",
            )),
        }
    }

    fn parse_component_rest(
        &mut self,
        mut path: ComponentPath,
    ) -> Result<ComponentPath, ReferenceSyntaxError> {
        loop {
            let navigation = match self.token {
                ScanToken::Dot => Navigation::Exports,
                ScanToken::Hash => Navigation::Members,
                ScanToken::Tilde => Navigation::Locals,
                _ => return Ok(path),
            };
            self.advance()?;
            let component = self.parse_component()?;
            path = ComponentPath::Navigation {
                parent: Box::new(path),
                navigation,
                component,
            };
        }
    }

    fn parse_symbol_rest(
        &mut self,
        path: ComponentPath,
    ) -> Result<SymbolReference, ReferenceSyntaxError> {
        let mut symbol = SymbolReference::new(Some(path));
        if self.token != ScanToken::Colon {
            return Ok(symbol);
        }
        self.advance()?;
        match self.token.clone() {
            ScanToken::Text(word) => {
                let Some(meaning) = Meaning::from_keyword(&word) else {
                    return Err(self.error(
                        TsdocMessageId::ReferenceUnknownMeaning,
                        &format!("Unknown meaning {word:?}"),
                    ));
                };
                symbol = symbol.with_meaning(meaning);
                self.advance()?;
                if self.token == ScanToken::OpenParen {
                    self.advance()?;
                    symbol = symbol.with_overload_index(self.parse_overload_index()?);
                    if self.token != ScanToken::CloseParen {
                        return Err(self.error(
                            TsdocMessageId::ReferenceMissingRightParenthesis,
                            "Expected \")\" after the overload index",
                        ));
                    }
                    self.advance()?;
                }
            }
            ScanToken::DecimalDigits(_) => {
                symbol = symbol.with_overload_index(self.parse_overload_index()?);
            }
            _ => {
                return Err(self.error(
                    TsdocMessageId::ReferenceSyntax,
                    "Expected a meaning keyword or overload index after \":\"",
                ));
            }
        }
        Ok(symbol)
    }

    fn parse_overload_index(&mut self) -> Result<u32, ReferenceSyntaxError> {
        let ScanToken::DecimalDigits(digits) = self.token.clone() else {
            return Err(self.error(
                TsdocMessageId::ReferenceInvalidOverloadIndex,
                "Expected decimal digits for the overload index",
            ));
        };
        let index = digits.parse::<u32>().map_err(|_| {
            self.error(
                TsdocMessageId::ReferenceInvalidOverloadIndex,
                &format!("The overload index {digits:?} is out of range"),
            )
        })?;
        self.advance()?;
        Ok(index)
    }
}

/// Find the `!` that terminates a module source, skipping quoted strings.
fn find_unquoted_exclamation(text: &str) -> Option<usize> {
    let mut in_string = false;
    let mut escaped = false;
    for (index, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
        } else if ch == '"' {
            in_string = true;
        } else if ch == '!' {
            return Some(index);
        }
    }
    None
}

/// `@` starts a scoped package name; every other reserved character
/// cannot begin a module path.
fn can_start_module_source(first: char) -> bool {
    first == '"' || first == '@' || (!first.is_whitespace() && !RESERVED.contains(first))
}

pub(crate) fn parse_declaration_reference(
    text: &str,
) -> Result<DeclarationReference, ReferenceSyntaxError> {
    if text.chars().all(char::is_whitespace) {
        return Err(ReferenceSyntaxError::new(
            TsdocMessageId::ReferenceEmpty,
            text,
            "The reference is empty",
        ));
    }

    let mut source = None;
    let mut symbol_text = text;
    if let Some(first) = text.chars().next() {
        if first == '!' {
            source = Some(Source::Global);
            symbol_text = &text[1..];
        } else if can_start_module_source(first) {
            if let Some(index) = find_unquoted_exclamation(text) {
                source = Some(Source::Module(ModuleSource::new(&text[..index])));
                symbol_text = &text[index + 1..];
            }
        }
    }

    let mut parser = Parser::new(text, symbol_text)?;
    let mut navigation = None;
    if matches!(source, Some(Source::Module(_))) && parser.token == ScanToken::Tilde {
        navigation = Some(Navigation::Locals);
        parser.advance()?;
    }

    let symbol = if parser.is_start_of_component() {
        Some(parser.parse_symbol()?)
    } else if parser.token == ScanToken::Colon {
        let root = ComponentPath::Root {
            component: Component::String(String::new()),
        };
        Some(parser.parse_symbol_rest(root)?)
    } else {
        None
    };

    if !parser.at_end() {
        return Err(parser.error(
            TsdocMessageId::ReferenceTrailingCharacters,
            "Unexpected characters after the end of the reference",
        ));
    }
    Ok(DeclarationReference::new(source, navigation, symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> DeclarationReference {
        DeclarationReference::parse(text).unwrap()
    }

    fn parse_err(text: &str) -> TsdocMessageId {
        DeclarationReference::parse(text).unwrap_err().message_id()
    }

    #[test]
    fn parses_module_navigation_meaning_and_overload() {
        let reference = parse("foo/bar!N.C#z:member(1)");
        match reference.source() {
            Some(Source::Module(module)) => assert_eq!(module.path(), "foo/bar"),
            other => panic!("unexpected source: {other:?}"),
        }
        assert_eq!(reference.navigation(), Some(Navigation::Exports));

        let symbol = reference.symbol().unwrap();
        assert_eq!(symbol.meaning(), Some(Meaning::Member));
        assert_eq!(symbol.overload_index(), Some(1));

        let path = symbol.component_path().unwrap();
        assert_eq!(path.component(), &Component::String("z".to_string()));
        let parent = path.parent().unwrap();
        assert_eq!(parent.component(), &Component::String("C".to_string()));
        let grandparent = parent.parent().unwrap();
        assert_eq!(grandparent.component(), &Component::String("N".to_string()));
        assert!(grandparent.parent().is_none());

        assert_eq!(reference.to_string(), "foo/bar!N.C#z:member(1)");
    }

    #[test]
    fn round_trips_canonical_forms() {
        for text in [
            "Foo",
            "Foo.bar",
            "Foo#bar~baz",
            "!Buffer",
            "my-package!",
            "@scope/package!Class:class",
            "pkg!~localHelper",
            "pkg!\"my export\"",
            "pkg![custom index]",
            "Foo:constructor",
            "Foo:2",
            ":class",
        ] {
            assert_eq!(parse(text).to_string(), text, "round trip of {text:?}");
        }
    }

    #[test]
    fn locals_tilde_after_module_is_recorded() {
        let reference = parse("pkg!~helper");
        assert_eq!(reference.navigation(), Some(Navigation::Locals));
        assert_eq!(reference.to_string(), "pkg!~helper");
    }

    #[test]
    fn quoted_components_are_decoded() {
        let reference = parse("pkg!\"with \\\"quotes\\\"\"");
        let symbol = reference.symbol().unwrap();
        assert_eq!(
            symbol.component_path().unwrap().component(),
            &Component::String("with \"quotes\"".to_string())
        );
    }

    #[test]
    fn bracketed_components_keep_raw_interior() {
        let reference = parse("pkg![Symbol.iterator]");
        assert_eq!(
            reference.symbol().unwrap().component_path().unwrap().component(),
            &Component::Bracketed("Symbol.iterator".to_string())
        );

        let nested = parse("pkg![outer[inner]]");
        assert_eq!(
            nested.symbol().unwrap().component_path().unwrap().component(),
            &Component::Bracketed("outer[inner]".to_string())
        );
    }

    #[test]
    fn rejects_malformed_references() {
        assert_eq!(parse_err(""), TsdocMessageId::ReferenceEmpty);
        assert_eq!(parse_err("   "), TsdocMessageId::ReferenceEmpty);
        assert_eq!(parse_err("a..b"), TsdocMessageId::ReferenceEmptyComponent);
        assert_eq!(parse_err("a."), TsdocMessageId::ReferenceEmptyComponent);
        assert_eq!(parse_err("\"unterminated"), TsdocMessageId::ReferenceMissingQuote);
        assert_eq!(parse_err("pkg![open"), TsdocMessageId::ReferenceMissingRightBracket);
        assert_eq!(
            parse_err("Foo:member(1"),
            TsdocMessageId::ReferenceMissingRightParenthesis
        );
        assert_eq!(parse_err("Foo:wrong"), TsdocMessageId::ReferenceUnknownMeaning);
        assert_eq!(
            parse_err("Foo:member(x)"),
            TsdocMessageId::ReferenceInvalidOverloadIndex
        );
        assert_eq!(parse_err("Foo bar"), TsdocMessageId::ReferenceTrailingCharacters);
        assert_eq!(parse_err("a b"), TsdocMessageId::ReferenceTrailingCharacters);
    }

    #[test]
    fn well_formed_component_strings_need_no_quotes() {
        assert!(is_well_formed_component_string("plainName"));
        assert!(is_well_formed_component_string("a1"));
        assert!(!is_well_formed_component_string(""));
        assert!(!is_well_formed_component_string("1a"));
        assert!(!is_well_formed_component_string("has space"));
        assert!(!is_well_formed_component_string("dot.name"));
    }
}

//! Verbatim node parsing
//!
//! Walks the token stream of an extracted comment and recognizes its
//! syntactic constructs: escapes, block tags, inline tags, XML tags, code
//! spans and fenced code. Tokens between constructs coalesce into plain
//! text nodes, and every newline not swallowed by a construct becomes a
//! soft break. This stage is configuration-free; tag classification
//! happens later, during assembly.
//!
//! Recognizers never leave the stream half consumed. When one rejects its
//! input, the parser backtracks to where the construct began, converts one
//! token into a `DocErrorText` node, logs the failure, and rescans from
//! the next token. The node list therefore covers the full token stream
//! for any input, and concatenating the nodes reproduces the comment text
//! exactly.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::tsdoc::ast::{
    DocBlockTag, DocCodeSpan, DocErrorText, DocEscapedText, DocFencedCode, DocInheritDocTag,
    DocInlineTag, DocLinkTag, DocNode, DocPlainText, DocSoftBreak, DocXmlAttribute, DocXmlEndTag,
    DocXmlStartTag, FencedCodeExcerpts, InlineTagParts, LinkDestination, TextContent,
};
use crate::tsdoc::config::tag_definition::explain_invalid_tag_name;
use crate::tsdoc::declaration_reference::DeclarationReference;
use crate::tsdoc::messages::{ParserMessageLog, TsdocMessageId};
use crate::tsdoc::parsing::token_reader::{Marker, TokenReader};
use crate::tsdoc::parsing::token_sequence::TokenSequence;
use crate::tsdoc::token::{Token, TokenKind};

static URL_SCHEME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^[a-zA-Z][a-zA-Z0-9+.-]*$").unwrap()
});

static XML_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^[a-zA-Z]+(-[a-zA-Z]+)*$").unwrap()
});

/// Parse the token stream of an extracted comment into the flat verbatim
/// node list. Malformed input is reported through the log and kept in the
/// list as `DocErrorText` nodes; the function itself never fails.
pub fn parse_verbatim_nodes(tokens: Arc<[Token]>, log: &mut ParserMessageLog) -> Vec<DocNode> {
    NodeParser {
        reader: TokenReader::new(tokens),
        log,
        nodes: Vec::new(),
    }
    .parse()
}

/// A rejected construct: which diagnostic to raise, and the token window
/// to point it at.
struct ParseFailure {
    message_id: TsdocMessageId,
    message: String,
    location: TokenSequence,
}

impl ParseFailure {
    fn new(
        message_id: TsdocMessageId,
        message: impl Into<String>,
        location: TokenSequence,
    ) -> Self {
        Self {
            message_id,
            message: message.into(),
            location,
        }
    }
}

fn failure_at_current(
    reader: &TokenReader,
    message_id: TsdocMessageId,
    message: impl Into<String>,
) -> ParseFailure {
    ParseFailure::new(message_id, message, reader.sequence_for_current_token())
}

/// Read a run of spacing and newline tokens, handing it back as one
/// sequence. The accumulation must be empty on entry.
fn read_spacing_run(reader: &mut TokenReader) -> Option<TokenSequence> {
    while matches!(
        reader.peek_token_kind(),
        TokenKind::Spacing | TokenKind::Newline
    ) {
        reader.read_token();
    }
    reader.try_extract_accumulated_sequence()
}

fn token_column(token: &Token) -> usize {
    token.range().pos() - token.line().pos()
}

/// True when everything before the token on its line is spacing.
fn line_prefix_is_spacing(token: &Token) -> bool {
    let prefix = &token.line().as_str()[..token_column(token)];
    prefix.chars().all(|c| c == ' ' || c == '\t')
}

struct NodeParser<'a> {
    reader: TokenReader,
    log: &'a mut ParserMessageLog,
    nodes: Vec<DocNode>,
}

impl NodeParser<'_> {
    fn parse(mut self) -> Vec<DocNode> {
        loop {
            match self.reader.peek_token_kind() {
                TokenKind::EndOfInput => break,
                TokenKind::Newline => {
                    self.flush_plain_text();
                    self.reader.read_token();
                    let excerpt = self.reader.extract_accumulated_sequence();
                    self.nodes
                        .push(DocNode::SoftBreak(DocSoftBreak::from_excerpt(excerpt)));
                }
                TokenKind::Backslash => {
                    self.flush_plain_text();
                    self.parse_backslash_escape();
                }
                TokenKind::AtSign => {
                    self.flush_plain_text();
                    self.parse_block_tag();
                }
                TokenKind::LeftCurlyBracket => {
                    self.flush_plain_text();
                    self.parse_inline_tag();
                }
                TokenKind::RightCurlyBracket => {
                    self.flush_plain_text();
                    self.parse_unescaped_delimiter(
                        TsdocMessageId::EscapeRightBrace,
                        "The \"}\" character should be escaped using a backslash to avoid confusion with a TSDoc inline tag",
                    );
                }
                TokenKind::LessThan => {
                    self.flush_plain_text();
                    self.parse_xml_tag();
                }
                TokenKind::GreaterThan => {
                    self.flush_plain_text();
                    self.parse_unescaped_delimiter(
                        TsdocMessageId::EscapeGreaterThan,
                        "The \">\" character should be escaped using a backslash to avoid confusion with an XML tag",
                    );
                }
                TokenKind::Backtick => {
                    self.flush_plain_text();
                    if self.reader.peek_token_after_kind() == TokenKind::Backtick
                        && self.reader.peek_token_after_after_kind() == TokenKind::Backtick
                    {
                        self.parse_fenced_code();
                    } else {
                        self.parse_code_span();
                    }
                }
                _ => {
                    self.reader.read_token();
                }
            }
        }
        self.flush_plain_text();
        self.nodes
    }

    /// Hand any accumulated ordinary tokens over as one plain text node.
    fn flush_plain_text(&mut self) {
        if let Some(excerpt) = self.reader.try_extract_accumulated_sequence() {
            self.nodes
                .push(DocNode::PlainText(DocPlainText::from_excerpt(excerpt)));
        }
    }

    /// Convert one token at the recognizer's start into an error text node
    /// and log the failure. Rescanning resumes at the next token.
    fn recover_with_error(&mut self, marker: Marker, failure: ParseFailure) {
        self.reader.backtrack_to_marker(marker);
        self.reader.read_token();
        let text_excerpt = self.reader.extract_accumulated_sequence();
        let error_text = DocErrorText::from_excerpt(
            text_excerpt,
            failure.message_id,
            failure.message,
            failure.location,
        );
        self.log.add_message_for_doc_error_text(&error_text);
        self.nodes.push(DocNode::ErrorText(error_text));
    }

    /// Convert the whole window between the two markers into a single
    /// error text node. Used when an inline tag scanned successfully but
    /// its content was rejected: the tag is already delimited, so keeping
    /// it in one piece reads better than rescanning its inside.
    fn recover_with_error_range(&mut self, marker: Marker, end_marker: Marker, failure: ParseFailure) {
        self.reader.backtrack_to_marker(marker);
        while self.reader.create_marker() < end_marker {
            self.reader.read_token();
        }
        let text_excerpt = self.reader.extract_accumulated_sequence();
        let error_text = DocErrorText::from_excerpt(
            text_excerpt,
            failure.message_id,
            failure.message,
            failure.location,
        );
        self.log.add_message_for_doc_error_text(&error_text);
        self.nodes.push(DocNode::ErrorText(error_text));
    }

    /// `}` and `>` outside a construct must be written escaped. The bare
    /// token becomes an error text node directly.
    fn parse_unescaped_delimiter(&mut self, message_id: TsdocMessageId, message: &str) {
        let marker = self.reader.create_marker();
        let failure = failure_at_current(&self.reader, message_id, message);
        self.recover_with_error(marker, failure);
    }

    fn parse_backslash_escape(&mut self) {
        let marker = self.reader.create_marker();
        match self.try_read_backslash_escape() {
            Ok(node) => self.nodes.push(node),
            Err(failure) => self.recover_with_error(marker, failure),
        }
    }

    fn try_read_backslash_escape(&mut self) -> Result<DocNode, ParseFailure> {
        self.reader.read_token();
        match self.reader.peek_token_kind() {
            TokenKind::Newline | TokenKind::EndOfInput => Err(failure_at_current(
                &self.reader,
                TsdocMessageId::UnnecessaryBackslash,
                "A backslash must precede another character",
            )),
            kind if kind.is_punctuation() => {
                let escaped = self.reader.read_token();
                let encoded = self.reader.extract_accumulated_sequence();
                Ok(DocNode::EscapedText(DocEscapedText::from_excerpt(
                    encoded,
                    escaped.to_string(),
                )))
            }
            _ => Err(failure_at_current(
                &self.reader,
                TsdocMessageId::UnnecessaryBackslash,
                "A backslash can only be used to escape a punctuation character",
            )),
        }
    }

    fn parse_block_tag(&mut self) {
        let marker = self.reader.create_marker();
        match self.try_read_block_tag() {
            Ok(node) => self.nodes.push(node),
            Err(failure) => self.recover_with_error(marker, failure),
        }
    }

    fn try_read_block_tag(&mut self) -> Result<DocNode, ParseFailure> {
        if !self.reader.peek_previous_token_kind().is_word_boundary() {
            return Err(failure_at_current(
                &self.reader,
                TsdocMessageId::AtSignInWord,
                "The \"@\" character looks like part of a TSDoc tag; it must be escaped with a backslash",
            ));
        }
        let tag_name = self.read_tag_name()?;
        if !self.reader.peek_token_kind().is_word_boundary() {
            return Err(failure_at_current(
                &self.reader,
                TsdocMessageId::CharactersAfterBlockTag,
                "Characters are not allowed after the TSDoc tag name; expecting a space",
            ));
        }
        let excerpt = self.reader.extract_accumulated_sequence();
        Ok(DocNode::BlockTag(DocBlockTag::from_excerpt(
            tag_name, excerpt,
        )))
    }

    /// Read `@` plus the word after it. The current token must be the at
    /// sign; callers check that.
    fn read_tag_name(&mut self) -> Result<String, ParseFailure> {
        let name_marker = self.reader.create_marker();
        let mut tag_name = self.reader.read_token().to_string();
        if self.reader.peek_token_kind() != TokenKind::AsciiWord {
            return Err(failure_at_current(
                &self.reader,
                TsdocMessageId::AtSignWithoutTagName,
                "Expecting a TSDoc tag name after \"@\"; a tag name must start with a letter and contain only letters and numbers",
            ));
        }
        tag_name.push_str(&self.reader.read_token().to_string());
        if let Some(explanation) = explain_invalid_tag_name(&tag_name) {
            return Err(ParseFailure::new(
                TsdocMessageId::MalformedTagName,
                format!("Malformed TSDoc tag name {tag_name:?}: {explanation}"),
                self.reader.sequence_from_marker(name_marker),
            ));
        }
        Ok(tag_name)
    }

    fn parse_inline_tag(&mut self) {
        let marker = self.reader.create_marker();
        let scaffolding = match self.try_read_inline_tag_scaffolding() {
            Ok(scaffolding) => scaffolding,
            Err(failure) => return self.recover_with_error(marker, failure),
        };
        let end_marker = self.reader.create_marker();
        match interpret_inline_tag(scaffolding) {
            Ok(node) => self.nodes.push(node),
            Err(failure) => self.recover_with_error_range(marker, end_marker, failure),
        }
    }

    /// Read the `{@name ...}` frame shared by all inline tags. The content
    /// between the spacing after the name and the closing brace is handed
    /// back raw for interpretation.
    fn try_read_inline_tag_scaffolding(&mut self) -> Result<InlineTagScaffolding, ParseFailure> {
        self.reader.read_token();
        let opening = self.reader.extract_accumulated_sequence();
        if self.reader.peek_token_kind() != TokenKind::AtSign {
            return Err(failure_at_current(
                &self.reader,
                TsdocMessageId::MalformedInlineTag,
                "Expecting a TSDoc tag starting with \"{@\"",
            ));
        }
        let tag_name = self.read_tag_name()?;
        let tag_name_excerpt = self.reader.extract_accumulated_sequence();
        while matches!(
            self.reader.peek_token_kind(),
            TokenKind::Spacing | TokenKind::Newline
        ) {
            self.reader.read_token();
        }
        let spacing_after_tag_name = self.reader.try_extract_accumulated_sequence();
        if spacing_after_tag_name.is_none()
            && self.reader.peek_token_kind() != TokenKind::RightCurlyBracket
        {
            return Err(failure_at_current(
                &self.reader,
                TsdocMessageId::CharactersAfterInlineTag,
                "Expecting a space after the TSDoc tag name",
            ));
        }
        loop {
            match self.reader.peek_token_kind() {
                TokenKind::EndOfInput => {
                    return Err(failure_at_current(
                        &self.reader,
                        TsdocMessageId::InlineTagMissingRightBrace,
                        "The TSDoc inline tag is missing its closing \"}\" character",
                    ));
                }
                TokenKind::LeftCurlyBracket => {
                    return Err(failure_at_current(
                        &self.reader,
                        TsdocMessageId::InlineTagUnescapedBrace,
                        "The \"{\" character must be escaped with a backslash when it is used inside a TSDoc inline tag",
                    ));
                }
                TokenKind::RightCurlyBracket => break,
                TokenKind::Backslash => {
                    // The escape passes both tokens through to the content
                    self.reader.read_token();
                    if self.reader.peek_token_kind() != TokenKind::EndOfInput {
                        self.reader.read_token();
                    }
                }
                _ => {
                    self.reader.read_token();
                }
            }
        }
        let content = self.reader.try_extract_accumulated_sequence();
        self.reader.read_token();
        let closing = self.reader.extract_accumulated_sequence();
        let parts = InlineTagParts::from_excerpts(
            opening,
            tag_name,
            tag_name_excerpt,
            spacing_after_tag_name,
            closing,
        );
        Ok(InlineTagScaffolding { parts, content })
    }

    fn parse_xml_tag(&mut self) {
        let marker = self.reader.create_marker();
        let result = if self.reader.peek_token_after_kind() == TokenKind::Slash {
            self.try_read_xml_end_tag()
        } else {
            self.try_read_xml_start_tag()
        };
        match result {
            Ok(node) => self.nodes.push(node),
            Err(failure) => self.recover_with_error(marker, failure),
        }
    }

    fn try_read_xml_start_tag(&mut self) -> Result<DocNode, ParseFailure> {
        self.reader.read_token();
        let opening = self.reader.extract_accumulated_sequence();
        self.read_xml_name()?;
        let name_excerpt = self.reader.extract_accumulated_sequence();
        let spacing_after_name = read_spacing_run(&mut self.reader);
        let mut attributes = Vec::new();
        while self.reader.peek_token_kind() == TokenKind::AsciiWord {
            attributes.push(self.try_read_xml_attribute()?);
        }
        let self_closing = match self.reader.peek_token_kind() {
            TokenKind::Slash if self.reader.peek_token_after_kind() == TokenKind::GreaterThan => {
                self.reader.read_token();
                self.reader.read_token();
                true
            }
            TokenKind::GreaterThan => {
                self.reader.read_token();
                false
            }
            _ => {
                return Err(failure_at_current(
                    &self.reader,
                    TsdocMessageId::XmlTagMissingGreaterThan,
                    "The XML tag is missing its closing \">\" character",
                ));
            }
        };
        let closing = self.reader.extract_accumulated_sequence();
        Ok(DocNode::XmlStartTag(DocXmlStartTag::from_excerpts(
            opening,
            name_excerpt,
            spacing_after_name,
            attributes,
            self_closing,
            closing,
        )))
    }

    fn try_read_xml_end_tag(&mut self) -> Result<DocNode, ParseFailure> {
        self.reader.read_token();
        self.reader.read_token();
        let opening = self.reader.extract_accumulated_sequence();
        self.read_xml_name()?;
        let name_excerpt = self.reader.extract_accumulated_sequence();
        let spacing_after_name = read_spacing_run(&mut self.reader);
        if self.reader.peek_token_kind() != TokenKind::GreaterThan {
            return Err(failure_at_current(
                &self.reader,
                TsdocMessageId::XmlTagMissingGreaterThan,
                "The XML tag is missing its closing \">\" character",
            ));
        }
        self.reader.read_token();
        let closing = self.reader.extract_accumulated_sequence();
        Ok(DocNode::XmlEndTag(DocXmlEndTag::from_excerpts(
            opening,
            name_excerpt,
            spacing_after_name,
            closing,
        )))
    }

    /// Read and validate an XML element or attribute name: ASCII letter
    /// words joined by single hyphens. The name tokens stay accumulated
    /// for the caller to extract.
    fn read_xml_name(&mut self) -> Result<(), ParseFailure> {
        let name_marker = self.reader.create_marker();
        if !matches!(
            self.reader.peek_token_kind(),
            TokenKind::AsciiWord | TokenKind::Hyphen
        ) {
            return Err(failure_at_current(
                &self.reader,
                TsdocMessageId::MalformedXmlName,
                "Expecting an XML name",
            ));
        }
        let mut name = String::new();
        while matches!(
            self.reader.peek_token_kind(),
            TokenKind::AsciiWord | TokenKind::Hyphen
        ) {
            name.push_str(&self.reader.read_token().to_string());
        }
        if !XML_NAME_REGEX.is_match(&name) {
            return Err(ParseFailure::new(
                TsdocMessageId::MalformedXmlName,
                format!(
                    "Invalid XML name {name:?}: an XML name must be ASCII letters separated by single hyphens"
                ),
                self.reader.sequence_from_marker(name_marker),
            ));
        }
        Ok(())
    }

    fn try_read_xml_attribute(&mut self) -> Result<DocXmlAttribute, ParseFailure> {
        self.read_xml_name()?;
        let name_excerpt = self.reader.extract_accumulated_sequence();
        let spacing_after_name = read_spacing_run(&mut self.reader);
        if self.reader.peek_token_kind() != TokenKind::Equals {
            return Err(failure_at_current(
                &self.reader,
                TsdocMessageId::XmlTagMissingEquals,
                "The XML attribute is missing its \"=\" character",
            ));
        }
        self.reader.read_token();
        let equals = self.reader.extract_accumulated_sequence();
        let spacing_after_equals = read_spacing_run(&mut self.reader);
        let quote_kind = self.reader.peek_token_kind();
        if quote_kind != TokenKind::SingleQuote && quote_kind != TokenKind::DoubleQuote {
            return Err(failure_at_current(
                &self.reader,
                TsdocMessageId::XmlTagMissingString,
                "Expecting an XML string enclosed in single or double quotes",
            ));
        }
        self.reader.read_token();
        loop {
            let kind = self.reader.peek_token_kind();
            if kind == quote_kind {
                break;
            }
            match kind {
                TokenKind::Newline | TokenKind::EndOfInput => {
                    return Err(failure_at_current(
                        &self.reader,
                        TsdocMessageId::XmlStringMissingQuote,
                        "The XML string is missing its closing quote",
                    ));
                }
                _ => {
                    self.reader.read_token();
                }
            }
        }
        self.reader.read_token();
        if !matches!(
            self.reader.peek_token_kind(),
            TokenKind::Spacing
                | TokenKind::Newline
                | TokenKind::EndOfInput
                | TokenKind::Slash
                | TokenKind::GreaterThan
        ) {
            return Err(failure_at_current(
                &self.reader,
                TsdocMessageId::TextAfterXmlString,
                "Characters are not allowed after an XML string; expecting spacing or the end of the tag",
            ));
        }
        let value = self.reader.extract_accumulated_sequence();
        let spacing_after_value = read_spacing_run(&mut self.reader);
        Ok(DocXmlAttribute::from_excerpts(
            name_excerpt,
            spacing_after_name,
            equals,
            spacing_after_equals,
            value,
            spacing_after_value,
        ))
    }

    fn parse_code_span(&mut self) {
        let marker = self.reader.create_marker();
        match self.try_read_code_span() {
            Ok(node) => self.nodes.push(node),
            Err(failure) => self.recover_with_error(marker, failure),
        }
    }

    fn try_read_code_span(&mut self) -> Result<DocNode, ParseFailure> {
        self.reader.read_token();
        let opening = self.reader.extract_accumulated_sequence();
        loop {
            match self.reader.peek_token_kind() {
                TokenKind::Backtick => break,
                TokenKind::Newline | TokenKind::EndOfInput => {
                    return Err(failure_at_current(
                        &self.reader,
                        TsdocMessageId::CodeSpanMissingDelimiter,
                        "The code span is missing its closing backtick",
                    ));
                }
                _ => {
                    self.reader.read_token();
                }
            }
        }
        let code = match self.reader.try_extract_accumulated_sequence() {
            Some(code) => code,
            None => {
                return Err(failure_at_current(
                    &self.reader,
                    TsdocMessageId::CodeSpanEmpty,
                    "A code span must contain at least one character between its backticks",
                ));
            }
        };
        self.reader.read_token();
        let closing = self.reader.extract_accumulated_sequence();
        Ok(DocNode::CodeSpan(DocCodeSpan::from_excerpts(
            opening, code, closing,
        )))
    }

    fn parse_fenced_code(&mut self) {
        let marker = self.reader.create_marker();
        match self.try_read_fenced_code() {
            Ok(node) => self.nodes.push(node),
            Err(failure) => self.recover_with_error(marker, failure),
        }
    }

    fn try_read_fenced_code(&mut self) -> Result<DocNode, ParseFailure> {
        if !line_prefix_is_spacing(self.reader.peek_token()) {
            return Err(failure_at_current(
                &self.reader,
                TsdocMessageId::CodeFenceOpeningIndent,
                "The opening delimiter for a code fence must appear at the start of the line",
            ));
        }
        let opening_column = token_column(self.reader.peek_token());
        self.reader.read_token();
        self.reader.read_token();
        self.reader.read_token();
        let opening_fence = self.reader.extract_accumulated_sequence();
        while self.reader.peek_token_kind() == TokenKind::Spacing {
            self.reader.read_token();
        }
        let spacing_after_opening_fence = self.reader.try_extract_accumulated_sequence();

        // The rest of the opening line is the language specifier plus the
        // padding that trails it, newline included
        let language_start = self.reader.create_marker();
        let mut language_end = language_start;
        loop {
            match self.reader.peek_token_kind() {
                TokenKind::Backtick => {
                    return Err(failure_at_current(
                        &self.reader,
                        TsdocMessageId::CodeFenceSpecifierSyntax,
                        "The language specifier for a code fence cannot contain backtick characters",
                    ));
                }
                TokenKind::EndOfInput => {
                    return Err(failure_at_current(
                        &self.reader,
                        TsdocMessageId::CodeFenceMissingDelimiter,
                        "The code fence is missing its closing delimiter",
                    ));
                }
                TokenKind::Newline => {
                    self.reader.read_token();
                    break;
                }
                TokenKind::Spacing => {
                    self.reader.read_token();
                }
                _ => {
                    self.reader.read_token();
                    language_end = self.reader.create_marker();
                }
            }
        }
        let after_opening_line = self.reader.create_marker();
        self.reader.backtrack_to_marker(language_end);
        let language = self.reader.try_extract_accumulated_sequence();
        while self.reader.create_marker() < after_opening_line {
            self.reader.read_token();
        }
        let spacing_after_language = self.reader.try_extract_accumulated_sequence();

        // Code lines run until a line whose first content is a fence
        let code_start = self.reader.create_marker();
        let mut line_start = code_start;
        loop {
            match self.reader.peek_token_kind() {
                TokenKind::EndOfInput => {
                    return Err(failure_at_current(
                        &self.reader,
                        TsdocMessageId::CodeFenceMissingDelimiter,
                        "The code fence is missing its closing delimiter",
                    ));
                }
                TokenKind::Newline => {
                    self.reader.read_token();
                    line_start = self.reader.create_marker();
                }
                TokenKind::Backtick
                    if self.reader.peek_token_after_kind() == TokenKind::Backtick
                        && self.reader.peek_token_after_after_kind() == TokenKind::Backtick
                        && line_prefix_is_spacing(self.reader.peek_token()) =>
                {
                    break;
                }
                _ => {
                    self.reader.read_token();
                }
            }
        }
        if token_column(self.reader.peek_token()) > opening_column {
            return Err(failure_at_current(
                &self.reader,
                TsdocMessageId::CodeFenceClosingIndent,
                "The closing delimiter for a code fence must not be indented more than the opening delimiter",
            ));
        }
        let fence_position = self.reader.create_marker();
        self.reader.backtrack_to_marker(line_start);
        let code = match self.reader.try_extract_accumulated_sequence() {
            Some(code) => code,
            None => self.reader.sequence_from_marker(line_start),
        };
        while self.reader.create_marker() < fence_position {
            self.reader.read_token();
        }
        let spacing_before_closing_fence = self.reader.try_extract_accumulated_sequence();
        self.reader.read_token();
        self.reader.read_token();
        self.reader.read_token();
        let closing_fence = self.reader.extract_accumulated_sequence();
        loop {
            match self.reader.peek_token_kind() {
                TokenKind::Spacing => {
                    self.reader.read_token();
                }
                TokenKind::Newline => {
                    self.reader.read_token();
                    break;
                }
                TokenKind::EndOfInput => break,
                _ => {
                    return Err(failure_at_current(
                        &self.reader,
                        TsdocMessageId::CodeFenceClosingSyntax,
                        "Characters are not allowed after the closing delimiter of a code fence",
                    ));
                }
            }
        }
        let spacing_after_closing_fence = self.reader.try_extract_accumulated_sequence();
        Ok(DocNode::FencedCode(DocFencedCode::from_excerpts(
            FencedCodeExcerpts {
                opening_fence,
                spacing_after_opening_fence,
                language,
                spacing_after_language,
                code,
                spacing_before_closing_fence,
                closing_fence,
                spacing_after_closing_fence,
            },
        )))
    }
}

/// The `{@name ...}` frame with its raw content window, before the tag
/// name decides how the content is interpreted.
struct InlineTagScaffolding {
    parts: InlineTagParts,
    content: Option<TokenSequence>,
}

fn interpret_inline_tag(scaffolding: InlineTagScaffolding) -> Result<DocNode, ParseFailure> {
    let InlineTagScaffolding { parts, content } = scaffolding;
    let upper_case_name = parts.tag_name_with_upper_case().to_string();
    match upper_case_name.as_str() {
        "@LINK" => interpret_link_tag(parts, content),
        "@INHERITDOC" => interpret_inherit_doc_tag(parts, content),
        _ => {
            let tag_content = match content {
                Some(excerpt) => TextContent::from_excerpt(excerpt),
                None => TextContent::from_literal(""),
            };
            Ok(DocNode::InlineTag(DocInlineTag::from_parts(
                parts,
                tag_content,
            )))
        }
    }
}

fn interpret_link_tag(
    parts: InlineTagParts,
    content: Option<TokenSequence>,
) -> Result<DocNode, ParseFailure> {
    let content = match content {
        Some(content) => content,
        None => {
            let location = parts
                .tag_name_excerpt()
                .cloned()
                .unwrap_or_else(TokenSequence::empty);
            return Err(ParseFailure::new(
                TsdocMessageId::LinkTagEmpty,
                "The @link tag content is missing",
                location,
            ));
        }
    };
    let mut reader = TokenReader::for_sequence(&content);
    let mut destination = None;
    if reader.peek_token_kind() != TokenKind::Pipe {
        destination = Some(read_link_destination(&mut reader)?);
    }
    let spacing_after_destination = read_spacing_run(&mut reader);
    let mut pipe = None;
    let mut spacing_after_pipe = None;
    let mut link_text = None;
    let mut spacing_after_link_text = None;
    match reader.peek_token_kind() {
        TokenKind::EndOfInput => {}
        TokenKind::Pipe => {
            reader.read_token();
            pipe = Some(reader.extract_accumulated_sequence());
            spacing_after_pipe = read_spacing_run(&mut reader);
            let (text, spacing) = read_link_text(&mut reader)?;
            link_text = text.map(TextContent::from_excerpt);
            spacing_after_link_text = spacing;
        }
        _ => {
            return Err(failure_at_current(
                &reader,
                TsdocMessageId::LinkTagDestinationSyntax,
                "Unexpected character after the link destination",
            ));
        }
    }
    Ok(DocNode::LinkTag(DocLinkTag::from_parts(
        parts,
        destination,
        spacing_after_destination,
        pipe,
        spacing_after_pipe,
        link_text,
        spacing_after_link_text,
    )))
}

/// Read the link destination and decide whether it is a URL or a
/// declaration reference. The scan is quote and bracket aware so that
/// spaces inside quoted components do not end the destination.
fn read_link_destination(reader: &mut TokenReader) -> Result<LinkDestination, ParseFailure> {
    let mut in_quotes = false;
    let mut bracket_depth: usize = 0;
    loop {
        match reader.peek_token_kind() {
            TokenKind::EndOfInput => break,
            TokenKind::DoubleQuote => {
                in_quotes = !in_quotes;
                reader.read_token();
            }
            TokenKind::LeftSquareBracket if !in_quotes => {
                bracket_depth += 1;
                reader.read_token();
            }
            TokenKind::RightSquareBracket if !in_quotes => {
                bracket_depth = bracket_depth.saturating_sub(1);
                reader.read_token();
            }
            TokenKind::Pipe | TokenKind::Spacing | TokenKind::Newline
                if !in_quotes && bracket_depth == 0 =>
            {
                break;
            }
            _ => {
                reader.read_token();
            }
        }
    }
    let excerpt = reader.extract_accumulated_sequence();
    let destination_text = excerpt.to_string();
    if destination_text.contains("://") {
        if !is_valid_link_url(&destination_text) {
            return Err(ParseFailure::new(
                TsdocMessageId::LinkTagInvalidUrl,
                format!("The @link tag contains an invalid URL: {destination_text:?}"),
                excerpt,
            ));
        }
        return Ok(LinkDestination::Url {
            url: destination_text,
            excerpt: Some(excerpt),
        });
    }
    match DeclarationReference::parse(&destination_text) {
        Ok(reference) => Ok(LinkDestination::Reference {
            reference,
            excerpt: Some(excerpt),
        }),
        Err(error) => Err(ParseFailure::new(
            TsdocMessageId::LinkTagDestinationSyntax,
            format!("The @link tag reference could not be parsed: {error}"),
            excerpt,
        )),
    }
}

fn is_valid_link_url(url: &str) -> bool {
    match url.split_once("://") {
        Some((scheme, rest)) => URL_SCHEME_REGEX.is_match(scheme) && !rest.is_empty(),
        None => false,
    }
}

/// Read the link text after the pipe, splitting the trailing spacing off
/// into its own excerpt.
fn read_link_text(
    reader: &mut TokenReader,
) -> Result<(Option<TokenSequence>, Option<TokenSequence>), ParseFailure> {
    let text_start = reader.create_marker();
    let mut text_end = text_start;
    loop {
        match reader.peek_token_kind() {
            TokenKind::EndOfInput => break,
            TokenKind::Pipe => {
                return Err(failure_at_current(
                    reader,
                    TsdocMessageId::LinkTagUnescapedText,
                    "The link text cannot contain the \"|\" character",
                ));
            }
            kind => {
                reader.read_token();
                if !matches!(kind, TokenKind::Spacing | TokenKind::Newline) {
                    text_end = reader.create_marker();
                }
            }
        }
    }
    reader.backtrack_to_marker(text_end);
    let text = reader.try_extract_accumulated_sequence();
    while reader.peek_token_kind() != TokenKind::EndOfInput {
        reader.read_token();
    }
    let spacing = reader.try_extract_accumulated_sequence();
    Ok((text, spacing))
}

fn interpret_inherit_doc_tag(
    parts: InlineTagParts,
    content: Option<TokenSequence>,
) -> Result<DocNode, ParseFailure> {
    let content = match content {
        Some(content) => content,
        None => {
            return Ok(DocNode::InheritDocTag(DocInheritDocTag::from_parts(
                parts, None, None,
            )));
        }
    };
    let reference_text = content.to_string();
    match DeclarationReference::parse(reference_text.trim()) {
        Ok(reference) => Ok(DocNode::InheritDocTag(DocInheritDocTag::from_parts(
            parts,
            Some(reference),
            Some(content),
        ))),
        Err(error) => Err(ParseFailure::new(
            TsdocMessageId::InheritDocTagSyntax,
            format!("The @inheritDoc tag reference could not be parsed: {error}"),
            content,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsdoc::lexing::read_tokens;
    use crate::tsdoc::text::TextRange;

    fn tokens_for(text: &str) -> Arc<[Token]> {
        let buffer = TextRange::from_string(text.to_string());
        let mut lines = Vec::new();
        let mut pos = 0;
        for segment in text.split('\n') {
            lines.push(buffer.get_new_range(pos, pos + segment.len()));
            pos += segment.len() + 1;
        }
        Arc::from(read_tokens(&lines))
    }

    fn parse_text(text: &str) -> (Vec<DocNode>, ParserMessageLog) {
        let mut log = ParserMessageLog::new();
        let nodes = parse_verbatim_nodes(tokens_for(text), &mut log);
        (nodes, log)
    }

    fn concatenated(nodes: &[DocNode]) -> String {
        nodes.iter().map(|node| node.to_text()).collect()
    }

    /// Whatever the input, the node list must reproduce it exactly, with
    /// each source line contributing its newline.
    fn assert_round_trip(text: &str) -> Vec<DocNode> {
        let (nodes, _log) = parse_text(text);
        assert_eq!(concatenated(&nodes), format!("{text}\n"));
        nodes
    }

    fn first_message_id(log: &ParserMessageLog) -> TsdocMessageId {
        log.messages()[0].message_id()
    }

    #[test]
    fn test_plain_text_coalesces_words_and_punctuation() {
        let (nodes, log) = parse_text("Some text; more text.");
        assert!(log.is_empty());
        assert_eq!(nodes.len(), 2);
        match &nodes[0] {
            DocNode::PlainText(text) => assert_eq!(text.text(), "Some text; more text."),
            other => panic!("expected plain text, got {other:?}"),
        }
        assert!(matches!(nodes[1], DocNode::SoftBreak(_)));
    }

    #[test]
    fn test_each_line_ends_with_a_soft_break() {
        let (nodes, log) = parse_text("one\ntwo");
        assert!(log.is_empty());
        assert_eq!(nodes.len(), 4);
        assert!(matches!(nodes[1], DocNode::SoftBreak(_)));
        assert!(matches!(nodes[3], DocNode::SoftBreak(_)));
    }

    #[test]
    fn test_backslash_escapes_punctuation() {
        let (nodes, log) = parse_text(r"a \{ b");
        assert!(log.is_empty());
        match &nodes[1] {
            DocNode::EscapedText(escaped) => {
                assert_eq!(escaped.decoded_text(), "{");
                assert_eq!(escaped.encoded_excerpt().to_string(), r"\{");
            }
            other => panic!("expected escaped text, got {other:?}"),
        }
    }

    #[test]
    fn test_backslash_before_a_word_is_an_error() {
        let (nodes, log) = parse_text(r"\word");
        assert_eq!(first_message_id(&log), TsdocMessageId::UnnecessaryBackslash);
        assert!(matches!(nodes[0], DocNode::ErrorText(_)));
        match &nodes[1] {
            DocNode::PlainText(text) => assert_eq!(text.text(), "word"),
            other => panic!("expected plain text, got {other:?}"),
        }
    }

    #[test]
    fn test_block_tag_at_line_start() {
        let (nodes, log) = parse_text("@remarks");
        assert!(log.is_empty());
        match &nodes[0] {
            DocNode::BlockTag(tag) => assert_eq!(tag.tag_name(), "@remarks"),
            other => panic!("expected a block tag, got {other:?}"),
        }
    }

    #[test]
    fn test_at_sign_inside_a_word_is_an_error() {
        let (nodes, log) = parse_text("user@example");
        assert_eq!(first_message_id(&log), TsdocMessageId::AtSignInWord);
        assert_eq!(concatenated(&nodes), "user@example\n");
    }

    #[test]
    fn test_at_sign_without_a_tag_name() {
        let (_nodes, log) = parse_text("@ remarks");
        assert_eq!(first_message_id(&log), TsdocMessageId::AtSignWithoutTagName);
    }

    #[test]
    fn test_malformed_tag_name() {
        let (_nodes, log) = parse_text("@1fish");
        assert_eq!(first_message_id(&log), TsdocMessageId::MalformedTagName);
    }

    #[test]
    fn test_characters_after_block_tag_name() {
        let (_nodes, log) = parse_text("@remarks: stuff");
        assert_eq!(
            first_message_id(&log),
            TsdocMessageId::CharactersAfterBlockTag
        );
    }

    #[test]
    fn test_generic_inline_tag() {
        let (nodes, log) = parse_text("{@label Overview}");
        assert!(log.is_empty());
        match &nodes[0] {
            DocNode::InlineTag(tag) => {
                assert_eq!(tag.tag_name(), "@label");
                assert_eq!(tag.tag_content().text(), "Overview");
            }
            other => panic!("expected an inline tag, got {other:?}"),
        }
    }

    #[test]
    fn test_inline_tag_with_no_content() {
        let (nodes, log) = parse_text("{@label}");
        assert!(log.is_empty());
        match &nodes[0] {
            DocNode::InlineTag(tag) => assert_eq!(tag.tag_content().text(), ""),
            other => panic!("expected an inline tag, got {other:?}"),
        }
    }

    #[test]
    fn test_inline_tag_without_at_sign() {
        let (nodes, log) = parse_text("{label}");
        assert_eq!(first_message_id(&log), TsdocMessageId::MalformedInlineTag);
        match &nodes[0] {
            DocNode::ErrorText(error) => assert_eq!(error.text(), "{"),
            other => panic!("expected error text, got {other:?}"),
        }
    }

    #[test]
    fn test_inline_tag_missing_right_brace() {
        let (_nodes, log) = parse_text("{@label text");
        assert_eq!(
            first_message_id(&log),
            TsdocMessageId::InlineTagMissingRightBrace
        );
    }

    #[test]
    fn test_inline_tag_with_unescaped_brace() {
        let (_nodes, log) = parse_text("{@label {nested}}");
        assert_eq!(
            first_message_id(&log),
            TsdocMessageId::InlineTagUnescapedBrace
        );
    }

    #[test]
    fn test_inline_tag_spanning_lines() {
        let nodes = assert_round_trip("{@link\nWidget.render}");
        assert!(matches!(nodes[0], DocNode::LinkTag(_)));
    }

    #[test]
    fn test_link_tag_with_url_destination() {
        let (nodes, log) = parse_text("{@link https://example.com/docs}");
        assert!(log.is_empty());
        match &nodes[0] {
            DocNode::LinkTag(link) => match link.destination() {
                Some(LinkDestination::Url { url, .. }) => {
                    assert_eq!(url, "https://example.com/docs");
                }
                other => panic!("expected a URL destination, got {other:?}"),
            },
            other => panic!("expected a link tag, got {other:?}"),
        }
    }

    #[test]
    fn test_link_tag_with_invalid_url() {
        let (nodes, log) = parse_text("{@link https://}");
        assert_eq!(first_message_id(&log), TsdocMessageId::LinkTagInvalidUrl);
        match &nodes[0] {
            DocNode::ErrorText(error) => assert_eq!(error.text(), "{@link https://}"),
            other => panic!("expected error text, got {other:?}"),
        }
    }

    #[test]
    fn test_link_tag_with_declaration_reference() {
        let (nodes, log) = parse_text("{@link Button.render}");
        assert!(log.is_empty());
        match &nodes[0] {
            DocNode::LinkTag(link) => match link.destination() {
                Some(LinkDestination::Reference { reference, .. }) => {
                    assert_eq!(reference.to_string(), "Button.render");
                }
                other => panic!("expected a reference destination, got {other:?}"),
            },
            other => panic!("expected a link tag, got {other:?}"),
        }
    }

    #[test]
    fn test_link_tag_with_link_text() {
        let (nodes, log) = parse_text("{@link Button | the button}");
        assert!(log.is_empty());
        match &nodes[0] {
            DocNode::LinkTag(link) => {
                let text = link.link_text().map(|text| text.text());
                assert_eq!(text.as_deref(), Some("the button"));
            }
            other => panic!("expected a link tag, got {other:?}"),
        }
    }

    #[test]
    fn test_link_text_cannot_contain_a_second_pipe() {
        let (_nodes, log) = parse_text("{@link Button | a | b}");
        assert_eq!(first_message_id(&log), TsdocMessageId::LinkTagUnescapedText);
    }

    #[test]
    fn test_empty_link_tag() {
        let (_nodes, log) = parse_text("{@link}");
        assert_eq!(first_message_id(&log), TsdocMessageId::LinkTagEmpty);
    }

    #[test]
    fn test_link_tag_with_a_bad_reference_becomes_one_error_node() {
        let (nodes, log) = parse_text("before {@link a..b} after");
        assert_eq!(log.messages().len(), 1);
        assert_eq!(
            first_message_id(&log),
            TsdocMessageId::LinkTagDestinationSyntax
        );
        match &nodes[1] {
            DocNode::ErrorText(error) => assert_eq!(error.text(), "{@link a..b}"),
            other => panic!("expected error text, got {other:?}"),
        }
        assert_eq!(concatenated(&nodes), "before {@link a..b} after\n");
    }

    #[test]
    fn test_inherit_doc_tag_with_reference() {
        let (nodes, log) = parse_text("{@inheritDoc Base.method}");
        assert!(log.is_empty());
        match &nodes[0] {
            DocNode::InheritDocTag(tag) => {
                let reference = tag.declaration_reference().map(|r| r.to_string());
                assert_eq!(reference.as_deref(), Some("Base.method"));
            }
            other => panic!("expected an inheritDoc tag, got {other:?}"),
        }
    }

    #[test]
    fn test_inherit_doc_tag_without_reference() {
        let (nodes, log) = parse_text("{@inheritDoc}");
        assert!(log.is_empty());
        assert!(matches!(nodes[0], DocNode::InheritDocTag(_)));
    }

    #[test]
    fn test_code_span() {
        let (nodes, log) = parse_text("call `render()` twice");
        assert!(log.is_empty());
        match &nodes[1] {
            DocNode::CodeSpan(span) => assert_eq!(span.code(), "render()"),
            other => panic!("expected a code span, got {other:?}"),
        }
    }

    #[test]
    fn test_code_span_missing_delimiter() {
        let (nodes, log) = parse_text("start `broken");
        assert_eq!(
            first_message_id(&log),
            TsdocMessageId::CodeSpanMissingDelimiter
        );
        assert_eq!(concatenated(&nodes), "start `broken\n");
    }

    #[test]
    fn test_empty_code_span() {
        let (_nodes, log) = parse_text("a `` b");
        assert_eq!(first_message_id(&log), TsdocMessageId::CodeSpanEmpty);
    }

    #[test]
    fn test_fenced_code_with_language() {
        let (nodes, log) = parse_text("```ts\nlet x = 1;\n```");
        assert!(log.is_empty());
        assert_eq!(nodes.len(), 1);
        match &nodes[0] {
            DocNode::FencedCode(fence) => {
                assert_eq!(fence.language(), "ts");
                assert_eq!(fence.code(), "let x = 1;\n");
            }
            other => panic!("expected fenced code, got {other:?}"),
        }
    }

    #[test]
    fn test_fenced_code_without_language() {
        let (nodes, _log) = parse_text("```\ncode\n```");
        match &nodes[0] {
            DocNode::FencedCode(fence) => {
                assert_eq!(fence.language(), "");
                assert_eq!(fence.code(), "code\n");
            }
            other => panic!("expected fenced code, got {other:?}"),
        }
    }

    #[test]
    fn test_fenced_code_opening_must_start_the_line() {
        let (_nodes, log) = parse_text("text ```js\ncode\n```");
        assert_eq!(
            first_message_id(&log),
            TsdocMessageId::CodeFenceOpeningIndent
        );
    }

    #[test]
    fn test_fenced_code_closing_must_not_be_indented_further() {
        let (_nodes, log) = parse_text("```\ncode\n  ```");
        assert_eq!(
            first_message_id(&log),
            TsdocMessageId::CodeFenceClosingIndent
        );
    }

    #[test]
    fn test_fenced_code_missing_delimiter() {
        let (_nodes, log) = parse_text("```js\nnever closed");
        assert_eq!(
            first_message_id(&log),
            TsdocMessageId::CodeFenceMissingDelimiter
        );
    }

    #[test]
    fn test_fenced_code_rejects_text_after_closing_fence() {
        let (_nodes, log) = parse_text("```\ncode\n``` tail");
        assert_eq!(
            first_message_id(&log),
            TsdocMessageId::CodeFenceClosingSyntax
        );
    }

    #[test]
    fn test_xml_start_tag_with_attribute() {
        let (nodes, log) = parse_text("<table border=\"1\">");
        assert!(log.is_empty());
        match &nodes[0] {
            DocNode::XmlStartTag(tag) => {
                assert_eq!(tag.name(), "table");
                assert!(!tag.self_closing());
                assert_eq!(tag.attributes().len(), 1);
                assert_eq!(tag.attributes()[0].name(), "border");
                assert_eq!(tag.attributes()[0].value(), "\"1\"");
            }
            other => panic!("expected an XML start tag, got {other:?}"),
        }
    }

    #[test]
    fn test_self_closing_xml_tag() {
        let (nodes, log) = parse_text("<br/>");
        assert!(log.is_empty());
        match &nodes[0] {
            DocNode::XmlStartTag(tag) => assert!(tag.self_closing()),
            other => panic!("expected an XML start tag, got {other:?}"),
        }
    }

    #[test]
    fn test_xml_end_tag() {
        let (nodes, log) = parse_text("</table>");
        assert!(log.is_empty());
        match &nodes[0] {
            DocNode::XmlEndTag(tag) => assert_eq!(tag.name(), "table"),
            other => panic!("expected an XML end tag, got {other:?}"),
        }
    }

    #[test]
    fn test_xml_attribute_missing_equals() {
        let (_nodes, log) = parse_text("<a flag>");
        assert_eq!(first_message_id(&log), TsdocMessageId::XmlTagMissingEquals);
    }

    #[test]
    fn test_xml_string_missing_closing_quote() {
        let (_nodes, log) = parse_text("<a x=\"open>");
        assert_eq!(
            first_message_id(&log),
            TsdocMessageId::XmlStringMissingQuote
        );
    }

    #[test]
    fn test_unescaped_right_brace_and_greater_than() {
        let (_nodes, log) = parse_text("a } b > c");
        assert_eq!(log.messages().len(), 2);
        assert_eq!(log.messages()[0].message_id(), TsdocMessageId::EscapeRightBrace);
        assert_eq!(log.messages()[1].message_id(), TsdocMessageId::EscapeGreaterThan);
    }

    #[test]
    fn test_recovery_never_loses_characters() {
        for text in [
            r"\",
            "{",
            "{@",
            "{@x y",
            "<",
            "<a",
            "<a x>",
            "`",
            "``",
            "```",
            "@",
            "a@b",
            "}{><",
            "{@link }",
            "{@link |}",
            "{@link a..b | text}",
            "``` `",
        ] {
            assert_round_trip(text);
        }
    }
}


//! Content tokenization
//!
//! Each extracted line is tokenized independently with the logos lexer,
//! then a zero-width `Newline` token is appended for the line break the
//! extractor stripped. One trailing `EndOfInput` token closes the stream,
//! so readers can always peek one past the last real token.

use logos::Logos;

use crate::tsdoc::text::TextRange;
use crate::tsdoc::token::{Token, TokenKind};

/// Tokenize the extracted comment lines into one flat token stream.
pub fn read_tokens(lines: &[TextRange]) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    for line in lines {
        push_tokens_for_line(&mut tokens, line);
    }
    match lines.last() {
        Some(last_line) => tokens.push(Token::new(
            TokenKind::EndOfInput,
            last_line.get_new_range(last_line.end(), last_line.end()),
            last_line.clone(),
        )),
        None => tokens.push(Token::new(
            TokenKind::EndOfInput,
            TextRange::empty(),
            TextRange::empty(),
        )),
    }
    tokens
}

fn push_tokens_for_line(tokens: &mut Vec<Token>, line: &TextRange) {
    let mut lexer = TokenKind::lexer(line.as_str());
    while let Some(result) = lexer.next() {
        // The patterns cover every character, so an error here would be a
        // lexer definition bug; map it to Other rather than panic
        let kind = result.unwrap_or(TokenKind::Other);
        let span = lexer.span();
        let range = line.get_new_range(line.pos() + span.start, line.pos() + span.end);
        tokens.push(Token::new(kind, range, line.clone()));
    }
    // The line break itself, as a zero-width token at the line end
    tokens.push(Token::new(
        TokenKind::Newline,
        line.get_new_range(line.end(), line.end()),
        line.clone(),
    ));
}

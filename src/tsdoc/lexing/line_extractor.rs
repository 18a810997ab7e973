//! Comment framing and line extraction
//!
//! The extractor scans the source range for a `/** ... */` frame and
//! produces one `TextRange` per comment line with the decoration stripped:
//! the delimiters, each line's leading `*` (and the single space after it),
//! and trailing whitespace are all excluded. Blank comment lines come out
//! as zero-length ranges so later stages can still see them.

use crate::tsdoc::messages::{ParserMessageLog, TsdocMessageId};
use crate::tsdoc::text::TextRange;

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    BeginComment1,
    BeginComment2,
    CollectingFirstLine,
    CollectingLine,
    AdvancingLine,
    Done,
}

/// The successfully framed comment: the `/** ... */` span and the stripped
/// content lines inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedComment {
    pub comment_range: TextRange,
    pub lines: Vec<TextRange>,
}

/// Scan `source_range` for a doc comment and extract its lines.
///
/// Returns `None` after logging when no `/**` is found, when the text
/// before it is not whitespace, or when the comment never closes. These
/// are the only failures that stop the pipeline.
pub fn extract_lines(
    source_range: &TextRange,
    log: &mut ParserMessageLog,
) -> Option<ExtractedComment> {
    let chars: Vec<(usize, char)> = source_range
        .as_str()
        .char_indices()
        .map(|(index, c)| (index + source_range.pos(), c))
        .collect();
    // Byte offset of the character at a scan position, or the range end
    // once the scan has run out.
    let offset_at = |index: usize| {
        if index < chars.len() {
            chars[index].0
        } else {
            source_range.end()
        }
    };

    let mut comment_range_start = source_range.pos();
    let mut comment_range_end = source_range.pos();

    // Both are set before entering the collecting states
    let mut collecting_line_start = source_range.pos();
    let mut collecting_line_end = source_range.pos();

    let mut next_index = 0;
    let mut state = State::BeginComment1;
    let mut lines: Vec<TextRange> = Vec::new();

    loop {
        if state == State::Done {
            break;
        }
        if next_index >= chars.len() {
            match state {
                State::BeginComment1 | State::BeginComment2 => {
                    log.add_message_for_text_range(
                        TsdocMessageId::CommentNotFound,
                        "Expecting a \"/**\" comment",
                        source_range,
                    );
                }
                _ => {
                    log.add_message_for_text_range(
                        TsdocMessageId::CommentMissingClosingDelimiter,
                        "Unexpected end of input in comment",
                        &source_range.get_new_range(comment_range_start, source_range.end()),
                    );
                }
            }
            return None;
        }

        let (current_offset, current) = chars[next_index];
        next_index += 1;
        let next = chars.get(next_index).map(|entry| entry.1);

        match state {
            State::BeginComment1 => {
                if current == '/' && next == Some('*') {
                    comment_range_start = current_offset;
                    next_index += 1; // skip the star
                    state = State::BeginComment2;
                } else if !current.is_whitespace() {
                    log.add_message_for_text_range(
                        TsdocMessageId::CommentOpeningDelimiterSyntax,
                        "Expecting a leading \"/**\"",
                        &source_range.get_new_range(current_offset, source_range.end()),
                    );
                    return None;
                }
            }
            State::BeginComment2 => {
                if current == '*' {
                    if next == Some(' ') {
                        next_index += 1; // discard the space after the star
                    }
                    collecting_line_start = offset_at(next_index);
                    collecting_line_end = offset_at(next_index);
                    state = State::CollectingFirstLine;
                } else {
                    log.add_message_for_text_range(
                        TsdocMessageId::CommentOpeningDelimiterSyntax,
                        "Expecting a leading \"/**\"",
                        &source_range.get_new_range(current_offset, source_range.end()),
                    );
                    return None;
                }
            }
            State::CollectingFirstLine | State::CollectingLine => {
                if current == '\n' {
                    // Discard an empty line immediately after the "/**"
                    if state != State::CollectingFirstLine
                        || collecting_line_end > collecting_line_start
                    {
                        lines.push(
                            source_range.get_new_range(collecting_line_start, collecting_line_end),
                        );
                    }
                    collecting_line_start = offset_at(next_index);
                    collecting_line_end = offset_at(next_index);
                    state = State::AdvancingLine;
                } else if current == '*' && next == Some('/') {
                    if collecting_line_end > collecting_line_start {
                        lines.push(
                            source_range.get_new_range(collecting_line_start, collecting_line_end),
                        );
                    }
                    next_index += 1; // skip the slash
                    comment_range_end = offset_at(next_index);
                    state = State::Done;
                } else if !current.is_whitespace() {
                    // Trailing whitespace stays excluded: the end only moves
                    // past characters that are part of the content
                    collecting_line_end = offset_at(next_index);
                }
            }
            State::AdvancingLine => {
                if current == '*' {
                    if next == Some('/') {
                        next_index += 1; // skip the slash
                        comment_range_end = offset_at(next_index);
                        state = State::Done;
                    } else {
                        // Discard the "*" that starts the new line
                        if next == Some(' ') {
                            next_index += 1; // and the space after it
                        }
                        collecting_line_start = offset_at(next_index);
                        collecting_line_end = offset_at(next_index);
                        state = State::CollectingLine;
                    }
                } else if current == '\n' {
                    // A line with no "*" and no content at all
                    lines.push(source_range.get_new_range(current_offset, current_offset));
                    collecting_line_start = offset_at(next_index);
                } else if !current.is_whitespace() {
                    // The "*" is missing; the line starts at this character
                    collecting_line_start = current_offset;
                    collecting_line_end = offset_at(next_index);
                    state = State::CollectingLine;
                }
            }
            State::Done => break,
        }
    }

    Some(ExtractedComment {
        comment_range: source_range.get_new_range(comment_range_start, comment_range_end),
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_strings(source: &str) -> Option<(String, Vec<String>)> {
        let range = TextRange::from_string(source.to_string());
        let mut log = ParserMessageLog::new();
        extract_lines(&range, &mut log).map(|extracted| {
            (
                extracted.comment_range.as_str().to_string(),
                extracted
                    .lines
                    .iter()
                    .map(|line| line.as_str().to_string())
                    .collect(),
            )
        })
    }

    fn extract_failure_id(source: &str) -> TsdocMessageId {
        let range = TextRange::from_string(source.to_string());
        let mut log = ParserMessageLog::new();
        assert!(extract_lines(&range, &mut log).is_none());
        assert_eq!(log.messages().len(), 1);
        log.messages()[0].message_id()
    }

    #[test]
    fn test_single_line_comment() {
        let (comment, lines) = extract_strings("/** Hello */").unwrap();
        assert_eq!(comment, "/** Hello */");
        assert_eq!(lines, vec!["Hello"]);
    }

    #[test]
    fn test_multi_line_comment_strips_decoration() {
        let source = "/**\n * First line\n * Second line\n */";
        let (comment, lines) = extract_strings(source).unwrap();
        assert_eq!(comment, source);
        assert_eq!(lines, vec!["First line", "Second line"]);
    }

    #[test]
    fn test_empty_comment_has_no_lines() {
        let (_, lines) = extract_strings("/***/").unwrap();
        assert!(lines.is_empty());
        let (_, lines) = extract_strings("/** */").unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_blank_middle_line_is_kept_as_empty() {
        let (_, lines) = extract_strings("/**\n * a\n *\n * b\n */").unwrap();
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_fully_blank_line_without_star() {
        let (_, lines) = extract_strings("/**\na\n\nb*/").unwrap();
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_line_without_leading_star() {
        let (_, lines) = extract_strings("/**\nplain text\n*/").unwrap();
        assert_eq!(lines, vec!["plain text"]);
    }

    #[test]
    fn test_trailing_whitespace_is_excluded() {
        let (_, lines) = extract_strings("/** abc   \n * def\t\n */").unwrap();
        assert_eq!(lines, vec!["abc", "def"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let (_, lines) = extract_strings("/**\r\n * one\r\n * two\r\n */").unwrap();
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_leading_whitespace_before_comment_is_allowed() {
        let (comment, lines) = extract_strings("  \n\t/** x */").unwrap();
        assert_eq!(comment, "/** x */");
        assert_eq!(lines, vec!["x"]);
    }

    #[test]
    fn test_missing_comment() {
        assert_eq!(extract_failure_id(""), TsdocMessageId::CommentNotFound);
        assert_eq!(extract_failure_id("   "), TsdocMessageId::CommentNotFound);
    }

    #[test]
    fn test_text_before_comment() {
        assert_eq!(
            extract_failure_id("let x = 1; /** y */"),
            TsdocMessageId::CommentOpeningDelimiterSyntax
        );
    }

    #[test]
    fn test_plain_block_comment_is_rejected() {
        assert_eq!(
            extract_failure_id("/* not a doc comment */"),
            TsdocMessageId::CommentOpeningDelimiterSyntax
        );
    }

    #[test]
    fn test_unclosed_comment() {
        assert_eq!(
            extract_failure_id("/** never closed\n * more text"),
            TsdocMessageId::CommentMissingClosingDelimiter
        );
    }
}

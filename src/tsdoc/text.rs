//! Source text ranges
//!
//! Everything downstream of the parser entry point works on `TextRange`
//! views instead of owned strings. A range is a `(buffer, pos, end)` triple
//! whose buffer is shared, so producing sub-ranges never copies text. The
//! extracted comment lines, every token, and every diagnostic location are
//! all ranges over the one buffer handed to the parser.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

static EMPTY_BUFFER: Lazy<Arc<str>> = Lazy::new(|| Arc::from(""));

/// A 1-based line/column pair computed from a byte offset.
///
/// `line: 0, column: 0` means the offset was outside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextLocation {
    pub line: usize,
    pub column: usize,
}

impl TextLocation {
    pub const NONE: TextLocation = TextLocation { line: 0, column: 0 };
}

/// An immutable view of a byte span inside a shared source buffer.
///
/// Sub-ranges created with [`TextRange::get_new_range`] share the buffer of
/// their parent, which is what lets tokens and diagnostics point back into
/// the original source without holding copies.
#[derive(Debug, Clone)]
pub struct TextRange {
    buffer: Arc<str>,
    pos: usize,
    end: usize,
}

impl TextRange {
    /// Range covering an entire owned buffer.
    pub fn from_string(buffer: String) -> Self {
        let buffer: Arc<str> = Arc::from(buffer);
        let end = buffer.len();
        Self { buffer, pos: 0, end }
    }

    /// Range covering an entire shared buffer.
    pub fn from_buffer(buffer: Arc<str>) -> Self {
        let end = buffer.len();
        Self { buffer, pos: 0, end }
    }

    /// The designated empty range. All empty ranges created through this
    /// constructor share one static buffer.
    pub fn empty() -> Self {
        Self {
            buffer: EMPTY_BUFFER.clone(),
            pos: 0,
            end: 0,
        }
    }

    /// A new range over the same buffer with different bounds.
    ///
    /// Panics if the bounds are inverted, out of range, or not on char
    /// boundaries; ranges are only ever constructed from parser positions,
    /// so a bad argument is a caller bug.
    pub fn get_new_range(&self, pos: usize, end: usize) -> Self {
        assert!(pos <= end, "range bounds are inverted: {pos} > {end}");
        assert!(end <= self.buffer.len(), "range end {end} is outside the buffer");
        assert!(
            self.buffer.is_char_boundary(pos) && self.buffer.is_char_boundary(end),
            "range bounds must fall on character boundaries"
        );
        Self {
            buffer: self.buffer.clone(),
            pos,
            end,
        }
    }

    pub fn buffer(&self) -> &Arc<str> {
        &self.buffer
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    /// The text this range covers.
    pub fn as_str(&self) -> &str {
        &self.buffer[self.pos..self.end]
    }

    /// True when both ranges view the same buffer object.
    pub fn same_buffer(&self, other: &TextRange) -> bool {
        Arc::ptr_eq(&self.buffer, &other.buffer)
    }

    /// Line/column of a byte offset, counted from the start of the buffer
    /// (not of this range). The scan is linear on purpose: locations are
    /// only computed when a diagnostic is formatted, and the buffer is a
    /// single doc comment.
    ///
    /// A `\r` immediately before `\n` is counted as part of the line break;
    /// a tab advances the column by one.
    pub fn get_location(&self, offset: usize) -> TextLocation {
        if offset > self.buffer.len() {
            return TextLocation::NONE;
        }
        let mut line = 1;
        let mut column = 1;
        for (index, current) in self.buffer.char_indices() {
            if index >= offset {
                break;
            }
            match current {
                // Assume a following LF will take care of the line advance.
                '\r' => {}
                '\n' => {
                    line += 1;
                    column = 1;
                }
                _ => column += 1,
            }
        }
        TextLocation { line, column }
    }
}

impl PartialEq for TextRange {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos && self.end == other.end && self.buffer == other.buffer
    }
}

impl Eq for TextRange {}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Chunk: docs/chunks/text_model - Shared text buffer & cursor model for editable widgets

//! TextBuffer owns the document and its line index.
//!
//! The document is one contiguous run of characters. Every mutation goes
//! through [`TextBuffer::replace_range`], which drops the cached
//! [`LineIndex`] before returning; the index is rebuilt lazily on the next
//! line-oriented read.
//!
//! Each mutation returns `DirtyLines` so callers can limit repainting.

use std::cell::{Cell, OnceCell};

use crate::config::LineBreaks;
use crate::error::Result;
use crate::line_index::LineIndex;
use crate::types::{DirtyLines, Location};
use crate::word;

/// The editable document plus its derived line index.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    chars: Vec<char>,
    line_breaks: LineBreaks,
    /// Cache, valid only between two mutations.
    line_index: OnceCell<LineIndex>,
    /// Number of times the line index has been (re)built.
    index_builds: Cell<u64>,
}

impl TextBuffer {
    /// Creates an empty buffer using the CR/LF/CRLF line-break rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with an explicit line-break rule.
    pub fn with_line_breaks(line_breaks: LineBreaks) -> Self {
        Self {
            line_breaks,
            ..Self::default()
        }
    }

    /// Creates a buffer initialized with the given content.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Self {
        Self {
            chars: content.chars().collect(),
            ..Self::default()
        }
    }

    // ==================== Accessors ====================

    /// Returns the line-break rule this buffer splits lines with.
    pub fn line_breaks(&self) -> LineBreaks {
        self.line_breaks
    }

    /// Returns the total character count.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns true if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Returns the document as a character slice.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Returns the full document.
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Returns the characters in `[start, end)`.
    ///
    /// Both bounds are clamped into the document; an empty range (including
    /// `start > end`) yields an empty string.
    pub fn text_range(&self, start: usize, end: usize) -> String {
        let start = self.clamp(start);
        let end = self.clamp(end);
        if start >= end {
            return String::new();
        }
        self.chars[start..end].iter().collect()
    }

    /// Clamps an offset into `[0, len]`.
    pub fn clamp(&self, offset: usize) -> usize {
        offset.min(self.chars.len())
    }

    // ==================== Lines ====================

    /// Returns the line index, building it if the cache was invalidated.
    pub fn line_index(&self) -> &LineIndex {
        self.line_index.get_or_init(|| {
            self.index_builds.set(self.index_builds.get() + 1);
            tracing::trace!(len = self.chars.len(), "rebuilding line index");
            LineIndex::build(&self.chars, self.line_breaks)
        })
    }

    /// Returns how many times the line index has been built.
    #[cfg(test)]
    pub(crate) fn index_build_count(&self) -> u64 {
        self.index_builds.get()
    }

    /// Returns every line of the document, without breaks.
    pub fn lines(&self) -> &[String] {
        self.line_index().lines()
    }

    /// Returns the number of lines. Always at least 1.
    pub fn line_count(&self) -> usize {
        self.line_index().line_count()
    }

    /// Returns the text of `line`, or `None` if out of bounds.
    pub fn line(&self, line: usize) -> Option<&str> {
        self.line_index().line(line)
    }

    /// Returns the length of `line` excluding its break, 0 if out of bounds.
    pub fn line_len(&self, line: usize) -> usize {
        self.line_index().line_len(line).unwrap_or(0)
    }

    /// Converts an offset to a `(line, column)` location.
    ///
    /// Fails if `offset` is outside `[0, len]`.
    pub fn location_of(&self, offset: usize) -> Result<Location> {
        self.line_index().location_of(offset)
    }

    /// Converts a location to an offset, clamping the column to the line.
    pub fn offset_of(&self, location: Location) -> usize {
        self.line_index().offset_of(location)
    }

    /// Returns the letters-and-digits run around `location`.
    pub fn word_range(&self, location: Location) -> (usize, usize) {
        word::word_range(&self.chars, self.offset_of(location))
    }

    /// Returns true if `offset` falls between the `\r` and `\n` of a CRLF.
    pub fn splits_crlf(&self, offset: usize) -> bool {
        self.line_breaks.splits_crlf(&self.chars, offset)
    }

    /// Line containing `offset`, using the cached index when one exists so
    /// mutations don't force a rebuild just to report damage.
    fn line_of_offset(&self, offset: usize) -> usize {
        if let Some(index) = self.line_index.get() {
            return index.line_at_offset(offset);
        }
        let mut line = 0;
        let mut at = 0;
        while at < offset {
            match self.line_breaks.break_len_at(&self.chars, at) {
                0 => at += 1,
                n => {
                    if at + n > offset {
                        break;
                    }
                    line += 1;
                    at += n;
                }
            }
        }
        line
    }

    fn is_break_char(&self, ch: char) -> bool {
        ch == '\n' || (self.line_breaks == LineBreaks::Any && ch == '\r')
    }

    // ==================== Mutations ====================

    /// Replaces `[start, end)` with `text` in a single step.
    ///
    /// Bounds are clamped and swapped into order. The line index is
    /// invalidated before returning.
    pub fn replace_range(&mut self, text: &str, start: usize, end: usize) -> DirtyLines {
        let (start, end) = {
            let a = self.clamp(start);
            let b = self.clamp(end);
            (a.min(b), a.max(b))
        };
        if start == end && text.is_empty() {
            return DirtyLines::None;
        }

        let line = self.line_of_offset(start);
        let removed_break = self.chars[start..end]
            .iter()
            .any(|&ch| self.is_break_char(ch));
        let inserted_break = text.chars().any(|ch| self.is_break_char(ch));
        // Edits touching a '\r' or '\n' can split or fuse a CRLF pair
        let touches_break = (start > 0 && self.is_break_char(self.chars[start - 1]))
            || self
                .chars
                .get(end)
                .is_some_and(|&ch| self.is_break_char(ch));

        let removed = self
            .chars
            .splice(start..end, text.chars())
            .count();
        self.line_index.take();

        tracing::trace!(start, removed, inserted = text.chars().count(), "replace_range");

        if removed_break || inserted_break || touches_break {
            DirtyLines::FromLineToEnd(line)
        } else {
            DirtyLines::Single(line)
        }
    }

    /// Inserts `text` at `offset` (clamped).
    pub fn insert(&mut self, text: &str, offset: usize) -> DirtyLines {
        self.replace_range(text, offset, offset)
    }

    /// Deletes `[start, end)` (clamped).
    pub fn delete_range(&mut self, start: usize, end: usize) -> DirtyLines {
        self.replace_range("", start, end)
    }

    /// Appends `text` at the end of the document.
    pub fn append(&mut self, text: &str) -> DirtyLines {
        let len = self.len();
        self.replace_range(text, len, len)
    }

    /// Replaces the whole document.
    pub fn set_text(&mut self, text: &str) -> DirtyLines {
        self.set_chars(text.chars().collect())
    }

    /// Replaces the whole document with the given characters.
    pub fn set_chars(&mut self, chars: Vec<char>) -> DirtyLines {
        tracing::trace!(old_len = self.chars.len(), new_len = chars.len(), "set_text");
        self.chars = chars;
        self.line_index.take();
        DirtyLines::FromLineToEnd(0)
    }
}

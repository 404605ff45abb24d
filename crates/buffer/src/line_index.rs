// Chunk: docs/chunks/text_model - Shared text buffer & cursor model for editable widgets

//! Line index derived from the document text.
//!
//! The index is a cache: [`TextBuffer`](crate::TextBuffer) builds it with a
//! single O(n) scan on first access after a mutation and drops it on the next
//! mutation. Editor widgets hold small documents, so no incremental update is
//! attempted.

use crate::config::LineBreaks;
use crate::error::{ModelError, Result};
use crate::types::Location;

/// Character extent of one line within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineSpan {
    /// Offset of the first character of the line.
    start: usize,
    /// Number of characters before the line break.
    len: usize,
    /// Length of the terminating break: 0 for the last line, 2 for `\r\n`.
    break_len: usize,
}

impl LineSpan {
    /// Largest column that still maps back inside this line. Only differs
    /// from `len` for a CRLF-terminated line, where the offset between `\r`
    /// and `\n` belongs to the line.
    fn max_column(&self) -> usize {
        self.len + self.break_len.saturating_sub(1)
    }
}

/// Ordered line substrings of a document, split on the configured breaks.
///
/// A document always has at least one line: `""` yields `[""]` and a trailing
/// break yields a final empty line.
#[derive(Debug, Clone)]
pub struct LineIndex {
    spans: Vec<LineSpan>,
    lines: Vec<String>,
    total_len: usize,
}

impl LineIndex {
    /// Scans `chars` once and records every line.
    pub fn build(chars: &[char], line_breaks: LineBreaks) -> Self {
        let mut spans = Vec::new();
        let mut lines = Vec::new();
        let mut start = 0;
        let mut at = 0;

        while at < chars.len() {
            let break_len = line_breaks.break_len_at(chars, at);
            if break_len == 0 {
                at += 1;
                continue;
            }
            spans.push(LineSpan {
                start,
                len: at - start,
                break_len,
            });
            lines.push(chars[start..at].iter().collect());
            at += break_len;
            start = at;
        }

        spans.push(LineSpan {
            start,
            len: chars.len() - start,
            break_len: 0,
        });
        lines.push(chars[start..].iter().collect());

        Self {
            spans,
            lines,
            total_len: chars.len(),
        }
    }

    /// Returns the number of lines. Always at least 1.
    pub fn line_count(&self) -> usize {
        self.spans.len()
    }

    /// Returns every line's text, without breaks.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the text of `line`, or `None` if out of bounds.
    pub fn line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(String::as_str)
    }

    /// Returns the offset where `line` starts.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.spans.get(line).map(|span| span.start)
    }

    /// Returns the offset of the first character after `line`'s text, i.e.
    /// the position of its line break (or the document end).
    pub fn line_end(&self, line: usize) -> Option<usize> {
        self.spans.get(line).map(|span| span.start + span.len)
    }

    /// Returns the length of `line` excluding its break.
    pub fn line_len(&self, line: usize) -> Option<usize> {
        self.spans.get(line).map(|span| span.len)
    }

    /// Returns the document length the index was built from.
    pub fn total_len(&self) -> usize {
        self.total_len
    }

    /// Returns the line containing `offset`.
    ///
    /// Offsets that point into a line break belong to the line the break
    /// terminates. Offsets past the end map to the last line.
    pub fn line_at_offset(&self, offset: usize) -> usize {
        match self.spans.binary_search_by(|span| span.start.cmp(&offset)) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        }
    }

    /// Converts an offset to a location.
    ///
    /// Fails with [`ModelError::OffsetOutOfRange`] if `offset` is past the end.
    pub fn location_of(&self, offset: usize) -> Result<Location> {
        if offset > self.total_len {
            return Err(ModelError::OffsetOutOfRange {
                offset,
                len: self.total_len,
            });
        }
        let line = self.line_at_offset(offset);
        let column = offset - self.spans[line].start;
        Ok(Location::new(line, column))
    }

    /// Converts a location to an offset, clamping rather than failing.
    ///
    /// The column is clamped to the line's length; a line past the last one
    /// maps to the end of the document.
    pub fn offset_of(&self, location: Location) -> usize {
        match self.spans.get(location.line) {
            Some(span) => span.start + location.column.min(span.max_column()),
            None => self.total_len,
        }
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::build(&[], LineBreaks::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(text: &str) -> LineIndex {
        let chars: Vec<char> = text.chars().collect();
        LineIndex::build(&chars, LineBreaks::Any)
    }

    fn build_lf(text: &str) -> LineIndex {
        let chars: Vec<char> = text.chars().collect();
        LineIndex::build(&chars, LineBreaks::LfOnly)
    }

    #[test]
    fn test_empty_document_has_one_empty_line() {
        let index = build("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.lines(), &[String::new()]);
        assert_eq!(index.line_start(0), Some(0));
    }

    #[test]
    fn test_single_line() {
        let index = build("hello");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line(0), Some("hello"));
        assert_eq!(index.line_len(0), Some(5));
    }

    #[test]
    fn test_trailing_break_yields_empty_line() {
        let index = build("a\n");
        assert_eq!(index.lines(), &["a".to_string(), String::new()]);
    }

    #[test]
    fn test_multiple_lines() {
        let index = build("hello\nworld\n");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_start(0), Some(0));
        assert_eq!(index.line_start(1), Some(6));
        assert_eq!(index.line_start(2), Some(12));
        assert_eq!(index.line_end(0), Some(5));
    }

    #[test]
    fn test_mixed_breaks_any() {
        let index = build("a\r\nb\rc\nd");
        assert_eq!(
            index.lines(),
            &["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()]
        );
        assert_eq!(index.line_start(1), Some(3));
        assert_eq!(index.line_start(2), Some(5));
        assert_eq!(index.line_start(3), Some(7));
    }

    #[test]
    fn test_lf_only_keeps_carriage_returns() {
        let index = build_lf("a\r\nb\rc");
        assert_eq!(index.lines(), &["a\r".to_string(), "b\rc".to_string()]);
    }

    #[test]
    fn test_consecutive_carriage_returns() {
        let index = build("\r\r\n\n");
        assert_eq!(index.line_count(), 4);
        assert!(index.lines().iter().all(String::is_empty));
    }

    #[test]
    fn test_line_at_offset() {
        let index = build("hello\nworld\nfoo");
        assert_eq!(index.line_at_offset(0), 0);
        assert_eq!(index.line_at_offset(5), 0); // '\n'
        assert_eq!(index.line_at_offset(6), 1);
        assert_eq!(index.line_at_offset(11), 1);
        assert_eq!(index.line_at_offset(12), 2);
        assert_eq!(index.line_at_offset(15), 2);
    }

    #[test]
    fn test_location_of() {
        let index = build("line1\nline2\nline3");
        assert_eq!(index.location_of(6), Ok(Location::new(1, 0)));
        assert_eq!(index.location_of(17), Ok(Location::new(2, 5)));
        assert_eq!(
            index.location_of(18),
            Err(ModelError::OffsetOutOfRange { offset: 18, len: 17 })
        );
    }

    #[test]
    fn test_offset_of_clamps_column() {
        let index = build("ab\ncdef");
        assert_eq!(index.offset_of(Location::new(1, 0)), 3);
        assert_eq!(index.offset_of(Location::new(0, 99)), 2);
        assert_eq!(index.offset_of(Location::new(1, 99)), 7);
        assert_eq!(index.offset_of(Location::new(9, 0)), 7);
    }

    #[test]
    fn test_offset_inside_crlf_round_trips() {
        let index = build("ab\r\ncd");
        let location = index.location_of(3).unwrap();
        assert_eq!(location, Location::new(0, 3));
        assert_eq!(index.offset_of(location), 3);
        // One past the pair is the next line
        assert_eq!(index.location_of(4), Ok(Location::new(1, 0)));
    }
}

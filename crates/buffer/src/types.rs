// Chunk: docs/chunks/text_model - Shared text buffer & cursor model for editable widgets

use serde::{Deserialize, Serialize};

/// A (line, column) pair where both are 0-indexed.
///
/// `column` counts characters within the line's text, excluding the line break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

/// Information about which lines were dirtied by a mutation.
///
/// Renderers drain the accumulated value after each input event and repaint
/// only the affected lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirtyLines {
    /// No lines changed (cursor-only movement, no-op edit).
    #[default]
    None,
    /// A single line changed.
    Single(usize),
    /// A range of lines changed, `[from, to)`.
    Range { from: usize, to: usize },
    /// Everything from a line to the end of the document changed.
    /// Used whenever the number of lines changes.
    FromLineToEnd(usize),
}

impl DirtyLines {
    /// Returns true if no lines were dirtied.
    pub fn is_none(&self) -> bool {
        matches!(self, DirtyLines::None)
    }

    /// Returns the starting line of the dirty region, if any.
    pub fn start_line(&self) -> Option<usize> {
        match self {
            DirtyLines::None => None,
            DirtyLines::Single(line) => Some(*line),
            DirtyLines::Range { from, .. } => Some(*from),
            DirtyLines::FromLineToEnd(line) => Some(*line),
        }
    }

    /// Returns true if `line` falls inside the dirty region.
    pub fn contains(&self, line: usize) -> bool {
        match *self {
            DirtyLines::None => false,
            DirtyLines::Single(l) => l == line,
            DirtyLines::Range { from, to } => (from..to).contains(&line),
            DirtyLines::FromLineToEnd(from) => line >= from,
        }
    }

    /// Merges another dirty region into this one, producing the smallest
    /// region that covers both.
    pub fn merge(&mut self, other: DirtyLines) {
        *self = match (*self, other) {
            (DirtyLines::None, other) => other,
            (this, DirtyLines::None) => this,

            (DirtyLines::FromLineToEnd(a), other) | (other, DirtyLines::FromLineToEnd(a)) => {
                // `other` is never None here, both arms above caught it
                let b = other.start_line().unwrap_or(a);
                DirtyLines::FromLineToEnd(a.min(b))
            }

            (DirtyLines::Single(a), DirtyLines::Single(b)) if a == b => DirtyLines::Single(a),
            (DirtyLines::Single(a), DirtyLines::Single(b)) => DirtyLines::Range {
                from: a.min(b),
                to: a.max(b) + 1,
            },

            (DirtyLines::Single(a), DirtyLines::Range { from, to })
            | (DirtyLines::Range { from, to }, DirtyLines::Single(a)) => DirtyLines::Range {
                from: from.min(a),
                to: to.max(a + 1),
            },

            (DirtyLines::Range { from: a, to: b }, DirtyLines::Range { from: c, to: d }) => {
                DirtyLines::Range {
                    from: a.min(c),
                    to: b.max(d),
                }
            }
        };
    }
}

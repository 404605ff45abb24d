// Chunk: docs/chunks/text_view_trait - Read interface consumed by renderers
//!
//! Read-only view of an editable text model.
//!
//! Renderers, scroll synchronization and accessibility bridges consume the
//! model only through [`TextView`]. They are told *that* something changed
//! by a [`ModelEvent`](crate::ModelEvent) and then pull whatever they need from
//! here; [`TextView::take_dirty`] tells them *where*.
//!
//! The trait is object-safe, so hosts can hold `&dyn TextView`.

use crate::types::{DirtyLines, Location};

/// Everything a renderer needs to draw the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretInfo {
    pub offset: usize,
    pub location: Location,
    /// False for read-only models, which hosts usually draw without a caret.
    pub visible: bool,
}

impl CaretInfo {
    pub fn new(offset: usize, location: Location, visible: bool) -> Self {
        Self {
            offset,
            location,
            visible,
        }
    }
}

pub trait TextView {
    /// Returns the number of lines available for display.
    fn line_count(&self) -> usize;

    /// Returns the text to display for `line`, masked in password mode.
    ///
    /// Returns `None` if the line index is out of bounds.
    fn display_line(&self, line: usize) -> Option<String>;

    /// Returns the length of the specified line in characters.
    ///
    /// Returns 0 if the line index is out of bounds.
    fn line_len(&self, line: usize) -> usize;

    /// Drains the damage accumulated since the last call.
    fn take_dirty(&mut self) -> DirtyLines;

    /// Returns whether the model accepts interactive edits.
    fn is_editable(&self) -> bool;

    fn caret_info(&self) -> CaretInfo;

    /// Returns the selection as locations in document order, or `None` when
    /// the cursor is collapsed.
    fn selection_range(&self) -> Option<(Location, Location)> {
        None
    }
}

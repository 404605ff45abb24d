// Chunk: docs/chunks/text_model - Shared text buffer & cursor model for editable widgets
// Chunk: docs/chunks/text_selection_model - Selection anchor and range API

//! Caret and selection over a [`TextBuffer`].
//!
//! The cursor is two offsets: the *anchor*, which stays put during an extend
//! gesture, and the *active* end, which moves and is where the caret is drawn.
//! They are not ordered; [`Cursor::selection_low`] and
//! [`Cursor::selection_high`] give the document-order view.
//!
//! Movement methods take the buffer they navigate and return `true` when the
//! cursor actually changed, so the owner knows whether to raise
//! `SelectionChanged`.

use crate::config::ClearRule;
use crate::text_buffer::TextBuffer;
use crate::types::Location;
use crate::word;

/// Whether the cursor currently spans a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    Collapsed,
    Ranged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    /// `None` only after `clear_selection` under [`ClearRule::Detach`].
    anchor: Option<usize>,
    active: usize,
    clear_rule: ClearRule,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(ClearRule::default())
    }
}

impl Cursor {
    /// Creates a collapsed cursor at offset 0.
    pub fn new(clear_rule: ClearRule) -> Self {
        Self {
            anchor: Some(0),
            active: 0,
            clear_rule,
        }
    }

    // ==================== Accessors ====================

    /// The fixed end of the selection, if one is set.
    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// The moving end of the selection.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Where input is inserted. Always the active end.
    pub fn caret_offset(&self) -> usize {
        self.active
    }

    pub fn clear_rule(&self) -> ClearRule {
        self.clear_rule
    }

    pub fn selection_low(&self) -> usize {
        self.anchor.map_or(self.active, |anchor| anchor.min(self.active))
    }

    pub fn selection_high(&self) -> usize {
        self.anchor.map_or(self.active, |anchor| anchor.max(self.active))
    }

    /// Returns true if the cursor spans a non-empty range.
    pub fn is_selected(&self) -> bool {
        self.selection_low() != self.selection_high()
    }

    pub fn state(&self) -> CursorState {
        if self.is_selected() {
            CursorState::Ranged
        } else {
            CursorState::Collapsed
        }
    }

    /// Number of selected characters.
    pub fn selection_count(&self) -> usize {
        self.selection_high() - self.selection_low()
    }

    /// Returns the selected text, or an empty string when collapsed.
    pub fn selected_text(&self, buffer: &TextBuffer) -> String {
        if !self.is_selected() {
            return String::new();
        }
        buffer.text_range(self.selection_low(), self.selection_high())
    }

    /// Location of the caret in `buffer`.
    pub fn caret_location(&self, buffer: &TextBuffer) -> Location {
        buffer
            .location_of(buffer.clamp(self.active))
            .unwrap_or_default()
    }

    // ==================== Normalization ====================

    /// Re-clamps both ends into `[0, len]`. Returns true if anything moved.
    pub fn clamp_to(&mut self, len: usize) -> bool {
        let before = (self.anchor, self.active);
        self.anchor = self.anchor.map(|anchor| anchor.min(len));
        self.active = self.active.min(len);
        before != (self.anchor, self.active)
    }

    /// Core state transition shared by every caret move.
    ///
    /// Extending pins the anchor at the pre-move caret if none is set and
    /// moves only the active end; otherwise the cursor collapses at `offset`
    /// following the clear rule.
    fn move_to(&mut self, offset: usize, extend: bool) -> bool {
        let before = (self.anchor, self.active);
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.active);
            }
        } else {
            self.anchor = match self.clear_rule {
                ClearRule::CollapseToCaret => Some(offset),
                ClearRule::Detach => None,
            };
        }
        self.active = offset;
        before != (self.anchor, self.active)
    }

    // ==================== Selection ====================

    /// Collapses the cursor at `offset` (clamped).
    pub fn set_selection(&mut self, offset: usize, buffer: &TextBuffer) -> bool {
        let before = (self.anchor, self.active);
        let offset = buffer.clamp(offset);
        self.anchor = Some(offset);
        self.active = offset;
        before != (self.anchor, self.active)
    }

    /// Selects from `from` (anchor) to `to` (active, caret), both clamped.
    pub fn set_selection_range(&mut self, from: usize, to: usize, buffer: &TextBuffer) -> bool {
        let before = (self.anchor, self.active);
        self.anchor = Some(buffer.clamp(from));
        self.active = buffer.clamp(to);
        before != (self.anchor, self.active)
    }

    /// Drops the selection, keeping the caret where it is.
    pub fn clear_selection(&mut self) -> bool {
        let before = self.anchor;
        self.anchor = match self.clear_rule {
            ClearRule::CollapseToCaret => Some(self.active),
            ClearRule::Detach => None,
        };
        before != self.anchor
    }

    /// Selects the whole document with the caret at the end.
    pub fn select_all(&mut self, buffer: &TextBuffer) -> bool {
        self.set_selection_range(0, buffer.len(), buffer)
    }

    // ==================== Movement ====================

    /// Moves the caret one character left. A CRLF pair counts as one
    /// character.
    pub fn move_left(&mut self, buffer: &TextBuffer, extend: bool) -> bool {
        let caret = buffer.clamp(self.active);
        let mut target = caret.saturating_sub(1);
        if buffer.splits_crlf(target) {
            target -= 1;
        }
        self.move_to(target, extend)
    }

    /// Moves the caret one character right. A CRLF pair counts as one
    /// character.
    pub fn move_right(&mut self, buffer: &TextBuffer, extend: bool) -> bool {
        let caret = buffer.clamp(self.active);
        let mut target = buffer.clamp(caret + 1);
        if buffer.splits_crlf(target) {
            target += 1;
        }
        self.move_to(target, extend)
    }

    /// Moves the caret one line up, keeping the column where the line is
    /// long enough. Does nothing on the first line.
    pub fn move_up(&mut self, buffer: &TextBuffer, extend: bool) -> bool {
        let location = self.caret_location(buffer);
        if location.line == 0 {
            return false;
        }
        self.move_to_line(buffer, location.line - 1, location.column, extend)
    }

    /// Moves the caret one line down. Does nothing on the last line.
    pub fn move_down(&mut self, buffer: &TextBuffer, extend: bool) -> bool {
        let location = self.caret_location(buffer);
        if location.line + 1 >= buffer.line_count() {
            return false;
        }
        self.move_to_line(buffer, location.line + 1, location.column, extend)
    }

    fn move_to_line(&mut self, buffer: &TextBuffer, line: usize, column: usize, extend: bool) -> bool {
        // Clamp to the visible text so the caret never lands inside a CRLF
        let column = column.min(buffer.line_len(line));
        let target = buffer.offset_of(Location::new(line, column));
        self.move_to(target, extend)
    }

    pub fn move_to_line_start(&mut self, buffer: &TextBuffer, extend: bool) -> bool {
        let line = self.caret_location(buffer).line;
        let target = buffer.offset_of(Location::new(line, 0));
        self.move_to(target, extend)
    }

    pub fn move_to_line_end(&mut self, buffer: &TextBuffer, extend: bool) -> bool {
        let line = self.caret_location(buffer).line;
        self.move_to_line(buffer, line, usize::MAX, extend)
    }

    pub fn move_to_text_start(&mut self, extend: bool) -> bool {
        self.move_to(0, extend)
    }

    pub fn move_to_text_end(&mut self, buffer: &TextBuffer, extend: bool) -> bool {
        self.move_to(buffer.len(), extend)
    }

    pub fn move_to_previous_word(&mut self, buffer: &TextBuffer, extend: bool) -> bool {
        let target = word::previous_word_start(buffer.chars(), buffer.clamp(self.active));
        self.move_to(target, extend)
    }

    pub fn move_to_next_word(&mut self, buffer: &TextBuffer, extend: bool) -> bool {
        let target = word::next_word_end(buffer.chars(), buffer.clamp(self.active));
        self.move_to(target, extend)
    }

    /// Moves only the active end to `offset` (clamped), as a pointer drag
    /// does.
    pub fn extend_to(&mut self, offset: usize, buffer: &TextBuffer) -> bool {
        self.move_to(buffer.clamp(offset), true)
    }
}

// Chunk: docs/chunks/text_model - Shared text buffer & cursor model for editable widgets
// Chunk: docs/chunks/change_notification - Deferred text/selection change notification

//! TextModel: the buffer, cursor and notifier the editable widgets embed.
//!
//! There are two mutation surfaces:
//!
//! - Programmatic edits (`insert`, `replace_range`, `set_text`, ...) apply
//!   unconditionally at explicit offsets.
//! - Interactive edits (`insert_at_caret`, `remove_char_before_caret`,
//!   `handle_new_line`, `paste`, ...) act on the caret/selection and honour
//!   the editable flag, the text limit and the verify hook.
//!
//! After every mutation the cursor is re-clamped to the new document length.
//! Events raised during a call are delivered once the call has finished.

use std::fmt;

use crate::config::ModelConfig;
use crate::cursor::{Cursor, CursorState};
use crate::error::{ModelError, Result};
use crate::notifier::{ChangeNotifier, ListenerId, ModelListener};
use crate::text_buffer::TextBuffer;
use crate::text_view::{CaretInfo, TextView};
use crate::types::{DirtyLines, Location};

/// A proposed edit shown to the verify hook before it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyEvent<'a> {
    /// Text about to be inserted. Empty for pure deletions.
    pub text: &'a str,
    /// Start of the replaced range.
    pub start: usize,
    /// End of the replaced range.
    pub end: usize,
}

/// Returns the text to insert instead, or `None` to cancel the edit.
pub type VerifyHook = Box<dyn FnMut(&VerifyEvent<'_>) -> Option<String>>;

pub struct TextModel {
    buffer: TextBuffer,
    cursor: Cursor,
    notifier: ChangeNotifier,
    config: ModelConfig,
    /// Damage accumulated since the renderer last drained it.
    dirty: DirtyLines,
    verify: Option<VerifyHook>,
}

impl Default for TextModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TextModel {
    /// Creates an empty multi-line model with default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(ModelConfig::default())
    }

    /// Creates an empty model. Fails if `config` does not validate.
    pub fn with_config(config: ModelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: ModelConfig) -> Self {
        Self {
            buffer: TextBuffer::with_line_breaks(config.line_breaks),
            cursor: Cursor::new(config.clear_rule),
            notifier: ChangeNotifier::new(),
            config,
            dirty: DirtyLines::None,
            verify: None,
        }
    }

    /// Creates a model holding `text` with the caret at offset 0.
    pub fn with_text(text: &str) -> Self {
        let mut model = Self::new();
        model.buffer.set_text(text);
        model
    }

    // ==================== Components ====================

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    // ==================== Listeners ====================

    /// Registers a listener for text and selection changes.
    pub fn subscribe<L>(&mut self, listener: L) -> ListenerId
    where
        L: ModelListener + 'static,
    {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Delivers queued events to every listener.
    fn flush(&mut self) {
        let Some(mut delivery) = self.notifier.begin_delivery() else {
            return;
        };
        for &event in &delivery.events {
            for (_, listener) in delivery.listeners.iter_mut() {
                listener.on_event(event, self);
            }
        }
        self.notifier.end_delivery(delivery.listeners);
    }

    /// Records a completed text mutation and re-clamps the cursor.
    fn text_changed(&mut self, dirty: DirtyLines) {
        self.dirty.merge(dirty);
        self.notifier.notify_text_modified();
        if self.cursor.clamp_to(self.buffer.len()) {
            self.notifier.notify_selection_changed();
        }
    }

    fn selection_changed(&mut self, changed: bool) {
        if changed {
            self.notifier.notify_selection_changed();
        }
    }

    // ==================== Text queries ====================

    /// Returns the full document.
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Returns `[start, end)`, clamped; empty if `start >= end`.
    pub fn text_range(&self, start: usize, end: usize) -> String {
        self.buffer.text_range(start, end)
    }

    pub fn char_count(&self) -> usize {
        self.buffer.len()
    }

    pub fn lines(&self) -> &[String] {
        self.buffer.lines()
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    pub fn line(&self, line: usize) -> Option<&str> {
        self.buffer.line(line)
    }

    /// Converts an offset to a location. Fails outside `[0, len]`.
    pub fn location_of(&self, offset: usize) -> Result<Location> {
        self.buffer.location_of(offset)
    }

    /// Converts a location to an offset, clamping the column.
    pub fn offset_of(&self, location: Location) -> usize {
        self.buffer.offset_of(location)
    }

    /// Returns the letters-and-digits run around `location` as `(from, to)`.
    pub fn word_range(&self, location: Location) -> (usize, usize) {
        self.buffer.word_range(location)
    }

    /// Returns the delimiter `handle_new_line` inserts.
    pub fn line_delimiter(&self) -> &str {
        &self.config.line_delimiter
    }

    /// The document as it should be displayed: masked in password mode.
    pub fn display_text(&self) -> String {
        match self.config.mask_char() {
            Some(mask) => std::iter::repeat(mask).take(self.buffer.len()).collect(),
            None => self.buffer.text(),
        }
    }

    /// Every line as it should be displayed.
    pub fn display_lines(&self) -> Vec<String> {
        (0..self.line_count())
            .filter_map(|line| self.display_line(line))
            .collect()
    }

    // ==================== Cursor queries ====================

    pub fn caret_offset(&self) -> usize {
        self.cursor.caret_offset()
    }

    pub fn caret_location(&self) -> Location {
        self.cursor.caret_location(&self.buffer)
    }

    /// Zero-based line of the caret. Single-line models always report 0.
    pub fn caret_line_number(&self) -> usize {
        if !self.config.multi_line {
            return 0;
        }
        self.caret_location().line
    }

    pub fn anchor(&self) -> Option<usize> {
        self.cursor.anchor()
    }

    pub fn selection_low(&self) -> usize {
        self.cursor.selection_low()
    }

    pub fn selection_high(&self) -> usize {
        self.cursor.selection_high()
    }

    /// Returns `(low, high)`; both equal the caret when nothing is selected.
    pub fn selection(&self) -> (usize, usize) {
        (self.selection_low(), self.selection_high())
    }

    pub fn is_selected(&self) -> bool {
        self.cursor.is_selected()
    }

    pub fn cursor_state(&self) -> CursorState {
        self.cursor.state()
    }

    pub fn selection_count(&self) -> usize {
        self.cursor.selection_count()
    }

    pub fn selected_text(&self) -> String {
        self.cursor.selected_text(&self.buffer)
    }

    // ==================== Programmatic edits ====================

    /// Inserts `text` at `offset` (clamped).
    pub fn insert(&mut self, text: &str, offset: usize) {
        let dirty = self.buffer.insert(text, offset);
        self.text_changed(dirty);
        self.flush();
    }

    /// Replaces `[start, end)` (clamped) with `text`. Notifies once.
    pub fn replace_range(&mut self, text: &str, start: usize, end: usize) {
        let dirty = self.buffer.replace_range(text, start, end);
        self.text_changed(dirty);
        self.flush();
    }

    pub fn delete_range(&mut self, start: usize, end: usize) {
        self.replace_range("", start, end);
    }

    /// Replaces the whole document and puts the caret at offset 0.
    ///
    /// Returns false if the verify hook cancelled the change.
    pub fn set_text(&mut self, text: &str) -> bool {
        let Some(text) = self.verify(text, 0, self.buffer.len()) else {
            return false;
        };
        let dirty = self.buffer.set_text(&text);
        self.text_changed(dirty);
        let changed = self.cursor.set_selection(0, &self.buffer);
        self.selection_changed(changed);
        self.flush();
        true
    }

    pub fn set_text_chars(&mut self, chars: &[char]) -> bool {
        let text: String = chars.iter().collect();
        self.set_text(&text)
    }

    /// Appends `text` and moves the caret to the new end.
    ///
    /// An empty append changes nothing and raises no event.
    pub fn append(&mut self, text: &str) -> bool {
        let len = self.buffer.len();
        let Some(text) = self.verify(text, len, len) else {
            return false;
        };
        if text.is_empty() {
            return false;
        }
        let dirty = self.buffer.append(&text);
        self.text_changed(dirty);
        let changed = self.cursor.set_selection(self.buffer.len(), &self.buffer);
        self.selection_changed(changed);
        self.flush();
        true
    }

    // ==================== Selection ====================

    /// Collapses the cursor at `offset` (clamped).
    pub fn set_selection(&mut self, offset: usize) {
        self.cursor.set_selection(offset, &self.buffer);
        self.notifier.notify_selection_changed();
        self.flush();
    }

    /// Selects with the anchor at `from` and the caret at `to`.
    pub fn set_selection_range(&mut self, from: usize, to: usize) {
        self.cursor.set_selection_range(from, to, &self.buffer);
        self.notifier.notify_selection_changed();
        self.flush();
    }

    pub fn clear_selection(&mut self) {
        self.cursor.clear_selection();
        self.notifier.notify_selection_changed();
        self.flush();
    }

    pub fn select_all(&mut self) {
        self.cursor.select_all(&self.buffer);
        self.notifier.notify_selection_changed();
        self.flush();
    }

    /// Pointer press: collapses the cursor at `location`.
    pub fn set_selection_start_at(&mut self, location: Location) {
        let offset = self.offset_of(location);
        self.set_selection(offset);
    }

    /// Pointer drag: moves only the active end to `location`.
    pub fn set_selection_end_at(&mut self, location: Location) {
        let offset = self.offset_of(location);
        let changed = self.cursor.extend_to(offset, &self.buffer);
        self.selection_changed(changed);
        self.flush();
    }

    /// Double-click: selects the word at `location` and returns its range.
    ///
    /// With double-click disabled the caret is only placed at `location`.
    pub fn select_word_at(&mut self, location: Location) -> (usize, usize) {
        if !self.config.double_click_enabled {
            let offset = self.offset_of(location);
            self.set_selection(offset);
            return (self.caret_offset(), self.caret_offset());
        }
        let (from, to) = self.word_range(location);
        self.set_selection_range(from, to);
        (from, to)
    }

    /// Drag after a double-click on the word `[start, end)`: returns the
    /// `(anchor, caret)` pair that covers the original word plus every whole
    /// word up to `location`.
    pub fn extend_word_selection(&self, location: Location, start: usize, end: usize) -> (usize, usize) {
        let (word_start, word_end) = self.word_range(location);
        if word_start < start {
            (end, word_start)
        } else {
            (start, word_end.max(end))
        }
    }

    // ==================== Caret movement ====================

    fn moved(&mut self, changed: bool) {
        self.selection_changed(changed);
        self.flush();
    }

    pub fn move_caret_left(&mut self, extend: bool) {
        let changed = self.cursor.move_left(&self.buffer, extend);
        self.moved(changed);
    }

    pub fn move_caret_right(&mut self, extend: bool) {
        let changed = self.cursor.move_right(&self.buffer, extend);
        self.moved(changed);
    }

    pub fn move_caret_up(&mut self, extend: bool) {
        let changed = self.cursor.move_up(&self.buffer, extend);
        self.moved(changed);
    }

    pub fn move_caret_down(&mut self, extend: bool) {
        let changed = self.cursor.move_down(&self.buffer, extend);
        self.moved(changed);
    }

    pub fn move_caret_to_line_start(&mut self, extend: bool) {
        let changed = self.cursor.move_to_line_start(&self.buffer, extend);
        self.moved(changed);
    }

    pub fn move_caret_to_line_end(&mut self, extend: bool) {
        let changed = self.cursor.move_to_line_end(&self.buffer, extend);
        self.moved(changed);
    }

    pub fn move_caret_to_text_start(&mut self, extend: bool) {
        let changed = self.cursor.move_to_text_start(extend);
        self.moved(changed);
    }

    pub fn move_caret_to_text_end(&mut self, extend: bool) {
        let changed = self.cursor.move_to_text_end(&self.buffer, extend);
        self.moved(changed);
    }

    pub fn move_caret_to_previous_word(&mut self, extend: bool) {
        let changed = self.cursor.move_to_previous_word(&self.buffer, extend);
        self.moved(changed);
    }

    pub fn move_caret_to_next_word(&mut self, extend: bool) {
        let changed = self.cursor.move_to_next_word(&self.buffer, extend);
        self.moved(changed);
    }

    // ==================== Interactive edits ====================

    fn verify(&mut self, text: &str, start: usize, end: usize) -> Option<String> {
        let Some(hook) = self.verify.as_mut() else {
            return Some(text.to_owned());
        };
        let verified = hook(&VerifyEvent { text, start, end });
        if verified.is_none() {
            tracing::debug!(start, end, "edit cancelled by verify hook");
        }
        verified
    }

    /// Truncates `text` so the document stays within the text limit once
    /// `replaced` characters have been removed.
    fn fit_to_limit(&self, text: String, replaced: usize) -> String {
        let Some(limit) = self.config.text_limit else {
            return text;
        };
        let room = limit.saturating_sub(self.buffer.len() - replaced);
        if text.chars().count() <= room {
            return text;
        }
        tracing::debug!(limit, room, "insertion truncated to text limit");
        let mut chars: Vec<char> = text.chars().collect();
        // Never keep half of a CRLF pair
        if room > 0 && chars[room - 1] == '\r' && chars[room] == '\n' {
            chars.truncate(room - 1);
        } else {
            chars.truncate(room);
        }
        chars.into_iter().collect()
    }

    /// Replaces `[start, end)` with `text` on behalf of the user and leaves
    /// a collapsed caret after the inserted text.
    fn edit_interactively(&mut self, text: &str, start: usize, end: usize) -> bool {
        if !self.config.editable {
            tracing::debug!("interactive edit ignored: model is read-only");
            return false;
        }
        let Some(text) = self.verify(text, start, end) else {
            return false;
        };
        let text = self.fit_to_limit(text, end - start);
        if text.is_empty() && start == end {
            return false;
        }

        let inserted = text.chars().count();
        tracing::trace!(start, end, inserted, "interactive edit");
        let dirty = self.buffer.replace_range(&text, start, end);
        self.text_changed(dirty);
        let changed = self.cursor.set_selection(start + inserted, &self.buffer);
        self.selection_changed(changed);
        self.flush();
        true
    }

    /// Types `text` over the selection, or at the caret.
    pub fn insert_at_caret(&mut self, text: &str) -> bool {
        let (low, high) = self.selection();
        self.edit_interactively(text, low, high)
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.insert_at_caret(ch.encode_utf8(&mut buf))
    }

    /// Enter key. Single-line models ignore it.
    pub fn handle_new_line(&mut self) -> bool {
        if !self.config.multi_line {
            return false;
        }
        let delimiter = self.config.line_delimiter.clone();
        self.insert_at_caret(&delimiter)
    }

    /// Backspace: deletes the selection, or the character before the caret.
    pub fn remove_char_before_caret(&mut self) -> bool {
        if self.is_selected() {
            let (low, high) = self.selection();
            return self.edit_interactively("", low, high);
        }
        let caret = self.buffer.clamp(self.caret_offset());
        if caret == 0 {
            return false;
        }
        let mut start = caret - 1;
        if self.buffer.splits_crlf(start) {
            start -= 1;
        }
        self.edit_interactively("", start, caret)
    }

    /// Delete key: deletes the selection, or the character after the caret.
    pub fn remove_char_after_caret(&mut self) -> bool {
        if self.is_selected() {
            let (low, high) = self.selection();
            return self.edit_interactively("", low, high);
        }
        let caret = self.buffer.clamp(self.caret_offset());
        if caret == self.buffer.len() {
            return false;
        }
        let mut end = caret + 1;
        if self.buffer.splits_crlf(end) {
            end += 1;
        }
        self.edit_interactively("", caret, end)
    }

    /// Returns the text a copy command should put on the clipboard.
    ///
    /// Password fields never yield their content.
    pub fn copy_selection(&self) -> Option<String> {
        if self.is_password_mode() || !self.is_selected() {
            return None;
        }
        Some(self.selected_text())
    }

    /// Removes the selection and returns it for the clipboard.
    pub fn cut_selection(&mut self) -> Option<String> {
        let text = self.copy_selection()?;
        let (low, high) = self.selection();
        self.edit_interactively("", low, high).then_some(text)
    }

    /// Inserts clipboard text at the caret, replacing the selection.
    pub fn paste(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.insert_at_caret(text)
    }

    // ==================== Properties ====================

    pub fn is_editable(&self) -> bool {
        self.config.editable
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.config.editable = editable;
    }

    pub fn is_multi_line(&self) -> bool {
        self.config.multi_line
    }

    pub fn text_limit(&self) -> Option<usize> {
        self.config.text_limit
    }

    /// Sets the maximum length interactive edits may produce. `None` lifts
    /// the limit. Existing text longer than the limit is left alone.
    pub fn set_text_limit(&mut self, limit: Option<usize>) -> Result<()> {
        if limit == Some(0) {
            return Err(ModelError::ZeroTextLimit);
        }
        self.config.text_limit = limit;
        Ok(())
    }

    pub fn echo_char(&self) -> Option<char> {
        self.config.echo_char
    }

    pub fn set_echo_char(&mut self, echo: Option<char>) {
        self.config.echo_char = echo;
        self.dirty.merge(DirtyLines::FromLineToEnd(0));
    }

    pub fn is_double_click_enabled(&self) -> bool {
        self.config.double_click_enabled
    }

    pub fn set_double_click_enabled(&mut self, enabled: bool) {
        self.config.double_click_enabled = enabled;
    }

    /// Placeholder hint for an empty document.
    pub fn message(&self) -> Option<&str> {
        self.config.message.as_deref()
    }

    pub fn set_message(&mut self, message: Option<String>) {
        self.config.message = message;
        if self.buffer.is_empty() {
            self.dirty.merge(DirtyLines::Single(0));
        }
    }

    pub fn is_password_mode(&self) -> bool {
        self.config.mask_char().is_some()
    }

    /// Installs a hook consulted before every verified edit.
    pub fn set_verify_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&VerifyEvent<'_>) -> Option<String> + 'static,
    {
        self.verify = Some(Box::new(hook));
    }

    pub fn clear_verify_hook(&mut self) {
        self.verify = None;
    }
}

impl TextView for TextModel {
    fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    fn display_line(&self, line: usize) -> Option<String> {
        let text = self.buffer.line(line)?;
        Some(match self.config.mask_char() {
            Some(mask) => std::iter::repeat(mask).take(text.chars().count()).collect(),
            None => text.to_owned(),
        })
    }

    fn line_len(&self, line: usize) -> usize {
        self.buffer.line_len(line)
    }

    fn take_dirty(&mut self) -> DirtyLines {
        std::mem::take(&mut self.dirty)
    }

    fn is_editable(&self) -> bool {
        self.config.editable
    }

    fn caret_info(&self) -> CaretInfo {
        CaretInfo::new(self.caret_offset(), self.caret_location(), self.config.editable)
    }

    fn selection_range(&self) -> Option<(Location, Location)> {
        if !self.is_selected() {
            return None;
        }
        let low = self.buffer.location_of(self.selection_low()).ok()?;
        let high = self.buffer.location_of(self.selection_high()).ok()?;
        Some((low, high))
    }
}

impl fmt::Debug for TextModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextModel")
            .field("buffer", &self.buffer)
            .field("cursor", &self.cursor)
            .field("notifier", &self.notifier)
            .field("config", &self.config)
            .field("dirty", &self.dirty)
            .field("verify", &self.verify.is_some())
            .finish()
    }
}

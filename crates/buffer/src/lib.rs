// Chunk: docs/chunks/text_model - Shared text buffer & cursor model for editable widgets
// Chunk: docs/chunks/text_view_trait - Read interface consumed by renderers

//! textedit-buffer: the document model behind editable text widgets.
//!
//! One [`TextModel`] owns the text, a derived line index, a selection cursor
//! and the list of parties interested in changes. Every flavour of text
//! widget (single-line, multi-line, password, read-only) embeds the same
//! model and differs only in its [`ModelConfig`].
//!
//! # Overview
//!
//! - Offsets count characters and run from 0 to the document length.
//! - Lines are split on `\n`, `\r\n` and lone `\r` (see [`LineBreaks`]).
//! - Offsets and `(line, column)` [`Location`]s convert both ways.
//! - The cursor keeps an anchor and an active end. The caret is always the
//!   active end.
//! - Observers receive [`ModelEvent`]s after each call has completed.
//!
//! # Example
//!
//! ```
//! use textedit_buffer::{Location, ModelEvent, TextModel};
//!
//! let mut model = TextModel::with_text("hello\nworld");
//! assert_eq!(model.line_count(), 2);
//! assert_eq!(model.location_of(8).unwrap(), Location::new(1, 2));
//!
//! model.subscribe(|event: ModelEvent, model: &TextModel| {
//!     if event == ModelEvent::TextModified {
//!         assert!(model.text().starts_with("Hello"));
//!     }
//! });
//!
//! model.replace_range("H", 0, 1);
//! model.set_selection_range(6, 11);
//! assert_eq!(model.selected_text(), "world");
//! ```
//!
//! # Dirty Line Tracking
//!
//! Text mutations record which lines they touched. Renderers drain that
//! damage through [`TextView::take_dirty`]:
//!
//! - `DirtyLines::None` - nothing visible changed
//! - `DirtyLines::Single(line)` - only one line changed
//! - `DirtyLines::FromLineToEnd(line)` - lines were split or joined

mod config;
mod cursor;
mod error;
mod line_index;
mod model;
mod notifier;
mod text_buffer;
mod text_view;
mod types;
mod word;

pub use config::{ClearRule, LineBreaks, ModelConfig};
pub use cursor::{Cursor, CursorState};
pub use error::{ModelError, Result};
pub use line_index::LineIndex;
pub use model::{TextModel, VerifyEvent, VerifyHook};
pub use notifier::{ChangeNotifier, ListenerId, ModelEvent, ModelListener};
pub use text_buffer::TextBuffer;
pub use text_view::{CaretInfo, TextView};
pub use types::{DirtyLines, Location};

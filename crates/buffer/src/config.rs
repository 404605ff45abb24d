// Chunk: docs/chunks/model_config - Serializable model configuration

//! Per-instance configuration for a [`TextModel`](crate::TextModel).
//!
//! The single-line editor, the multi-line text surface and the styled editor
//! all embed the same model; they differ only in the values below. Hosts
//! usually deserialize a [`ModelConfig`] from their own settings and hand it to
//! [`TextModel::with_config`](crate::TextModel::with_config).

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Which character sequences terminate a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineBreaks {
    /// `\n`, `\r` and `\r\n` each count as one break.
    #[default]
    Any,
    /// Only `\n` breaks a line; `\r` is an ordinary character.
    LfOnly,
}

impl LineBreaks {
    /// Returns the length of the line break starting at `at`, or 0 if there
    /// is none.
    pub fn break_len_at(self, chars: &[char], at: usize) -> usize {
        match (self, chars.get(at)) {
            (_, Some('\n')) => 1,
            (LineBreaks::Any, Some('\r')) => {
                if chars.get(at + 1) == Some(&'\n') {
                    2
                } else {
                    1
                }
            }
            _ => 0,
        }
    }

    /// Returns true if `at` sits between the `\r` and `\n` of a CRLF pair.
    pub fn splits_crlf(self, chars: &[char], at: usize) -> bool {
        self == LineBreaks::Any
            && at > 0
            && chars.get(at - 1) == Some(&'\r')
            && chars.get(at) == Some(&'\n')
    }
}

/// What `clear_selection` leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearRule {
    /// The anchor collapses onto the caret.
    #[default]
    CollapseToCaret,
    /// The anchor is dropped entirely until the next selection gesture.
    Detach,
}

/// Configuration shared by every widget flavour that embeds the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub line_breaks: LineBreaks,
    pub clear_rule: ClearRule,
    /// Single-line models ignore the Enter key and report one caret line.
    pub multi_line: bool,
    /// Interactive edits are ignored when false.
    pub editable: bool,
    /// Maximum number of characters interactive edits may produce.
    pub text_limit: Option<usize>,
    /// Password mode: display text is masked and copying is refused.
    pub password: bool,
    /// Mask character for display text. Setting one also enables masking.
    pub echo_char: Option<char>,
    /// Inserted by `handle_new_line`.
    pub line_delimiter: String,
    /// When false, double-click only places the caret.
    pub double_click_enabled: bool,
    /// Placeholder hint shown by hosts while the document is empty.
    pub message: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            line_breaks: LineBreaks::default(),
            clear_rule: ClearRule::default(),
            multi_line: true,
            editable: true,
            text_limit: None,
            password: false,
            echo_char: None,
            line_delimiter: "\n".to_string(),
            double_click_enabled: true,
            message: None,
        }
    }
}

impl ModelConfig {
    /// Configuration for a single-line editor.
    pub fn single_line() -> Self {
        Self {
            multi_line: false,
            ..Self::default()
        }
    }

    pub fn with_line_breaks(mut self, line_breaks: LineBreaks) -> Self {
        self.line_breaks = line_breaks;
        self
    }

    pub fn with_clear_rule(mut self, clear_rule: ClearRule) -> Self {
        self.clear_rule = clear_rule;
        self
    }

    /// Caps interactive edits at `limit` characters. Zero fails
    /// [`validate`](Self::validate).
    pub fn with_text_limit(mut self, limit: usize) -> Self {
        self.text_limit = Some(limit);
        self
    }

    /// Configuration for a single-line password field.
    pub fn password() -> Self {
        Self {
            multi_line: false,
            password: true,
            ..Self::default()
        }
    }

    pub fn with_echo_char(mut self, echo: char) -> Self {
        self.echo_char = Some(echo);
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_double_click(mut self, enabled: bool) -> Self {
        self.double_click_enabled = enabled;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Checks the values a model cannot work with.
    ///
    /// A text limit of zero would refuse every interactive edit.
    pub fn validate(&self) -> Result<()> {
        if self.text_limit == Some(0) {
            return Err(ModelError::ZeroTextLimit);
        }
        Ok(())
    }

    /// The character display text is masked with, if any.
    pub fn mask_char(&self) -> Option<char> {
        match (self.password, self.echo_char) {
            (_, Some(echo)) => Some(echo),
            (true, None) => Some('*'),
            (false, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_len_any() {
        let chars: Vec<char> = "a\r\nb\rc\nd".chars().collect();
        assert_eq!(LineBreaks::Any.break_len_at(&chars, 0), 0);
        assert_eq!(LineBreaks::Any.break_len_at(&chars, 1), 2);
        assert_eq!(LineBreaks::Any.break_len_at(&chars, 4), 1);
        assert_eq!(LineBreaks::Any.break_len_at(&chars, 6), 1);
        assert_eq!(LineBreaks::Any.break_len_at(&chars, 99), 0);
    }

    #[test]
    fn test_break_len_lf_only() {
        let chars: Vec<char> = "a\r\nb\rc".chars().collect();
        assert_eq!(LineBreaks::LfOnly.break_len_at(&chars, 1), 0);
        assert_eq!(LineBreaks::LfOnly.break_len_at(&chars, 2), 1);
        assert_eq!(LineBreaks::LfOnly.break_len_at(&chars, 4), 0);
    }

    #[test]
    fn test_splits_crlf() {
        let chars: Vec<char> = "a\r\nb".chars().collect();
        assert!(LineBreaks::Any.splits_crlf(&chars, 2));
        assert!(!LineBreaks::Any.splits_crlf(&chars, 1));
        assert!(!LineBreaks::LfOnly.splits_crlf(&chars, 2));
    }

    #[test]
    fn test_default_config() {
        let config = ModelConfig::default();
        assert!(config.multi_line);
        assert!(config.editable);
        assert_eq!(config.line_breaks, LineBreaks::Any);
        assert_eq!(config.clear_rule, ClearRule::CollapseToCaret);
        assert_eq!(config.line_delimiter, "\n");
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: ModelConfig = serde_json::from_str(
            r#"{ "line_breaks": "lf_only", "clear_rule": "detach", "text_limit": 10 }"#,
        )
        .unwrap();
        assert_eq!(config.line_breaks, LineBreaks::LfOnly);
        assert_eq!(config.clear_rule, ClearRule::Detach);
        assert_eq!(config.text_limit, Some(10));
        assert!(config.multi_line);
        assert!(config.echo_char.is_none());
    }

    #[test]
    fn test_single_line_builder() {
        let config = ModelConfig::single_line().with_echo_char('•').with_text_limit(8);
        assert!(!config.multi_line);
        assert_eq!(config.echo_char, Some('•'));
        assert_eq!(config.text_limit, Some(8));
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        assert_eq!(ModelConfig::default().validate(), Ok(()));
        assert_eq!(ModelConfig::default().with_text_limit(1).validate(), Ok(()));
        assert_eq!(
            ModelConfig::default().with_text_limit(0).validate(),
            Err(ModelError::ZeroTextLimit)
        );

        let loaded: ModelConfig = serde_json::from_str(r#"{ "text_limit": 0 }"#).unwrap();
        assert_eq!(loaded.validate(), Err(ModelError::ZeroTextLimit));
    }

    #[test]
    fn test_double_click_and_message_defaults() {
        let config: ModelConfig =
            serde_json::from_str(r#"{ "double_click_enabled": false, "message": "Search" }"#)
                .unwrap();
        assert!(!config.double_click_enabled);
        assert_eq!(config.message.as_deref(), Some("Search"));

        let config = ModelConfig::default();
        assert!(config.double_click_enabled);
        assert!(config.message.is_none());
    }

    #[test]
    fn test_mask_char() {
        assert_eq!(ModelConfig::default().mask_char(), None);
        assert_eq!(ModelConfig::password().mask_char(), Some('*'));
        assert_eq!(ModelConfig::password().with_echo_char('#').mask_char(), Some('#'));
        assert_eq!(ModelConfig::default().with_echo_char('#').mask_char(), Some('#'));
    }
}

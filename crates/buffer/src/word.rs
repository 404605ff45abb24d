// Chunk: docs/chunks/word_navigation - Word selection and word-wise caret movement

//! Word helpers over character slices.
//!
//! Two notions of "word" are in play:
//!
//! - [`word_range`] expands over letters and digits only. It backs
//!   double-click selection.
//! - [`previous_word_start`] / [`next_word_end`] use Unicode word boundaries
//!   (UAX #29) and back Option/Ctrl+Arrow navigation, so punctuation runs and
//!   whitespace are skipped the way platform text fields do.

use unicode_segmentation::UnicodeSegmentation;

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric()
}

/// Expands left and right from `offset` while characters are letters or
/// digits. Returns `(from, to)`; both equal `offset` when it touches no word.
pub fn word_range(chars: &[char], offset: usize) -> (usize, usize) {
    let offset = offset.min(chars.len());

    let mut from = offset;
    while from > 0 && is_word_char(chars[from - 1]) {
        from -= 1;
    }

    let mut to = offset;
    while to < chars.len() && is_word_char(chars[to]) {
        to += 1;
    }

    (from, to)
}

/// Char ranges of the word-like segments of `chars`, in order.
fn word_segments(chars: &[char]) -> Vec<(usize, usize)> {
    let text: String = chars.iter().collect();
    let mut segments = Vec::new();
    let mut char_idx = 0;

    for segment in text.split_word_bounds() {
        let len = segment.chars().count();
        if segment.chars().any(is_word_char) {
            segments.push((char_idx, char_idx + len));
        }
        char_idx += len;
    }

    segments
}

/// Returns the start of the word that begins before `offset`, or 0.
///
/// From inside a word this is the start of that word; from its start it is
/// the start of the previous word.
pub fn previous_word_start(chars: &[char], offset: usize) -> usize {
    let offset = offset.min(chars.len());
    if offset == 0 {
        return 0;
    }
    word_segments(chars)
        .into_iter()
        .rev()
        .find(|&(start, _)| start < offset)
        .map_or(0, |(start, _)| start)
}

/// Returns the end of the word that ends after `offset`, or the text end.
pub fn next_word_end(chars: &[char], offset: usize) -> usize {
    let offset = offset.min(chars.len());
    if offset == chars.len() {
        return offset;
    }
    word_segments(chars)
        .into_iter()
        .find(|&(_, end)| end > offset)
        .map_or(chars.len(), |(_, end)| end)
}

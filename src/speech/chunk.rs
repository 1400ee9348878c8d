//! Sentence chunking
//!
//! Long texts are split into sentence-sized utterances because the engine
//! silently truncates very long ones. Runs end at `.`, `!` or `?`; text
//! with no terminator at all becomes a single chunk.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SENTENCE_RE: Regex = Regex::new(r"[^.!?]*[.!?]+").unwrap();
}

/// Split text into sentence-terminated chunks, keeping any unterminated
/// tail as a final chunk.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut last_end = 0;

    for m in SENTENCE_RE.find_iter(text) {
        let chunk = m.as_str().trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }
        last_end = m.end();
    }

    let tail = text[last_end..].trim();
    if !tail.is_empty() {
        chunks.push(tail.to_string());
    }

    if chunks.is_empty() {
        return vec![text.to_string()];
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_terminators() {
        let chunks = split_sentences("One. Two! Three?");
        assert_eq!(chunks, vec!["One.", "Two!", "Three?"]);
    }

    #[test]
    fn test_terminator_runs_stay_together() {
        let chunks = split_sentences("Wait... really?!");
        assert_eq!(chunks, vec!["Wait...", "really?!"]);
    }

    #[test]
    fn test_no_terminator_is_one_chunk() {
        let chunks = split_sentences("no punctuation at all");
        assert_eq!(chunks, vec!["no punctuation at all"]);
    }

    #[test]
    fn test_unterminated_tail_is_kept() {
        let chunks = split_sentences("First sentence. trailing words");
        assert_eq!(chunks, vec!["First sentence.", "trailing words"]);
    }

    #[test]
    fn test_empty_text() {
        let chunks = split_sentences("");
        assert_eq!(chunks, vec![""]);
    }
}

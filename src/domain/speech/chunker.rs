//! Splits story text into provider-safe chunks on sentence boundaries.

use once_cell::sync::Lazy;
use regex::Regex;

/// Character ceiling for a single synthesis request
pub const MAX_CHUNK_CHARS: usize = 4000;

static SENTENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]*[.!?]+").expect("valid sentence pattern"));

/// Sentence-like units: runs of text ending in terminal punctuation, plus any
/// unterminated trailing text as a final unit
fn sentences(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut last_end = 0;

    for found in SENTENCE_PATTERN.find_iter(text) {
        units.push(found.as_str());
        last_end = found.end();
    }

    if last_end < text.len() {
        units.push(&text[last_end..]);
    }

    units
}

/// Greedily pack sentences into chunks of at most `max_chars` characters.
///
/// A sentence is never split: one longer than `max_chars` becomes its own
/// oversized chunk. Chunks are trimmed and whitespace-only chunks are dropped.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for sentence in sentences(text) {
        let sentence_len = sentence.chars().count();

        if current_len + sentence_len > max_chars {
            push_trimmed(&mut chunks, &current);
            current.clear();
            current_len = 0;
        }

        current.push_str(sentence);
        current_len += sentence_len;
    }

    push_trimmed(&mut chunks, &current);
    chunks
}

fn push_trimmed(chunks: &mut Vec<String>, chunk: &str) {
    let trimmed = chunk.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

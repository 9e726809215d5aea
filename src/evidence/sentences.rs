use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

static SENTENCE_END_RE: OnceLock<Regex> = OnceLock::new();

/// Split text after `.`, `!` or `?` followed by whitespace
///
/// The punctuation stays with its sentence; the whitespace is dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let re = SENTENCE_END_RE.get_or_init(|| Regex::new(r"[.!?]\s+").unwrap());

    let mut sentences = Vec::new();
    let mut start = 0;
    for m in re.find_iter(text) {
        // punctuation is a single byte
        sentences.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    sentences.push(&text[start..]);
    sentences
}

/// Trimmed, exactly deduplicated sentences with more than `max_short_words` words
pub fn candidate_sentences(text: &str, max_short_words: usize) -> Vec<&str> {
    let mut seen = HashSet::new();
    split_sentences(text)
        .into_iter()
        .map(str::trim)
        .filter(|s| s.split_whitespace().count() > max_short_words)
        .filter(|s| seen.insert(*s))
        .collect()
}

/// Relevance times length quality
///
/// Relevance counts top lemmas found as case-insensitive substrings; the
/// length factor grows linearly up to `full_length_words` and caps at 1.
pub fn score_sentence(sentence: &str, top_lemmas: &[String], full_length_words: usize) -> f64 {
    let lower = sentence.to_lowercase();
    let matches = top_lemmas
        .iter()
        .filter(|lemma| lower.contains(lemma.as_str()))
        .count();

    let word_count = sentence.split_whitespace().count();
    let length_factor = (word_count as f64 / full_length_words.max(1) as f64).min(1.0);

    matches as f64 * length_factor
}

use std::collections::HashMap;

use tracing::debug;

use crate::error::{PipelineError, Result};

use super::LemmaExtractor;

/// Part-of-speech tag prefixes kept as content words: noun, verb, adjective
const CONTENT_POS: [char; 3] = ['N', 'V', 'A'];

#[derive(Debug, Clone)]
struct LexiconEntry {
    lemma: String,
    pos: char,
}

/// Dictionary-backed lemmatizer
///
/// The lexicon is tab-separated `form<TAB>lemma<TAB>tag`, one form per line.
/// Lemmas may carry a `_`-suffixed annotation which is stripped; the first
/// letter of the tag decides the part of speech.
#[derive(Debug, Clone)]
pub struct LexiconLemmatizer {
    entries: HashMap<String, LexiconEntry>,
    /// Keep tokens missing from the lexicon if they are long enough
    pub keep_unknown: bool,
    /// Minimum character count of a kept unknown token
    pub min_unknown_chars: usize,
}

impl LexiconLemmatizer {
    /// Lemmatizer without a lexicon: every alphabetic token of at least
    /// three characters is kept lowercased
    pub fn lexicon_free() -> Self {
        Self {
            entries: HashMap::new(),
            keep_unknown: true,
            min_unknown_chars: 3,
        }
    }

    /// Parse lexicon text; malformed lines are skipped
    pub fn from_lexicon(content: &str) -> Result<Self> {
        let mut entries = HashMap::new();
        let mut skipped = 0usize;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            let (Some(form), Some(lemma), Some(tag)) = (fields.next(), fields.next(), fields.next())
            else {
                skipped += 1;
                continue;
            };
            let Some(pos) = tag.chars().next() else {
                skipped += 1;
                continue;
            };
            let base = lemma.split('_').next().unwrap_or(lemma);
            entries
                .entry(form.to_lowercase())
                .or_insert_with(|| LexiconEntry {
                    lemma: base.to_lowercase(),
                    pos,
                });
        }

        if entries.is_empty() {
            return Err(PipelineError::ModelLoad {
                capability: "lexicon",
                message: "lexicon contains no usable entries".to_string(),
            });
        }

        debug!("Lexicon: {} forms loaded, {} lines skipped", entries.len(), skipped);

        Ok(Self {
            entries,
            keep_unknown: true,
            min_unknown_chars: 3,
        })
    }

    pub fn with_keep_unknown(mut self, keep_unknown: bool) -> Self {
        self.keep_unknown = keep_unknown;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lemma_for(&self, token: &str) -> Option<String> {
        let lower = token.to_lowercase();
        match self.entries.get(&lower) {
            Some(entry) => {
                let alphabetic = entry.lemma.chars().all(char::is_alphabetic);
                (CONTENT_POS.contains(&entry.pos) && alphabetic && !entry.lemma.is_empty())
                    .then(|| entry.lemma.clone())
            }
            None => (self.keep_unknown && lower.chars().count() >= self.min_unknown_chars)
                .then_some(lower),
        }
    }
}

impl LemmaExtractor for LexiconLemmatizer {
    fn lemmatize(&self, text: &str) -> Result<Vec<String>> {
        Ok(text
            .split(|c: char| !c.is_alphabetic())
            .filter(|token| !token.is_empty())
            .filter_map(|token| self.lemma_for(token))
            .collect())
    }
}

pub mod sentences;
pub mod similarity;

pub use sentences::*;
pub use similarity::*;

use tracing::debug;

use crate::heuristics::{find_hint_sentence, HeuristicTables};

/// Configuration for evidence selection
#[derive(Debug, Clone)]
pub struct EvidenceConfig {
    /// Maximum sentences returned per topic
    pub max_sentences: usize,
    /// Sentences with this many words or fewer are dropped
    pub max_short_words: usize,
    /// Word count at which the length factor reaches 1.0
    pub full_length_words: usize,
    /// Candidates at or above this similarity to a chosen sentence are skipped
    pub max_similarity: f64,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            max_sentences: 3,
            max_short_words: 8,
            full_length_words: 20,
            max_similarity: 0.5,
        }
    }
}

/// Pick relevant, well-formed and mutually distinct sentences for a topic
///
/// MMR-lite selection:
/// 1. Split the topic text into sentences, dedupe and drop short ones
/// 2. Score by top-lemma hits weighted by length, discard zero scores
/// 3. Seed with the first sentence matching the hint keywords, if any
/// 4. Greedily add the best-scored sentences that stay dissimilar to
///    everything already chosen
pub fn select_evidence(
    text: &str,
    top_lemmas: &[String],
    topic_hint: &str,
    tables: &HeuristicTables,
    config: &EvidenceConfig,
) -> Vec<String> {
    let candidates = candidate_sentences(text, config.max_short_words);

    let mut scored: Vec<(f64, &str)> = candidates
        .iter()
        .map(|&s| (score_sentence(s, top_lemmas, config.full_length_words), s))
        .filter(|(score, _)| *score > 0.0)
        .collect();
    // Stable: equal scores keep text order
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut selected: Vec<&str> = Vec::with_capacity(config.max_sentences);

    if let Some(hint_sentence) = find_hint_sentence(&candidates, topic_hint, tables) {
        selected.push(hint_sentence);
    }

    for (_, sentence) in scored {
        if selected.len() >= config.max_sentences {
            break;
        }
        if selected.contains(&sentence) {
            continue;
        }
        if selected
            .iter()
            .all(|prev| jaccard_similarity(sentence, prev) < config.max_similarity)
        {
            selected.push(sentence);
        }
    }

    debug!(
        "Evidence: {} candidates, {} selected",
        candidates.len(),
        selected.len()
    );

    selected.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemmas(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    const ROAD_A: &str = "Oprava silnice v ulici Palackého bude pokračovat až do konce října letošního roku podle harmonogramu dodavatele stavby.";
    const ROAD_B: &str = "Oprava silnice v ulici Palackého bude pokračovat až do konce října letošního roku podle plánu dodavatele stavby.";
    const BUDGET: &str = "Rozpočet města počítá s dotací na silnice ve výši dvou milionů korun pro příští rok.";
    const SCHOOL: &str = "Zastupitelé dále probrali opravu střechy, kterou škola dlouhodobě potřebuje kvůli zatékání.";

    #[test]
    fn test_never_more_than_three() {
        let text = [ROAD_A, BUDGET, SCHOOL, "Silnice do Nasobůrek je v havarijním stavu a potřebuje celkovou rekonstrukci povrchu."].join(" ");
        let tables = HeuristicTables::default();
        let evidence = select_evidence(
            &text,
            &lemmas(&["silnice", "škola", "oprava"]),
            "",
            &tables,
            &EvidenceConfig::default(),
        );

        assert_eq!(evidence.len(), 3);
    }

    #[test]
    fn test_near_duplicates_are_skipped() {
        let text = [ROAD_A, ROAD_B, BUDGET].join(" ");
        let tables = HeuristicTables::default();
        let evidence = select_evidence(
            &text,
            &lemmas(&["silnice", "oprava", "stavba"]),
            "",
            &tables,
            &EvidenceConfig::default(),
        );

        assert_eq!(evidence, vec![ROAD_A.to_string(), BUDGET.to_string()]);
    }

    #[test]
    fn test_hint_sentence_comes_first_even_without_score() {
        let text = [ROAD_A, SCHOOL].join(" ");
        let tables = HeuristicTables::default();
        let evidence = select_evidence(
            &text,
            &lemmas(&["silnice"]),
            "školství",
            &tables,
            &EvidenceConfig::default(),
        );

        assert_eq!(evidence, vec![SCHOOL.to_string(), ROAD_A.to_string()]);
    }

    #[test]
    fn test_no_relevant_sentences_gives_empty() {
        let tables = HeuristicTables::default();
        let evidence = select_evidence(
            "Krátká věta. Další krátká věta.",
            &lemmas(&["silnice"]),
            "",
            &tables,
            &EvidenceConfig::default(),
        );
        assert!(evidence.is_empty());
    }
}

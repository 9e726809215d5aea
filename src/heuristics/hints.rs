use std::collections::BTreeSet;

use super::HeuristicTables;

/// Map top lemmas to their domain labels, sorted and comma-joined
pub fn generate_topic_hint(top_lemmas: &[String], tables: &HeuristicTables) -> String {
    let labels: BTreeSet<&str> = top_lemmas
        .iter()
        .filter_map(|lemma| tables.domain_hints.get(lemma))
        .map(String::as_str)
        .collect();

    labels.into_iter().collect::<Vec<_>>().join(", ")
}

/// First sentence mentioning any keyword of `hint`
///
/// Only hints present verbatim in the keyword table are searched, so a hint
/// joined from several labels never matches.
pub fn find_hint_sentence<'a>(
    sentences: &[&'a str],
    hint: &str,
    tables: &HeuristicTables,
) -> Option<&'a str> {
    if hint.is_empty() {
        return None;
    }
    let keywords = tables.hint_keywords.get(hint)?;

    sentences.iter().copied().find(|sentence| {
        let lower = sentence.to_lowercase();
        keywords.iter().any(|k| lower.contains(k.as_str()))
    })
}

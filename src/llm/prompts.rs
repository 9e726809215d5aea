use serde::Serialize;

use crate::models::{LlmTopicEntry, TopicType};

/// Evidence sentences per topic sent to the generator
pub const MAX_PROMPT_EVIDENCE: usize = 3;

/// Newsroom instructions preceding the topic list
pub const ARTICLE_INSTRUCTIONS: &str = "\
Jsi redaktor regionálního zpravodajství.
Píšeš věcný a neutrální článek o průběhu jednání zastupitelstva.

Pravidla:
- piš SOUVISLÝ TEXT, bez nadpisů a sekcí
- postupuj chronologicky podle pořadí témat
- zohledni, kolik času bylo jednotlivým tématům věnováno
- u každého tématu stručně vysvětli, čeho se týkalo
- zmiň, zda šlo o diskuzi, procedurální bod nebo vystoupení jednotlivce
- nepřidávej žádná fakta, jména ani čísla, která nejsou v podkladech
- nic nehodnoť, pouze popisuj";

#[derive(Debug, Serialize)]
struct PromptTopic<'a> {
    order: usize,
    time_minutes: f64,
    topic_type: TopicType,
    topic_hint: &'a str,
    evidence: &'a [String],
}

/// Build the article prompt from ranked topics
///
/// Topics are listed by `order` with at most three evidence sentences each.
pub fn build_article_prompt(entries: &[LlmTopicEntry]) -> serde_json::Result<String> {
    let mut sorted: Vec<&LlmTopicEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.order);

    let topics: Vec<PromptTopic> = sorted
        .into_iter()
        .map(|e| PromptTopic {
            order: e.order,
            time_minutes: crate::models::round1(e.time_minutes),
            topic_type: e.topic_type,
            topic_hint: &e.topic_hint,
            evidence: &e.evidence[..e.evidence.len().min(MAX_PROMPT_EVIDENCE)],
        })
        .collect();

    Ok(format!(
        "{}\n\nPodklady (seřazeno podle významu):\n\n{}",
        ARTICLE_INSTRUCTIONS,
        serde_json::to_string_pretty(&topics)?
    ))
}

/// Split a generated article into summary (first paragraph) and body
pub fn split_article(text: &str) -> (String, String) {
    let body = text.trim();
    let summary = body
        .split("\n\n")
        .map(str::trim)
        .find(|p| !p.is_empty())
        .unwrap_or_default();
    (summary.to_string(), body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(order: usize, evidence: usize) -> LlmTopicEntry {
        LlmTopicEntry {
            order,
            time_minutes: 5.04,
            topic_type: TopicType::Procedural,
            topic_hint: "majetek města".to_string(),
            evidence: (0..evidence).map(|i| format!("Věta {i}.")).collect(),
        }
    }

    #[test]
    fn test_prompt_orders_topics_and_caps_evidence() {
        let prompt = build_article_prompt(&[entry(2, 1), entry(1, 5)]).unwrap();

        assert!(prompt.starts_with("Jsi redaktor"));
        let first = prompt.find("\"order\": 1").unwrap();
        let second = prompt.find("\"order\": 2").unwrap();
        assert!(first < second);
        assert!(prompt.contains("Věta 2."));
        assert!(!prompt.contains("Věta 3."));
        assert!(prompt.contains("\"time_minutes\": 5.0"));
        assert!(prompt.contains("majetek města"));
    }

    #[test]
    fn test_split_article() {
        let (summary, body) = split_article("\n První odstavec.\n\nDruhý odstavec.\n");
        assert_eq!(summary, "První odstavec.");
        assert_eq!(body, "První odstavec.\n\nDruhý odstavec.");

        let (summary, _) = split_article("");
        assert_eq!(summary, "");
    }
}

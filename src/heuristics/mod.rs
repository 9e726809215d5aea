pub mod corrections;
pub mod hints;
pub mod speakers;

pub use corrections::*;
pub use hints::*;
pub use speakers::*;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Lookup tables steering topic labelling
///
/// Every field falls back to the built-in Czech municipal tables when absent
/// from a loaded JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicTables {
    /// Transcript typo fixes applied while loading
    pub corrections: CorrectionTable,
    /// Generic lemmas that never count as topic keywords
    pub stop_lemmas: BTreeSet<String>,
    /// Lemma to domain label
    pub domain_hints: BTreeMap<String, String>,
    /// Domain label to keywords marking a sentence about that domain
    pub hint_keywords: BTreeMap<String, Vec<String>>,
}

impl Default for HeuristicTables {
    fn default() -> Self {
        Self {
            corrections: CorrectionTable::default(),
            stop_lemmas: to_set(&[
                "být", "mít", "říci", "říkat", "chtít", "moci", "dělat", "vědět", "myslit",
                "jít", "prosit", "udělat", "řešit", "mluvit", "věc",
            ]),
            domain_hints: to_map(&[
                ("stavba", "průběh stavby"),
                ("silnice", "místní komunikace"),
                ("výkop", "stavební práce"),
                ("vodovod", "vodovodní infrastruktura"),
                ("kanalizace", "kanalizace"),
                ("dotace", "dotace a financování"),
                ("obyvatel", "dopad na obyvatele"),
                ("komunikace", "komunikace města s občany"),
                ("kontrola", "kontrola a dohled"),
                ("usnesení", "postup orgánů města"),
                ("pozemek", "majetek města"),
                ("škola", "školství"),
                ("mikroregion", "meziobecní spolupráce"),
            ]),
            hint_keywords: [
                ("školství", &["škola", "školy", "školní", "žák", "učitel"][..]),
                ("vodovodní infrastruktura", &["vodovod", "přípojka", "voda"][..]),
                ("kanalizace", &["kanalizace", "kanál"][..]),
                ("místní komunikace", &["silnice", "chodník", "cesta"][..]),
                ("průběh stavby", &["stavba", "výkop", "projekt"][..]),
            ]
            .into_iter()
            .map(|(hint, keywords)| {
                (
                    hint.to_string(),
                    keywords.iter().map(|k| k.to_string()).collect(),
                )
            })
            .collect(),
        }
    }
}

impl HeuristicTables {
    pub fn is_stop_lemma(&self, lemma: &str) -> bool {
        self.stop_lemmas.contains(lemma)
    }
}

fn to_set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let json = r#"{ "stop_lemmas": ["zastupitel"] }"#;
        let tables: HeuristicTables = serde_json::from_str(json).unwrap();

        assert!(tables.is_stop_lemma("zastupitel"));
        assert!(!tables.is_stop_lemma("být"));
        assert_eq!(tables.domain_hints, HeuristicTables::default().domain_hints);
        assert_eq!(tables.corrections.len(), CorrectionTable::default().len());
    }

    #[test]
    fn test_corrections_load_from_json_pairs() {
        let json = r#"{ "corrections": [ {"pattern": "Ritovel", "replacement": "Litovel"} ] }"#;
        let tables: HeuristicTables = serde_json::from_str(json).unwrap();

        assert_eq!(tables.corrections.len(), 1);
        assert_eq!(tables.corrections.apply("Ritovel"), "Litovel");
    }
}

use serde::{Deserialize, Serialize};

/// A single speech-to-text typo and its fix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub pattern: String,
    pub replacement: String,
}

impl Correction {
    pub fn new(pattern: &str, replacement: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        }
    }
}

/// Ordered list of text substitutions applied to every transcript line
///
/// Longer patterns are applied first; patterns of equal length keep table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Correction>", into = "Vec<Correction>")]
pub struct CorrectionTable {
    ordered: Vec<Correction>,
}

impl CorrectionTable {
    pub fn new(corrections: Vec<Correction>) -> Self {
        let mut ordered: Vec<Correction> = corrections
            .into_iter()
            .filter(|c| !c.pattern.is_empty())
            .collect();
        ordered.sort_by(|a, b| b.pattern.chars().count().cmp(&a.pattern.chars().count()));
        Self { ordered }
    }

    pub fn empty() -> Self {
        Self { ordered: vec![] }
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Apply every substitution to `line`, longest pattern first
    pub fn apply(&self, line: &str) -> String {
        let mut fixed = line.to_string();
        for correction in &self.ordered {
            if fixed.contains(&correction.pattern) {
                fixed = fixed.replace(&correction.pattern, &correction.replacement);
            }
        }
        fixed
    }
}

impl From<Vec<Correction>> for CorrectionTable {
    fn from(corrections: Vec<Correction>) -> Self {
        Self::new(corrections)
    }
}

impl From<CorrectionTable> for Vec<Correction> {
    fn from(table: CorrectionTable) -> Self {
        table.ordered
    }
}

impl Default for CorrectionTable {
    /// Known recognition mistakes for Litovel council recordings
    fn default() -> Self {
        Self::new(vec![
            Correction::new("písavný", "písemné"),
            Correction::new("Litovla", "Litovle"),
            Correction::new("Litového", "Litovel"),
            Correction::new("Litovl", "Litovel"),
            Correction::new("Litovélo", "Litovel"),
            Correction::new("Stavěnový", "Stavební"),
            Correction::new("Stavěvní", "Stavební"),
            Correction::new("navědomý", "na vědomí"),
            Correction::new("zápisě", "zápise"),
            Correction::new("krátkrobým", "krátkodobým"),
            Correction::new("Ritovel", "Litovel"),
            Correction::new("rozpoštením", "rozpočtovým"),
            Correction::new("Litovilsko", "Litovelsko"),
            Correction::new("na Sovburgách", "v Nasobůrkách"),
            Correction::new("psířiště", "psí hřiště"),
            Correction::new(" krum", " korun"),
            Correction::new("zasadeny", "zasazeny"),
            Correction::new("litovaské", "litovelské"),
            Correction::new("po zemku", "pozemku"),
            Correction::new("dobudové", "důvodové"),
            Correction::new("Litovelezero", "Litovel s.r.o."),
            Correction::new("Žejrenko", ""),
            Correction::new("řezové", "Březové"),
            Correction::new("Alomouckem", "Olomouckém"),
            Correction::new("Alomoucko", "Olomouckou"),
            Correction::new("Alomouckej", "Olomoucké"),
            Correction::new(" toveláci", " litoveláci"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_pattern_applies_first() {
        let table = CorrectionTable::new(vec![
            Correction::new("ab", "X"),
            Correction::new("abc", "Y"),
        ]);

        assert_eq!(table.apply("abc abd"), "Y Xd");
    }

    #[test]
    fn test_default_table_fixes_known_mistakes() {
        let table = CorrectionTable::default();
        assert_eq!(table.apply("bereme navědomý"), "bereme na vědomí");
        assert_eq!(table.apply("stojí 100 krum"), "stojí 100 korun");
        assert_eq!(table.apply("bez chyb"), "bez chyb");
    }

    #[test]
    fn test_empty_patterns_are_dropped() {
        let table = CorrectionTable::new(vec![Correction::new("", "x")]);
        assert!(table.is_empty());
        assert_eq!(table.apply("abc"), "abc");
    }
}

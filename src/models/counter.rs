use std::collections::HashMap;

use serde::{Serialize, Serializer};

/// Frequency counter that remembers the order in which keys were first seen
///
/// Ranking ties are broken by that order, so the first-seen key wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermCounter {
    keys: Vec<String>,
    positions: HashMap<String, usize>,
    counts: Vec<usize>,
}

impl TermCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str, count: usize) {
        match self.positions.get(key) {
            Some(&pos) => self.counts[pos] += count,
            None => {
                self.positions.insert(key.to_string(), self.keys.len());
                self.keys.push(key.to_string());
                self.counts.push(count);
            }
        }
    }

    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    /// Add every count of `other`, keeping this counter's order for known keys
    pub fn merge(&mut self, other: &TermCounter) {
        for (key, count) in other.iter() {
            self.add(key, count);
        }
    }

    pub fn get(&self, key: &str) -> usize {
        self.positions.get(key).map(|&pos| self.counts[pos]).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Keys with their counts in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.keys.iter().map(String::as_str).zip(self.counts.iter().copied())
    }

    /// The `n` most frequent keys, descending, ties in first-seen order
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self.iter().collect();
        // sort_by is stable, so equal counts keep first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

impl<'a> FromIterator<&'a str> for TermCounter {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counter = TermCounter::new();
        for key in iter {
            counter.increment(key);
        }
        counter
    }
}

impl Serialize for TermCounter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_common_breaks_ties_by_first_seen() {
        let counter: TermCounter = ["silnice", "stavba", "škola", "stavba", "silnice"]
            .into_iter()
            .collect();

        let top = counter.most_common(3);
        assert_eq!(top, vec![("silnice", 2), ("stavba", 2), ("škola", 1)]);
    }

    #[test]
    fn test_merge_keeps_existing_order() {
        let mut left: TermCounter = ["a", "b"].into_iter().collect();
        let right: TermCounter = ["c", "b", "b"].into_iter().collect();
        left.merge(&right);

        let keys: Vec<&str> = left.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(left.get("b"), 3);
        assert_eq!(left.total(), 5);
        assert_eq!(left.get("missing"), 0);
    }
}

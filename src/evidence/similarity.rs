use std::collections::HashSet;

/// Jaccard similarity of the lowercase whitespace-separated word sets
///
/// Returns 0.0 when either side has no words.
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    let set_a: HashSet<&str> = a_lower.split_whitespace().collect();
    let set_b: HashSet<&str> = b_lower.split_whitespace().collect();

    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jaccard_similarity() {
        assert!((jaccard_similarity("hello world", "hello there") - 1.0 / 3.0).abs() < 1e-9);
        assert!((jaccard_similarity("Ahoj Světe", "ahoj světe") - 1.0).abs() < 1e-9);
        assert_eq!(jaccard_similarity("", "cokoli"), 0.0);
        assert_eq!(jaccard_similarity("a b", "c d"), 0.0);
    }
}

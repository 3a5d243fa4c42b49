//! Lexical overlap between a passage and evidence chunks.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+(?:'[\p{L}]+)?").expect("valid word pattern"));

/// Lowercased word set of `text`.
pub fn tokenize(text: &str) -> HashSet<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

/// Jaccard similarity of two word sets, scaled to 0-100.
///
/// Returns exactly `0.0` when the union is empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64 * 100.0
}

/// Jaccard similarity of two texts, scaled to 0-100.
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    jaccard(&tokenize(a), &tokenize(b))
}

/// Index and score of the chunk most similar to `passage`.
///
/// Ties keep the earliest chunk. `None` when there are no chunks.
pub fn best_chunk_match(passage: &str, chunks: &[String]) -> Option<(usize, f64)> {
    let passage_tokens = tokenize(passage);
    chunks
        .iter()
        .enumerate()
        .map(|(idx, chunk)| (idx, jaccard(&passage_tokens, &tokenize(chunk))))
        .fold(None, |best, (idx, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((idx, score)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("The Earth's climate is WARMING, warming!");
        assert!(tokens.contains("earth's"));
        assert!(tokens.contains("warming"));
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_identical_text_is_100() {
        let text = "Global temperatures are rising according to NASA.";
        assert_eq!(jaccard_similarity(text, text), 100.0);
    }

    #[test]
    fn test_empty_side_is_zero() {
        assert_eq!(jaccard_similarity("", "anything here"), 0.0);
        assert_eq!(jaccard_similarity("...", "!!!"), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // {a, b, c} vs {b, c, d}: 2 / 4
        assert_eq!(jaccard_similarity("a b c", "b c d"), 50.0);
    }

    #[test]
    fn test_best_chunk_match() {
        let chunks = vec![
            "Completely unrelated material about gardening".to_string(),
            "temperatures are rising worldwide".to_string(),
            "temperatures are rising worldwide".to_string(),
        ];
        let (idx, score) = best_chunk_match("temperatures are rising", &chunks).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(score, 75.0);
        assert!(best_chunk_match("x", &[]).is_none());
    }

    proptest! {
        #[test]
        fn jaccard_is_symmetric(a in "[a-z ]{0,60}", b in "[a-z ]{0,60}") {
            prop_assert_eq!(jaccard_similarity(&a, &b), jaccard_similarity(&b, &a));
        }

        #[test]
        fn jaccard_is_bounded(a in "[a-z ]{0,60}", b in "[a-z ]{0,60}") {
            let score = jaccard_similarity(&a, &b);
            prop_assert!((0.0..=100.0).contains(&score));
        }

        #[test]
        fn jaccard_of_self_is_full_or_empty(a in "[a-z ]{0,60}") {
            let score = jaccard_similarity(&a, &a);
            if tokenize(&a).is_empty() {
                prop_assert_eq!(score, 0.0);
            } else {
                prop_assert_eq!(score, 100.0);
            }
        }
    }
}

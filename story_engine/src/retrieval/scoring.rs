//! Relevance scoring for the hybrid retriever.
//!
//! Two signals per candidate, combined by a fixed weighted sum:
//!
//! - **Lexical**: the fraction of query keywords occurring in the content
//! - **Semantic proxy**: Jaccard similarity of character-bigram sets, which
//!   keeps working on CJK text where whitespace tokenization is useless

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Weights for the two scoring signals.
///
/// Held fixed so that rankings are reproducible run to run; tune here, not
/// per request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub lexical: f32,
    pub semantic: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            lexical: 0.65,
            semantic: 0.35,
        }
    }
}

impl ScoreWeights {
    /// Combine the two signals into one relevance score.
    pub fn combine(&self, lexical: f32, semantic: f32) -> f32 {
        self.lexical * lexical + self.semantic * semantic
    }
}

/// Fraction of keywords occurring (case-insensitive substring) in `content`.
///
/// Returns 0.0 when there are no keywords, so keyword-free queries rank the
/// whole corpus purely by the semantic signal.
pub fn lexical_overlap(keywords: &[String], content: &str) -> f32 {
    if keywords.is_empty() {
        return 0.0;
    }
    let folded = content.to_lowercase();
    let hits = keywords
        .iter()
        .filter(|k| folded.contains(&k.to_lowercase()))
        .count();
    hits as f32 / keywords.len() as f32
}

/// Jaccard similarity of the character-bigram sets of two texts.
pub fn bigram_similarity(a: &str, b: &str) -> f32 {
    let bigrams_a = char_bigrams(a);
    let bigrams_b = char_bigrams(b);

    if bigrams_a.is_empty() || bigrams_b.is_empty() {
        return 0.0;
    }

    let intersection = bigrams_a.intersection(&bigrams_b).count();
    let union = bigrams_a.union(&bigrams_b).count();
    intersection as f32 / union as f32
}

/// Case-folded character bigrams, not crossing word boundaries.
fn char_bigrams(text: &str) -> BTreeSet<(char, char)> {
    let mut bigrams = BTreeSet::new();
    for word in text.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = word.chars().flat_map(char::to_lowercase).collect();
        for pair in chars.windows(2) {
            bigrams.insert((pair[0], pair[1]));
        }
    }
    bigrams
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_lexical_overlap_counts_keyword_hits() {
        let keywords = kw(&["dragon", "dagger", "storm"]);
        let overlap = lexical_overlap(&keywords, "The dragon feared the silver dagger.");
        assert!((overlap - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_lexical_overlap_is_case_insensitive() {
        let keywords = kw(&["DRAGON"]);
        assert_eq!(lexical_overlap(&keywords, "a dragon appears"), 1.0);
    }

    #[test]
    fn test_lexical_overlap_empty_keywords() {
        assert_eq!(lexical_overlap(&[], "anything"), 0.0);
    }

    #[test]
    fn test_lexical_overlap_matches_cjk_substrings() {
        let keywords = kw(&["屠龙咒文"]);
        assert_eq!(lexical_overlap(&keywords, "古卷记载着屠龙咒文的来历"), 1.0);
    }

    #[test]
    fn test_bigram_similarity_identical_texts() {
        assert_eq!(bigram_similarity("银器弱点", "银器弱点"), 1.0);
    }

    #[test]
    fn test_bigram_similarity_disjoint_texts() {
        assert_eq!(bigram_similarity("abcd", "wxyz"), 0.0);
    }

    #[test]
    fn test_bigram_similarity_partial_overlap_ranks_between() {
        let close = bigram_similarity("dragon slayer", "dragon hunter");
        let far = bigram_similarity("dragon slayer", "quiet morning");
        assert!(close > far);
    }

    #[test]
    fn test_bigram_similarity_empty_text() {
        assert_eq!(bigram_similarity("", "something"), 0.0);
        assert_eq!(bigram_similarity("a", "a"), 0.0);
    }

    #[test]
    fn test_weights_combine() {
        let weights = ScoreWeights {
            lexical: 0.5,
            semantic: 0.5,
        };
        assert!((weights.combine(1.0, 0.0) - 0.5).abs() < 1e-6);
        assert!((weights.combine(1.0, 1.0) - 1.0).abs() < 1e-6);
    }
}

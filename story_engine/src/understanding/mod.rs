//! Query understanding - normalizes the raw request into a structured query.

use story_model::{EngineRequest, QueryIntent, StructuredQuery, TierLimits, UserTier};

use crate::error::StageError;

/// Capability contract for the understanding stage.
///
/// Implementations may replace the normalization transform wholesale, but the
/// must-include and must-avoid lists always propagate verbatim from the
/// request context - they are hard constraints, never paraphrased. The stage
/// never fails on degraded input: an empty query yields a well-formed,
/// possibly empty-keyword structured query.
pub trait QueryUnderstanding: Send + Sync {
    fn understand(
        &self,
        request: &EngineRequest,
        tier: UserTier,
    ) -> Result<StructuredQuery, StageError>;
}

/// Tokens dropped during keyword extraction.
///
/// English function words plus the common CJK particles; anything longer
/// deserves to survive into the retrieval keywords.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "be", "but", "by", "for", "from", "in", "into", "is", "it",
    "of", "on", "or", "so", "that", "the", "their", "then", "this", "to", "was", "were", "with",
    "的", "了", "在", "是", "和", "与", "把", "被", "让",
];

/// Markers that classify the request's intent, checked against the
/// case-folded query.
const DIALOGUE_MARKERS: &[&str] = &["dialogue", "conversation", "对话", "交谈"];
const DESCRIPTION_MARKERS: &[&str] = &["describe", "description", "描写", "描述", "景物"];

/// Deterministic rule-based understanding.
///
/// Lowercases, tokenizes, strips stopwords, and assembles retrieval keywords
/// from the known entities, the must-include terms, and the surviving query
/// tokens, in that order.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedUnderstanding;

impl RuleBasedUnderstanding {
    pub fn new() -> Self {
        Self
    }

    fn classify_intent(folded_query: &str) -> QueryIntent {
        if folded_query.trim().is_empty() {
            return QueryIntent::Unspecified;
        }
        if DIALOGUE_MARKERS.iter().any(|m| folded_query.contains(m)) {
            return QueryIntent::Dialogue;
        }
        if DESCRIPTION_MARKERS.iter().any(|m| folded_query.contains(m)) {
            return QueryIntent::Description;
        }
        QueryIntent::ContinueScene
    }

    /// Entity names: everything the context declares, plus capitalized words
    /// from the query itself.
    fn extract_entities(request: &EngineRequest) -> Vec<String> {
        let mut entities = request.known_entities();

        for token in tokenize(&request.user_query) {
            let is_capitalized = token
                .chars()
                .next()
                .map(char::is_uppercase)
                .unwrap_or(false);
            let is_stopword = STOPWORDS.contains(&token.to_lowercase().as_str());
            if is_capitalized && !is_stopword && !entities.iter().any(|e| e == &token) {
                entities.push(token);
            }
        }

        entities
    }
}

impl QueryUnderstanding for RuleBasedUnderstanding {
    fn understand(
        &self,
        request: &EngineRequest,
        tier: UserTier,
    ) -> Result<StructuredQuery, StageError> {
        let limits = TierLimits::for_tier(tier);
        let top_k = request
            .requested_top_k()
            .map(|k| k.min(limits.max_top_k))
            .unwrap_or(limits.max_top_k);

        let mut query = StructuredQuery::degraded(top_k);

        let folded = request.user_query.to_lowercase();
        query.intent = Self::classify_intent(&folded);
        query.entities = Self::extract_entities(request);
        query.must_include = request.must_include();
        query.must_avoid = request.must_avoid();

        // Keyword order matters for determinism: entities, then required
        // terms, then query tokens, first occurrence wins.
        let mut keywords: Vec<String> = Vec::new();
        let candidates = query
            .entities
            .iter()
            .cloned()
            .chain(query.must_include.iter().cloned())
            .chain(
                tokenize(&folded)
                    .into_iter()
                    .filter(|t| !STOPWORDS.contains(&t.as_str())),
            );
        for candidate in candidates {
            let folded_candidate = candidate.to_lowercase();
            if !keywords.contains(&folded_candidate) {
                keywords.push(folded_candidate);
            }
        }
        query.keywords = keywords;

        Ok(query)
    }
}

/// Split text into runs of alphanumeric characters.
///
/// CJK ideographs count as alphanumeric, so a Chinese phrase survives as one
/// token instead of being shredded; the retriever's bigram signal handles
/// matching inside such runs.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_model::MemoryItem;

    fn understand(request: &EngineRequest, tier: UserTier) -> StructuredQuery {
        RuleBasedUnderstanding::new()
            .understand(request, tier)
            .expect("rule-based understanding is infallible")
    }

    #[test]
    fn test_empty_query_degrades_gracefully() {
        let request = EngineRequest::new("");
        let query = understand(&request, UserTier::Registered);

        assert_eq!(query.intent, QueryIntent::Unspecified);
        assert!(query.keywords.is_empty());
        assert_eq!(query.top_k, 4);
    }

    #[test]
    fn test_empty_query_still_carries_context_constraints() {
        let request = EngineRequest::new("")
            .with_must_include(["silver dagger"])
            .with_must_avoid(["fire magic"]);
        let query = understand(&request, UserTier::Registered);

        assert_eq!(query.must_include, vec!["silver dagger"]);
        assert_eq!(query.must_avoid, vec!["fire magic"]);
    }

    #[test]
    fn test_constraints_propagate_verbatim() {
        let request = EngineRequest::new("continue the hunt")
            .with_must_include(["屠龙咒文", "银器弱点"])
            .with_must_avoid(["火系魔法"]);
        let query = understand(&request, UserTier::Vip);

        assert_eq!(query.must_include, vec!["屠龙咒文", "银器弱点"]);
        assert_eq!(query.must_avoid, vec!["火系魔法"]);
    }

    #[test]
    fn test_stopwords_removed_and_order_preserved() {
        let request = EngineRequest::new("the hunter stalks the dragon in the mist");
        let query = understand(&request, UserTier::Vip);

        assert_eq!(query.keywords, vec!["hunter", "stalks", "dragon", "mist"]);
    }

    #[test]
    fn test_keywords_deduplicated_first_occurrence_wins() {
        let request = EngineRequest::new("dragon fights dragon")
            .with_known_entities(["Dragon"]);
        let query = understand(&request, UserTier::Vip);

        let dragon_count = query.keywords.iter().filter(|k| *k == "dragon").count();
        assert_eq!(dragon_count, 1);
        assert_eq!(query.keywords.first().map(String::as_str), Some("dragon"));
    }

    #[test]
    fn test_intent_classification() {
        let dialogue = EngineRequest::new("write a conversation between them");
        assert_eq!(
            understand(&dialogue, UserTier::Vip).intent,
            QueryIntent::Dialogue
        );

        let description = EngineRequest::new("描写山谷的景物");
        assert_eq!(
            understand(&description, UserTier::Vip).intent,
            QueryIntent::Description
        );

        let plain = EngineRequest::new("continue the story");
        assert_eq!(
            understand(&plain, UserTier::Vip).intent,
            QueryIntent::ContinueScene
        );
    }

    #[test]
    fn test_top_k_clamped_to_tier() {
        let request = EngineRequest::new("continue").with_top_k(50);
        let query = understand(&request, UserTier::Registered);
        assert_eq!(query.top_k, 4);

        let modest = EngineRequest::new("continue").with_top_k(2);
        let query = understand(&modest, UserTier::Registered);
        assert_eq!(query.top_k, 2);
    }

    #[test]
    fn test_entities_from_context_and_capitalized_words() {
        let request = EngineRequest::new("Aldric follows the trail")
            .with_known_entities(["Mirelle"]);
        let query = understand(&request, UserTier::Vip);

        assert!(query.entities.iter().any(|e| e == "Mirelle"));
        assert!(query.entities.iter().any(|e| e == "Aldric"));
    }

    #[test]
    fn test_understanding_ignores_corpus() {
        let with_corpus = EngineRequest::new("continue the hunt")
            .with_corpus([MemoryItem::new("m1", "irrelevant here")]);
        let without = EngineRequest::new("continue the hunt");

        assert_eq!(
            understand(&with_corpus, UserTier::Vip),
            understand(&without, UserTier::Vip)
        );
    }
}

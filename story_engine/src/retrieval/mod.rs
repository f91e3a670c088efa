//! Retrieval - ranks the request's candidate memories against the query.

mod scoring;

pub use scoring::*;

use story_model::{
    EngineRequest, RetrievalResult, ScoredMemory, StructuredQuery, TierLimits, UserTier,
};

use crate::error::StageError;

/// Capability contract for the retrieval stage.
///
/// Result length never exceeds `min(query.top_k, tier cap, corpus size)`, and
/// an empty corpus yields an empty result, never an error. Implementations
/// backed by a remote index must apply their own timeout and surface it as a
/// [`StageError`].
pub trait Retriever: Send + Sync {
    fn retrieve(
        &self,
        query: &StructuredQuery,
        request: &EngineRequest,
        tier: UserTier,
    ) -> Result<RetrievalResult, StageError>;
}

/// Deterministic hybrid retrieval over the in-request corpus.
///
/// Each candidate gets `weights.combine(lexical, semantic)` where the
/// semantic signal compares the candidate against the whole query surface
/// (keywords joined). Identical inputs always produce identical rankings:
/// ties fall back to corpus order.
#[derive(Debug, Clone, Default)]
pub struct HybridRetriever {
    weights: ScoreWeights,
}

impl HybridRetriever {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }
}

impl Retriever for HybridRetriever {
    fn retrieve(
        &self,
        query: &StructuredQuery,
        request: &EngineRequest,
        tier: UserTier,
    ) -> Result<RetrievalResult, StageError> {
        let corpus = request.corpus();
        if corpus.is_empty() {
            return Ok(RetrievalResult::empty());
        }

        let limits = TierLimits::for_tier(tier);
        let limit = query.top_k.min(limits.max_top_k).min(corpus.len());

        let surface = query.keywords.join(" ");
        let entries: Vec<ScoredMemory> = corpus
            .into_iter()
            .enumerate()
            .map(|(corpus_index, item)| {
                let lexical = lexical_overlap(&query.keywords, &item.content);
                let semantic = bigram_similarity(&surface, &item.content);
                ScoredMemory {
                    score: self.weights.combine(lexical, semantic),
                    item,
                    corpus_index,
                }
            })
            .collect();

        Ok(RetrievalResult::ranked(entries, limit))
    }
}

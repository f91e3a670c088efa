//! Structured query - the normalized form of a raw request.

use serde::{Deserialize, Serialize};

/// Broad intent classes a request can normalize to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QueryIntent {
    /// Continue the scene in progress.
    ContinueScene,

    /// Produce or extend an exchange between characters.
    Dialogue,

    /// Describe a place, object, or atmosphere.
    Description,

    /// Nothing recognizable; the degraded path for empty queries.
    #[default]
    Unspecified,
}

/// The output of query understanding, consumed by every downstream stage.
///
/// `must_include` and `must_avoid` are carried verbatim from the request
/// context; they are hard constraints and are never paraphrased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredQuery {
    pub intent: QueryIntent,

    /// Entity names relevant to the request.
    pub entities: Vec<String>,

    /// Terms the draft must contain, verbatim.
    pub must_include: Vec<String>,

    /// Terms the draft must not contain, verbatim.
    pub must_avoid: Vec<String>,

    /// Deduplicated retrieval keywords, in first-occurrence order.
    pub keywords: Vec<String>,

    /// Retrieval breadth, already clamped to the tier limit.
    pub top_k: usize,
}

impl StructuredQuery {
    /// A well-formed query with no extracted content, for degraded input.
    pub fn degraded(top_k: usize) -> Self {
        Self {
            intent: QueryIntent::Unspecified,
            entities: Vec::new(),
            must_include: Vec::new(),
            must_avoid: Vec::new(),
            keywords: Vec::new(),
            top_k,
        }
    }

    /// Whether any retrieval signal was extracted.
    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_query_is_well_formed() {
        let query = StructuredQuery::degraded(4);

        assert_eq!(query.intent, QueryIntent::Unspecified);
        assert!(!query.has_keywords());
        assert!(query.must_include.is_empty());
        assert_eq!(query.top_k, 4);
    }
}

//! Placeholder semantic review.

use story_model::{
    CheckResult, Draft, EngineRequest, Plan, RetrievalResult, StructuredQuery, UserTier,
};

use crate::error::StageError;
use crate::review::SoftReviewer;

/// No-op semantic review: always passes with no diagnostics.
///
/// Keeps the reviewer seam real so a semantic judge can slot in later; such
/// a judge may populate violations but, like this one, can never block.
#[derive(Debug, Clone, Default)]
pub struct NoopSoftReviewer;

impl NoopSoftReviewer {
    pub fn new() -> Self {
        Self
    }
}

impl SoftReviewer for NoopSoftReviewer {
    fn check(
        &self,
        _draft: &Draft,
        _request: &EngineRequest,
        _query: &StructuredQuery,
        _memories: &RetrievalResult,
        _plan: &Plan,
        _tier: UserTier,
    ) -> Result<CheckResult, StageError> {
        Ok(CheckResult::passing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_reviewer_always_passes() {
        let result = NoopSoftReviewer::new()
            .check(
                &Draft::new("any draft at all"),
                &EngineRequest::new("anything"),
                &StructuredQuery::degraded(4),
                &RetrievalResult::empty(),
                &Plan::default(),
                UserTier::Anonymous,
            )
            .expect("noop review is infallible");

        assert!(result.pass);
        assert!(result.violations.is_empty());
    }
}

//! Error taxonomy for the pipeline.
//!
//! Degraded input is not represented here at all: every stage absorbs empty
//! or malformed request fields and produces a minimal artifact instead. These
//! types cover the one genuinely fatal case - a strategy implementation that
//! cannot produce its artifact - plus the stage name needed to report it.

use std::time::Duration;
use thiserror::Error;

/// The six pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Understanding,
    Retrieval,
    Direction,
    Writing,
    HardCheck,
    SoftReview,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Understanding => "understanding",
            Stage::Retrieval => "retrieval",
            Stage::Direction => "direction",
            Stage::Writing => "writing",
            Stage::HardCheck => "hard-check",
            Stage::SoftReview => "soft-review",
        };
        write!(f, "{}", name)
    }
}

/// Why a strategy implementation failed to produce its artifact.
///
/// The rule-based baselines never construct these; the variants exist for
/// implementations backed by remote indexes or models, which must map their
/// own timeouts and transport errors here rather than blocking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    #[error("timed out after {elapsed:?}")]
    Timeout { elapsed: Duration },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed upstream response: {0}")]
    Malformed(String),
}

/// A pipeline run that could not complete.
///
/// Carries which stage failed; the orchestrator aborts on the first stage
/// failure rather than fabricating a partial response.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: StageError,
    },
}

impl EngineError {
    /// Tag a stage error with the stage it came from.
    pub fn stage(stage: Stage, source: StageError) -> Self {
        Self::Stage { stage, source }
    }

    /// The stage that failed.
    pub fn failed_stage(&self) -> Stage {
        match self {
            Self::Stage { stage, .. } => *stage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_names_the_failed_stage() {
        let err = EngineError::stage(
            Stage::Retrieval,
            StageError::Transport("index unreachable".to_string()),
        );

        assert_eq!(err.failed_stage(), Stage::Retrieval);
        assert_eq!(
            err.to_string(),
            "retrieval stage failed: transport failure: index unreachable"
        );
    }

    #[test]
    fn test_timeout_display() {
        let err = StageError::Timeout {
            elapsed: Duration::from_secs(5),
        };
        assert!(err.to_string().contains("timed out"));
    }
}

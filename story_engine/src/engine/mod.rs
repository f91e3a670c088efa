//! Engine orchestrator - sequences the stages and assembles the response.

use tracing::{debug, warn};

use story_model::{DebugTrace, EngineRequest, EngineResponse, TierLimits, UserTier};

use crate::direction::{BeatDirector, Director};
use crate::error::{EngineError, Stage};
use crate::retrieval::{HybridRetriever, Retriever};
use crate::review::{HardChecker, NoopSoftReviewer, RuleBasedHardChecker, SoftReviewer};
use crate::understanding::{QueryUnderstanding, RuleBasedUnderstanding};
use crate::writing::{TemplateWriter, Writer};

/// Selects one concrete strategy per capability.
///
/// Defaults are the rule-based baselines; any stage can be swapped without
/// the orchestrator learning the concrete type.
pub struct StoryEngineBuilder {
    understanding: Box<dyn QueryUnderstanding>,
    retriever: Box<dyn Retriever>,
    director: Box<dyn Director>,
    writer: Box<dyn Writer>,
    hard_checker: Box<dyn HardChecker>,
    soft_reviewer: Box<dyn SoftReviewer>,
}

impl Default for StoryEngineBuilder {
    fn default() -> Self {
        Self {
            understanding: Box::new(RuleBasedUnderstanding::new()),
            retriever: Box::new(HybridRetriever::with_defaults()),
            director: Box::new(BeatDirector::new()),
            writer: Box::new(TemplateWriter::new()),
            hard_checker: Box::new(RuleBasedHardChecker::new()),
            soft_reviewer: Box::new(NoopSoftReviewer::new()),
        }
    }
}

impl StoryEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_understanding(mut self, strategy: Box<dyn QueryUnderstanding>) -> Self {
        self.understanding = strategy;
        self
    }

    pub fn with_retriever(mut self, strategy: Box<dyn Retriever>) -> Self {
        self.retriever = strategy;
        self
    }

    pub fn with_director(mut self, strategy: Box<dyn Director>) -> Self {
        self.director = strategy;
        self
    }

    pub fn with_writer(mut self, strategy: Box<dyn Writer>) -> Self {
        self.writer = strategy;
        self
    }

    pub fn with_hard_checker(mut self, strategy: Box<dyn HardChecker>) -> Self {
        self.hard_checker = strategy;
        self
    }

    pub fn with_soft_reviewer(mut self, strategy: Box<dyn SoftReviewer>) -> Self {
        self.soft_reviewer = strategy;
        self
    }

    pub fn build(self) -> StoryEngine {
        StoryEngine {
            understanding: self.understanding,
            retriever: self.retriever,
            director: self.director,
            writer: self.writer,
            hard_checker: self.hard_checker,
            soft_reviewer: self.soft_reviewer,
        }
    }
}

/// The pipeline orchestrator.
///
/// Runs understanding, retrieval, direction, writing, the hard gate, and -
/// when the gate passes and the tier allows it - the advisory review,
/// strictly in that order. Each artifact lands in the debug trace the moment
/// its stage completes, so the trace always reflects exactly how far a run
/// got. Holds no request state; one engine serves concurrent calls.
pub struct StoryEngine {
    understanding: Box<dyn QueryUnderstanding>,
    retriever: Box<dyn Retriever>,
    director: Box<dyn Director>,
    writer: Box<dyn Writer>,
    hard_checker: Box<dyn HardChecker>,
    soft_reviewer: Box<dyn SoftReviewer>,
}

impl StoryEngine {
    /// The all-rule-based engine.
    pub fn rule_based() -> Self {
        StoryEngineBuilder::new().build()
    }

    pub fn builder() -> StoryEngineBuilder {
        StoryEngineBuilder::new()
    }

    /// Run the pipeline for one request.
    ///
    /// The returned response always carries the draft, even when the hard
    /// gate rejected it; a [`EngineError`] is returned only when a strategy
    /// implementation failed to produce its artifact at all.
    pub fn generate(
        &self,
        request: &EngineRequest,
        tier: UserTier,
    ) -> Result<EngineResponse, EngineError> {
        let limits = TierLimits::for_tier(tier);
        let mut trace = DebugTrace::new();

        let query = self
            .understanding
            .understand(request, tier)
            .map_err(|e| EngineError::stage(Stage::Understanding, e))?;
        debug!(
            keywords = query.keywords.len(),
            top_k = query.top_k,
            "query understood"
        );
        trace.record_structured_query(query.clone());

        let memories = self
            .retriever
            .retrieve(&query, request, tier)
            .map_err(|e| EngineError::stage(Stage::Retrieval, e))?;
        debug!(retrieved = memories.len(), "memories retrieved");
        trace.record_retrieval(memories.clone());

        let plan = self
            .director
            .plan(request, &query, &memories, tier)
            .map_err(|e| EngineError::stage(Stage::Direction, e))?;
        debug!(beats = plan.beats.len(), "plan directed");
        trace.record_plan(plan.clone());

        let draft = self
            .writer
            .write(request, &query, &memories, &plan, tier)
            .map_err(|e| EngineError::stage(Stage::Writing, e))?;
        debug!(chars = draft.char_len(), "draft written");

        let gate = self
            .hard_checker
            .check(&draft, request, &query, &memories, &plan, tier)
            .map_err(|e| EngineError::stage(Stage::HardCheck, e))?;
        let gate_passed = gate.pass;
        let violation_count = gate.violations.len();
        trace.record_low_level(gate);

        if !gate_passed {
            warn!(violations = violation_count, "draft rejected by hard gate");
            return Ok(EngineResponse::new(draft.into_inner(), trace));
        }

        if limits.run_soft_review {
            let review = self
                .soft_reviewer
                .check(&draft, request, &query, &memories, &plan, tier)
                .map_err(|e| EngineError::stage(Stage::SoftReview, e))?;
            debug!(pass = review.pass, "soft review complete");
            trace.record_high_level(review);
        }

        Ok(EngineResponse::new(draft.into_inner(), trace))
    }
}

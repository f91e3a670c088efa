//! Writing - renders the plan into a draft within the tier's length limit.

use story_model::{
    Beat, Draft, EngineRequest, Plan, RetrievalResult, StructuredQuery, TierLimits, UserTier,
};

use crate::error::StageError;

/// Capability contract for the writing stage.
///
/// This is the single substitution point for swapping the template renderer
/// for a model-backed generator: same four inputs, same draft out. The
/// returned draft never exceeds the tier's character limit, and it is always
/// complete - a writer that cannot finish fails with a [`StageError`] instead
/// of returning a fragment.
pub trait Writer: Send + Sync {
    fn write(
        &self,
        request: &EngineRequest,
        query: &StructuredQuery,
        memories: &RetrievalResult,
        plan: &Plan,
        tier: UserTier,
    ) -> Result<Draft, StageError>;
}

/// Characters of the prior excerpt echoed at the top of the draft.
const PRIOR_TAIL_CHARS: usize = 60;

/// Deterministic template-based writer.
///
/// Renders beats strictly in plan order: anchors quote their memory excerpt,
/// weave beats embed the required term verbatim, and the atmosphere beat
/// closes the passage. Output is then truncated on a character boundary to
/// the tier limit.
#[derive(Debug, Clone, Default)]
pub struct TemplateWriter;

impl TemplateWriter {
    pub fn new() -> Self {
        Self
    }

    fn render(request: &EngineRequest, plan: &Plan) -> String {
        let mut passage = String::new();

        if let Some(excerpt) = request.prior_excerpt() {
            let chars: Vec<char> = excerpt.chars().collect();
            let tail: String = chars
                .iter()
                .skip(chars.len().saturating_sub(PRIOR_TAIL_CHARS))
                .collect();
            passage.push_str(&format!("The tale resumes where it broke off: {} ", tail));
        }

        for beat in &plan.beats {
            match beat {
                Beat::Anchor { excerpt, .. } => {
                    passage.push_str(&format!("Memory holds that {} ", excerpt));
                }
                Beat::Weave { term } => {
                    passage.push_str(&format!("Now {} enters the telling. ", term));
                }
                Beat::Atmosphere { hint } => {
                    passage.push_str(&format!("And through it all, {}. ", hint));
                }
            }
        }

        if passage.is_empty() {
            passage.push_str("The story continues. ");
        }

        passage.trim_end().to_string()
    }
}

impl Writer for TemplateWriter {
    fn write(
        &self,
        request: &EngineRequest,
        _query: &StructuredQuery,
        _memories: &RetrievalResult,
        plan: &Plan,
        tier: UserTier,
    ) -> Result<Draft, StageError> {
        let limits = TierLimits::for_tier(tier);
        let passage = Self::render(request, plan);

        let bounded: String = passage.chars().take(limits.max_output_chars).collect();
        Ok(Draft::new(bounded))
    }
}

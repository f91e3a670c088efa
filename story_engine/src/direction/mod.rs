//! Direction - converts query and retrieved memories into a generation plan.

use story_model::{
    Beat, EngineRequest, Plan, QueryIntent, RetrievalResult, StructuredQuery, UserTier,
};

use crate::error::StageError;

/// Capability contract for the direction stage.
///
/// A director may only reorder and annotate material already present in the
/// query and the retrieved memories; inventing a new must-include or
/// must-avoid constraint is out of contract.
pub trait Director: Send + Sync {
    fn plan(
        &self,
        request: &EngineRequest,
        query: &StructuredQuery,
        memories: &RetrievalResult,
        tier: UserTier,
    ) -> Result<Plan, StageError>;
}

/// Memory tags that qualify as continuity anchors.
const ANCHOR_TAGS: &[&str] = &["lore", "spell", "scene"];

/// Maximum characters of a memory quoted into an anchor beat.
const ANCHOR_EXCERPT_CHARS: usize = 80;

/// Mechanical beat sequencing: continuity anchors from tagged memories in
/// retrieval order, then one weave beat per must-include term in query
/// order, then a closing atmosphere hint derived from the intent.
#[derive(Debug, Clone, Default)]
pub struct BeatDirector;

impl BeatDirector {
    pub fn new() -> Self {
        Self
    }

    fn atmosphere_hint(intent: QueryIntent) -> &'static str {
        match intent {
            QueryIntent::ContinueScene => "the scene keeps its momentum, nothing breaks continuity",
            QueryIntent::Dialogue => "the exchange carries the tension of the moment",
            QueryIntent::Description => "the prose lingers on sensory detail",
            QueryIntent::Unspecified => "the tone stays consistent with what came before",
        }
    }
}

impl Director for BeatDirector {
    fn plan(
        &self,
        _request: &EngineRequest,
        query: &StructuredQuery,
        memories: &RetrievalResult,
        _tier: UserTier,
    ) -> Result<Plan, StageError> {
        let mut beats = Vec::new();

        for scored in memories.iter() {
            let qualifies = scored
                .item
                .tag()
                .map(|tag| ANCHOR_TAGS.contains(&tag))
                .unwrap_or(false);
            if qualifies {
                let excerpt: String = scored
                    .item
                    .content
                    .chars()
                    .take(ANCHOR_EXCERPT_CHARS)
                    .collect();
                beats.push(Beat::Anchor {
                    memory_id: scored.item.id.clone(),
                    excerpt,
                });
            }
        }

        for term in &query.must_include {
            beats.push(Beat::Weave { term: term.clone() });
        }

        beats.push(Beat::Atmosphere {
            hint: Self::atmosphere_hint(query.intent).to_string(),
        });

        Ok(Plan::new(beats))
    }
}

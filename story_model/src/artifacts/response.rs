//! The draft, the debug trace, and the final engine response.

use serde::{Deserialize, Serialize};

use super::{CheckResult, Plan, StructuredQuery};
use crate::memory::RetrievalResult;

/// A complete generated draft.
///
/// A stage either returns a whole draft or fails; partial drafts do not
/// exist in the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Draft(String);

impl Draft {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Draft length in characters, the unit output limits are stated in.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

/// Append-only record of every intermediate artifact a run produced.
///
/// Entries are filled strictly in pipeline order and never rewritten or
/// removed, so an absent entry means the stage did not run - a first-class
/// signal distinct from "ran and produced an empty artifact". Absent entries
/// are also absent keys in the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DebugTrace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_query: Option<StructuredQuery>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieval: Option<RetrievalResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_level: Option<CheckResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_level: Option<CheckResult>,
}

impl DebugTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_structured_query(&mut self, query: StructuredQuery) {
        self.structured_query = Some(query);
    }

    pub fn record_retrieval(&mut self, retrieval: RetrievalResult) {
        self.retrieval = Some(retrieval);
    }

    pub fn record_plan(&mut self, plan: Plan) {
        self.plan = Some(plan);
    }

    pub fn record_low_level(&mut self, result: CheckResult) {
        self.low_level = Some(result);
    }

    pub fn record_high_level(&mut self, result: CheckResult) {
        self.high_level = Some(result);
    }

    /// Whether the advisory review ran at all.
    pub fn soft_review_ran(&self) -> bool {
        self.high_level.is_some()
    }
}

/// The terminal artifact handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineResponse {
    /// The draft text, returned even when the hard gate rejected it so the
    /// caller can inspect what was rejected.
    pub content: String,

    /// Everything the pipeline produced along the way.
    pub debug: DebugTrace,
}

impl EngineResponse {
    pub fn new(content: impl Into<String>, debug: DebugTrace) -> Self {
        Self {
            content: content.into(),
            debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_char_len_counts_chars_not_bytes() {
        let draft = Draft::new("屠龙咒文");
        assert_eq!(draft.char_len(), 4);
        assert_eq!(draft.as_str().len(), 12);
    }

    #[test]
    fn test_absent_trace_entries_have_no_serialized_key() {
        let mut trace = DebugTrace::new();
        trace.record_low_level(CheckResult::passing());

        let json = serde_json::to_value(&trace).expect("trace serializes");
        let map = json.as_object().expect("trace is a map");

        assert!(map.contains_key("low_level"));
        assert!(!map.contains_key("high_level"));
        assert!(!map.contains_key("structured_query"));
    }

    #[test]
    fn test_soft_review_ran_distinguishes_empty_from_absent() {
        let mut trace = DebugTrace::new();
        assert!(!trace.soft_review_ran());

        trace.record_high_level(CheckResult::passing());
        assert!(trace.soft_review_ran());
    }
}

//! The engine request - the single inbound surface of the pipeline.
//!
//! A request carries the raw creative instruction plus two free-form bags:
//! `context` (continuity hints and the candidate memory corpus) and `options`
//! (tunables such as retrieval breadth). The bags are plain JSON maps so the
//! calling layer can pass anything through; the pipeline reads them only via
//! the typed accessors below, which degrade to empty values instead of
//! failing on missing or malformed entries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::memory::MemoryItem;

/// Context key: terms the draft must contain, verbatim.
pub const CTX_MUST_INCLUDE: &str = "must_include";

/// Context key: terms the draft must not contain.
pub const CTX_MUST_AVOID: &str = "must_avoid";

/// Context key: the excerpt the draft continues from.
pub const CTX_PRIOR_EXCERPT: &str = "prior_excerpt";

/// Context key: names of entities already established in the narrative.
pub const CTX_KNOWN_ENTITIES: &str = "known_entities";

/// Context key: the in-memory corpus of candidate memory snippets.
pub const CTX_CORPUS: &str = "corpus";

/// Options key: desired retrieval breadth.
pub const OPT_TOP_K: &str = "top_k";

/// An immutable continuation request.
///
/// Owned by the call that creates it and passed by reference through the
/// pipeline; no stage mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineRequest {
    /// The raw user-authored instruction.
    pub user_query: String,

    /// Free-form continuity hints keyed by string.
    #[serde(default)]
    pub context: Map<String, Value>,

    /// Free-form tunables keyed by string.
    #[serde(default)]
    pub options: Map<String, Value>,
}

impl EngineRequest {
    /// Create a request with empty context and options.
    pub fn new(user_query: impl Into<String>) -> Self {
        Self {
            user_query: user_query.into(),
            context: Map::new(),
            options: Map::new(),
        }
    }

    /// Set an arbitrary context entry.
    pub fn with_context_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    /// Set an arbitrary option entry.
    pub fn with_option_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    /// Set the terms the draft must contain.
    pub fn with_must_include<I, S>(self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = terms.into_iter().map(|t| Value::String(t.into())).collect();
        self.with_context_value(CTX_MUST_INCLUDE, Value::Array(list))
    }

    /// Set the terms the draft must not contain.
    pub fn with_must_avoid<I, S>(self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = terms.into_iter().map(|t| Value::String(t.into())).collect();
        self.with_context_value(CTX_MUST_AVOID, Value::Array(list))
    }

    /// Set the excerpt the draft continues from.
    pub fn with_prior_excerpt(self, excerpt: impl Into<String>) -> Self {
        self.with_context_value(CTX_PRIOR_EXCERPT, Value::String(excerpt.into()))
    }

    /// Set the names of already-established entities.
    pub fn with_known_entities<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = names.into_iter().map(|n| Value::String(n.into())).collect();
        self.with_context_value(CTX_KNOWN_ENTITIES, Value::Array(list))
    }

    /// Set the candidate memory corpus.
    pub fn with_corpus<I>(self, items: I) -> Self
    where
        I: IntoIterator<Item = MemoryItem>,
    {
        let list = items
            .into_iter()
            .filter_map(|item| serde_json::to_value(item).ok())
            .collect();
        self.with_context_value(CTX_CORPUS, Value::Array(list))
    }

    /// Set the desired retrieval breadth.
    pub fn with_top_k(self, top_k: usize) -> Self {
        self.with_option_value(OPT_TOP_K, Value::from(top_k as u64))
    }

    /// Terms the draft must contain, verbatim and in request order.
    pub fn must_include(&self) -> Vec<String> {
        self.context_string_list(CTX_MUST_INCLUDE)
    }

    /// Terms the draft must not contain, verbatim and in request order.
    pub fn must_avoid(&self) -> Vec<String> {
        self.context_string_list(CTX_MUST_AVOID)
    }

    /// The excerpt the draft continues from, if any.
    pub fn prior_excerpt(&self) -> Option<&str> {
        self.context.get(CTX_PRIOR_EXCERPT).and_then(Value::as_str)
    }

    /// Names of already-established entities.
    pub fn known_entities(&self) -> Vec<String> {
        self.context_string_list(CTX_KNOWN_ENTITIES)
    }

    /// The candidate memory corpus, in corpus order.
    ///
    /// Entries that do not deserialize as memory items are skipped.
    pub fn corpus(&self) -> Vec<MemoryItem> {
        match self.context.get(CTX_CORPUS) {
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(|v| serde_json::from_value(v.clone()).ok())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The explicitly requested retrieval breadth, if any.
    pub fn requested_top_k(&self) -> Option<usize> {
        self.options
            .get(OPT_TOP_K)
            .and_then(Value::as_u64)
            .map(|k| k as usize)
    }

    fn context_string_list(&self, key: &str) -> Vec<String> {
        match self.context.get(key) {
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_owned))
                .collect(),
            _ => Vec::new(),
        }
    }
}

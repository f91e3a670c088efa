//! Memory items - retrievable snippets of prior narrative and world knowledge.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A retrievable snippet of prior narrative or world knowledge.
///
/// Identity is the `id` alone: two items with the same id are the same memory
/// even if their content differs across a corpus refresh, so callers must not
/// assume content-stability between requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryItem {
    /// Unique identifier within the corpus.
    pub id: String,

    /// The snippet text.
    pub content: String,

    /// Free-form metadata; by convention the `tag` key classifies the snippet.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl MemoryItem {
    /// Create a new memory item with empty metadata.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Attach the conventional `tag` metadata entry.
    pub fn with_tag(self, tag: impl Into<String>) -> Self {
        self.with_metadata("tag", tag)
    }

    /// The conventional `tag` metadata entry, if present.
    pub fn tag(&self) -> Option<&str> {
        self.metadata.get("tag").map(String::as_str)
    }

    /// Whether two items name the same memory, regardless of content.
    pub fn same_memory_as(&self, other: &MemoryItem) -> bool {
        self.id == other.id
    }
}

/// A memory item paired with its relevance score and original corpus position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMemory {
    pub item: MemoryItem,

    /// Combined relevance score; higher is more relevant.
    pub score: f32,

    /// Position of the item in the source corpus, used to break score ties.
    pub corpus_index: usize,
}

/// An ordered set of scored memories.
///
/// Ordering is a strict total order: descending score, ties broken by
/// ascending corpus index. The constructor enforces it, so any two rankings
/// built from the same entries are identical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RetrievalResult {
    entries: Vec<ScoredMemory>,
}

impl RetrievalResult {
    /// An empty result, e.g. for an empty corpus.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a result from unordered entries, imposing the canonical order
    /// and truncating to `limit`.
    pub fn ranked(mut entries: Vec<ScoredMemory>, limit: usize) -> Self {
        entries.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.corpus_index.cmp(&b.corpus_index))
        });
        entries.truncate(limit);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &ScoredMemory> {
        self.entries.iter()
    }

    /// The ranked items without their scores.
    pub fn items(&self) -> impl Iterator<Item = &MemoryItem> {
        self.entries.iter().map(|e| &e.item)
    }

    /// Check the ordering invariant: scores non-increasing, equal scores in
    /// corpus order.
    pub fn is_strictly_ordered(&self) -> bool {
        self.entries.windows(2).all(|pair| {
            pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score
                    && pair[0].corpus_index < pair[1].corpus_index)
        })
    }
}

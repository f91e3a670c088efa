//! Generation plan - ordered directives handed to the writer.

use serde::{Deserialize, Serialize};

/// A single generation directive.
///
/// Beats only reorder and annotate material that already exists in the query
/// or the retrieved memories; they never introduce new constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Beat {
    /// Ground the continuation in a retrieved memory.
    Anchor {
        /// Id of the memory the excerpt came from.
        memory_id: String,
        /// The portion of the memory to weave in.
        excerpt: String,
    },

    /// Work a required term into the prose, verbatim.
    Weave { term: String },

    /// Close with a tone or pacing hint.
    Atmosphere { hint: String },
}

/// An ordered sequence of beats.
///
/// Opaque to the orchestrator; only the writer interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Plan {
    pub beats: Vec<Beat>,
}

impl Plan {
    pub fn new(beats: Vec<Beat>) -> Self {
        Self { beats }
    }

    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    /// The terms carried by `Weave` beats, in beat order.
    pub fn woven_terms(&self) -> Vec<&str> {
        self.beats
            .iter()
            .filter_map(|beat| match beat {
                Beat::Weave { term } => Some(term.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The memory ids carried by `Anchor` beats, in beat order.
    pub fn anchored_memories(&self) -> Vec<&str> {
        self.beats
            .iter()
            .filter_map(|beat| match beat {
                Beat::Anchor { memory_id, .. } => Some(memory_id.as_str()),
                _ => None,
            })
            .collect()
    }
}

//! # Story Engine (The Loom)
//!
//! The generation pipeline of the emergent narrative system. This crate turns
//! a free-text creative request into a draft continuation, grounded in
//! retrieved memories and gated by hard continuity constraints, with behavior
//! limited by the caller's access tier.
//!
//! ## Core Components
//!
//! - **understanding**: Normalizes the raw request into a structured query
//! - **retrieval**: Ranks candidate memories with a hybrid lexical/semantic score
//! - **direction**: Sequences retrieved material into generation beats
//! - **writing**: Renders the beats into a draft within the tier's length limit
//! - **review**: The hard constraint gate and the advisory semantic review
//! - **engine**: The orchestrator that runs the stages and assembles the trace
//!
//! ## Design Philosophy
//!
//! - **Strategies Behind Contracts**: Each stage is a capability trait; the
//!   rule-based baselines can be swapped for model-backed implementations
//!   without the orchestrator noticing
//! - **Forward-Only Data Flow**: Stages run strictly in order and hand off
//!   freshly built immutable artifacts
//! - **Reject, Don't Rewrite**: A draft that fails the hard gate is returned
//!   as-is with its diagnostics; the engine never edits a draft after the fact

pub mod direction;
pub mod engine;
pub mod error;
pub mod retrieval;
pub mod review;
pub mod understanding;
pub mod writing;

pub use direction::*;
pub use engine::*;
pub use error::*;
pub use retrieval::*;
pub use review::*;
pub use understanding::*;
pub use writing::*;

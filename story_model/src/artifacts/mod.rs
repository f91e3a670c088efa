//! Pipeline artifacts - the immutable hand-offs between stages.
//!
//! Each stage consumes the artifacts of its predecessors and produces exactly
//! one new artifact:
//!
//! - **query**: Structured form of the raw request
//! - **plan**: Ordered generation directives
//! - **check**: Hard-gate and advisory review outcomes
//! - **response**: The draft, and the debug trace of everything above

mod check;
mod plan;
mod query;
mod response;

pub use check::*;
pub use plan::*;
pub use query::*;
pub use response::*;

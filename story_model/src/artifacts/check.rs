//! Check results - outcomes of the hard gate and the advisory review.

use serde::{Deserialize, Serialize};

/// The constraint a violation was raised against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// A must-include term is absent from the draft.
    MissingRequiredTerm,

    /// A must-avoid term is present in the draft.
    ForbiddenTermPresent,
}

/// A character-offset range over the case-folded draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// One structured diagnostic produced by a checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ConstraintKind,

    /// The offending term, verbatim as constrained.
    pub term: String,

    /// Where the offense occurs, when it has a location at all.
    pub span: Option<Span>,
}

impl Violation {
    /// A required term that never appeared.
    pub fn missing_term(term: impl Into<String>) -> Self {
        Self {
            kind: ConstraintKind::MissingRequiredTerm,
            term: term.into(),
            span: None,
        }
    }

    /// A forbidden term found at `span`.
    pub fn forbidden_term(term: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ConstraintKind::ForbiddenTermPresent,
            term: term.into(),
            span: Some(span),
        }
    }
}

/// The outcome of a consistency check.
///
/// `pass` is true exactly when `violations` is empty; the constructors keep
/// the two in lockstep so they cannot drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub pass: bool,
    pub violations: Vec<Violation>,
}

impl CheckResult {
    /// A clean pass with no diagnostics.
    pub fn passing() -> Self {
        Self {
            pass: true,
            violations: Vec::new(),
        }
    }

    /// Build a result from collected diagnostics.
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            pass: violations.is_empty(),
            violations,
        }
    }
}

impl Default for CheckResult {
    fn default() -> Self {
        Self::passing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_tracks_violations() {
        assert!(CheckResult::from_violations(Vec::new()).pass);

        let failed = CheckResult::from_violations(vec![Violation::missing_term("dagger")]);
        assert!(!failed.pass);
        assert_eq!(failed.violations.len(), 1);
    }

    #[test]
    fn test_violation_constructors() {
        let missing = Violation::missing_term("dagger");
        assert_eq!(missing.kind, ConstraintKind::MissingRequiredTerm);
        assert_eq!(missing.span, None);

        let forbidden = Violation::forbidden_term("fire", Span::new(10, 14));
        assert_eq!(forbidden.kind, ConstraintKind::ForbiddenTermPresent);
        assert_eq!(forbidden.span, Some(Span::new(10, 14)));
    }
}

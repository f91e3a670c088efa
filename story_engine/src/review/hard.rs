//! Mechanical validation of must-include and must-avoid constraints.

use story_model::{
    CheckResult, Draft, EngineRequest, Plan, RetrievalResult, Span, StructuredQuery, UserTier,
    Violation,
};

use crate::error::StageError;
use crate::review::HardChecker;

/// Rule-based hard gate.
///
/// Matching is a case-insensitive substring check over the Unicode-lowercased
/// draft. Every must-include term must appear; no must-avoid term may appear.
/// Violation spans are character offsets into the case-folded draft.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedHardChecker;

impl RuleBasedHardChecker {
    pub fn new() -> Self {
        Self
    }

    /// Char-offset span of the first occurrence of `term` in `folded`, if any.
    fn find_span(folded: &str, term: &str) -> Option<Span> {
        let folded_term = term.to_lowercase();
        let byte_start = folded.find(&folded_term)?;
        let start = folded[..byte_start].chars().count();
        let end = start + folded_term.chars().count();
        Some(Span::new(start, end))
    }
}

impl HardChecker for RuleBasedHardChecker {
    fn check(
        &self,
        draft: &Draft,
        _request: &EngineRequest,
        query: &StructuredQuery,
        _memories: &RetrievalResult,
        _plan: &Plan,
        _tier: UserTier,
    ) -> Result<CheckResult, StageError> {
        let folded = draft.as_str().to_lowercase();
        let mut violations = Vec::new();

        for term in &query.must_include {
            if !folded.contains(&term.to_lowercase()) {
                violations.push(Violation::missing_term(term.clone()));
            }
        }

        for term in &query.must_avoid {
            if let Some(span) = Self::find_span(&folded, term) {
                violations.push(Violation::forbidden_term(term.clone(), span));
            }
        }

        Ok(CheckResult::from_violations(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_model::ConstraintKind;

    fn check(draft: &str, include: &[&str], avoid: &[&str]) -> CheckResult {
        let mut query = StructuredQuery::degraded(4);
        query.must_include = include.iter().map(|t| t.to_string()).collect();
        query.must_avoid = avoid.iter().map(|t| t.to_string()).collect();

        RuleBasedHardChecker::new()
            .check(
                &Draft::new(draft),
                &EngineRequest::new("continue"),
                &query,
                &RetrievalResult::empty(),
                &Plan::default(),
                UserTier::Vip,
            )
            .expect("rule-based checking is infallible")
    }

    #[test]
    fn test_clean_draft_passes() {
        let result = check(
            "The silver dagger gleamed in the moonlight.",
            &["silver dagger"],
            &["fire magic"],
        );
        assert!(result.pass);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_missing_include_fails_with_named_term() {
        let result = check("An uneventful evening.", &["silver dagger"], &[]);

        assert!(!result.pass);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].kind, ConstraintKind::MissingRequiredTerm);
        assert_eq!(result.violations[0].term, "silver dagger");
        assert_eq!(result.violations[0].span, None);
    }

    #[test]
    fn test_forbidden_term_fails_with_span() {
        let result = check("Then fire magic erupted.", &[], &["fire magic"]);

        assert!(!result.pass);
        let violation = &result.violations[0];
        assert_eq!(violation.kind, ConstraintKind::ForbiddenTermPresent);
        assert_eq!(violation.term, "fire magic");

        let span = violation.span.expect("forbidden term has a span");
        assert_eq!(span, Span::new(5, 15));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let passing = check("The SILVER DAGGER waits.", &["silver dagger"], &[]);
        assert!(passing.pass);

        let failing = check("FIRE MAGIC burns.", &[], &["fire magic"]);
        assert!(!failing.pass);
    }

    #[test]
    fn test_cjk_constraints() {
        let result = check(
            "他默念屠龙咒文，想起巨龙的银器弱点。",
            &["屠龙咒文", "银器弱点"],
            &["火系魔法"],
        );
        assert!(result.pass);

        let tainted = check("他施展了火系魔法。", &["屠龙咒文"], &["火系魔法"]);
        assert!(!tainted.pass);
        assert_eq!(tainted.violations.len(), 2);
    }

    #[test]
    fn test_span_is_in_chars_not_bytes() {
        let result = check("先有火系魔法", &[], &["火系魔法"]);

        let span = result.violations[0].span.expect("span present");
        assert_eq!(span, Span::new(2, 6));
    }

    #[test]
    fn test_one_violation_per_constraint() {
        let result = check(
            "fire magic and more fire magic",
            &["dagger", "rune"],
            &["fire magic"],
        );

        assert_eq!(result.violations.len(), 3);
    }

    #[test]
    fn test_checking_is_deterministic() {
        let first = check("Some draft.", &["dagger"], &["fire"]);
        let second = check("Some draft.", &["dagger"], &["fire"]);
        assert_eq!(first, second);
    }
}

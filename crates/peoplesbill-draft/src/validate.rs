//! Drafting-form checks for clause bodies.

use peoplesbill_core::ClauseValidation;

pub const MIN_CLAUSE_CHARS: usize = 50;

const LEGAL_KEYWORDS: &[&str] = &["shall", "may", "pursuant", "notwithstanding", "provided"];
const SUBJECT_KEYWORDS: &[&str] = &["officer", "person", "prosecutor", "court"];

/// A failed check and the suggestion that addresses it.
struct Check {
    issue: &'static str,
    suggestion: &'static str,
    passes: fn(&str) -> bool,
}

const CHECKS: &[Check] = &[
    Check {
        issue: "Clause is too short",
        suggestion: "Expand the clause with more specific details",
        passes: |text| text.chars().count() >= MIN_CLAUSE_CHARS,
    },
    Check {
        issue: "Missing formal legal language",
        suggestion: "Use formal legal terms like 'shall', 'pursuant to', etc.",
        passes: |text| contains_any(text, LEGAL_KEYWORDS),
    },
    Check {
        issue: "Unclear subject of the clause",
        suggestion: "Clearly identify who is subject to this provision",
        passes: |text| contains_any(text, SUBJECT_KEYWORDS),
    },
];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

/// Check a clause body for length, legal register and a clear subject.
pub fn validate_clause(content: &str) -> ClauseValidation {
    let failed: Vec<&Check> = CHECKS.iter().filter(|c| !(c.passes)(content)).collect();
    ClauseValidation {
        is_valid: failed.is_empty(),
        issues: failed.iter().map(|c| c.issue.to_string()).collect(),
        suggestions: failed.iter().map(|c| c.suggestion.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::CLAUSE_TEMPLATES;

    #[test]
    fn short_text_fails_every_check() {
        let v = validate_clause("short");
        assert!(!v.is_valid);
        assert_eq!(
            v.issues,
            [
                "Clause is too short",
                "Missing formal legal language",
                "Unclear subject of the clause"
            ]
        );
        assert_eq!(v.suggestions.len(), 3);
        assert_eq!(v.suggestions[0], "Expand the clause with more specific details");
    }

    #[test]
    fn well_formed_clause_passes() {
        let v = validate_clause(
            "Every public officer shall declare assets to the Office of the Special Prosecutor.",
        );
        assert!(v.is_valid);
        assert!(v.issues.is_empty());
        assert!(v.suggestions.is_empty());
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let v = validate_clause("NOTWITHSTANDING anything to the contrary, the COURT decides all.");
        assert!(v.is_valid, "{v:?}");
    }

    #[test]
    fn missing_subject_reported_alone() {
        let v = validate_clause("All funds shall be returned to the consolidated account promptly.");
        assert_eq!(v.issues, ["Unclear subject of the clause"]);
        assert_eq!(v.suggestions, ["Clearly identify who is subject to this provision"]);
    }

    #[test]
    fn every_template_body_is_valid() {
        for t in CLAUSE_TEMPLATES {
            assert!(validate_clause(t.body).is_valid, "{}", t.key);
        }
    }
}

//! Draft legal clauses and their validation reports.

use serde::{Deserialize, Serialize};

/// A generated legal-text provision derived from one cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub title: String,
    pub content: String,
    pub rationale: String,
    /// Source cluster confidence, possibly boosted, in `[0.0, 1.0]`.
    pub confidence: f32,
    pub based_on_submissions: usize,
}

/// Outcome of checking a clause body for basic legal drafting form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseValidation {
    pub is_valid: bool,
    pub issues: Vec<String>,
    /// One suggestion per recognised issue, in issue order.
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clause_json_roundtrip() {
        let clause = Clause {
            title: "Right to Fair Hearing".into(),
            content: "Every person subject to investigation shall have the right to notice.".into(),
            rationale: "Protects constitutional rights during investigations".into(),
            confidence: 0.8,
            based_on_submissions: 4,
        };
        let json = serde_json::to_string(&clause).unwrap();
        assert!(json.contains("\"based_on_submissions\":4"));
        let parsed: Clause = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, clause);
    }
}

use peoplesbill_core::{Clause, Cluster, Submission};
use tracing::info;

use crate::extract::DraftParameters;
use crate::templates;

/// Clusters with more members than this get a confidence boost.
const BOOST_THRESHOLD: usize = 10;
const CONFIDENCE_BOOST: f32 = 0.1;

/// Turns a cluster and its member submissions into a draft clause.
///
/// Stateless; identical inputs always give an identical clause.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClauseGenerator;

impl ClauseGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, cluster: &Cluster, submissions: &[Submission]) -> Clause {
        let template = templates::resolve(&cluster.theme);
        let params = DraftParameters::from_submissions(submissions);

        let mut confidence = cluster.confidence_score;
        if submissions.len() > BOOST_THRESHOLD {
            confidence += CONFIDENCE_BOOST;
        }

        let clause = Clause {
            title: template.title.into_owned(),
            content: params.fill(&template.body),
            rationale: template.rationale.into_owned(),
            confidence: confidence.clamp(0.0, 1.0),
            based_on_submissions: submissions.len(),
        };
        info!(
            theme = %cluster.theme,
            title = %clause.title,
            submissions = submissions.len(),
            "clause drafted"
        );
        clause
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peoplesbill_core::Region;
    use proptest::prelude::*;

    fn cluster(theme: &str, confidence: f32) -> Cluster {
        Cluster {
            theme: theme.into(),
            summary: String::new(),
            representative_text: String::new(),
            keywords: Vec::new(),
            submission_ids: Vec::new(),
            confidence_score: confidence,
            regions: Vec::new(),
        }
    }

    fn subs(texts: &[&str]) -> Vec<Submission> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Submission::new(i as i64 + 1, *t, Region::GreaterAccra))
            .collect()
    }

    #[test]
    fn asset_declaration_defaults() {
        let members = subs(&[
            "Officers must publish an asset declaration",
            "Asset declaration for all ministers",
            "Make asset declaration public",
        ]);
        let clause = ClauseGenerator::new().generate(&cluster("Asset Declaration", 0.95), &members);
        assert_eq!(clause.title, "Asset Declaration Requirements");
        assert!(clause.content.contains("thirty (30) days"));
        assert!(clause.content.contains("every two (2) years"));
        assert!(!clause.content.contains('{'));
        assert_eq!(clause.confidence, 0.95);
        assert_eq!(clause.based_on_submissions, 3);
    }

    #[test]
    fn extracted_values_fill_penalties() {
        let members = subs(&["Ban offenders for 12 years", "Jail them for 8 years"]);
        let clause = ClauseGenerator::new().generate(&cluster("Penalties and Sanctions", 0.8), &members);
        assert!(clause.content.contains("not less than 12 years"));
        assert!(clause.content.contains("not exceeding 8 years"));
    }

    #[test]
    fn investigation_timeframe_reads_naturally() {
        let members = subs(&["Investigate within 14 days of a petition"]);
        let clause = ClauseGenerator::new().generate(&cluster("Investigation Process", 0.7), &members);
        assert!(clause.content.contains("within 14 days, commence"));
    }

    #[test]
    fn whistleblower_percentage_fixed() {
        let clause = ClauseGenerator::new().generate(&cluster("Whistleblower Protection", 0.7), &[]);
        assert!(clause.content.contains("not exceeding 10% of recovered assets"));
        assert_eq!(clause.based_on_submissions, 0);
    }

    #[test]
    fn generic_provision_for_unknown_theme() {
        let clause = ClauseGenerator::new().generate(&cluster("Roads-Related Submissions", 0.7), &[]);
        assert_eq!(clause.title, "Provision for Roads-Related Submissions");
        assert!(clause.content.contains("measures regarding roads-related submissions"));
    }

    #[test]
    fn large_clusters_boosted_and_capped() {
        let texts = vec!["declare assets"; 11];
        let members = subs(&texts);
        let g = ClauseGenerator::new();
        let boosted = g.generate(&cluster("Asset Declaration", 0.7), &members);
        assert!((boosted.confidence - 0.8).abs() < 1e-6);
        let capped = g.generate(&cluster("Asset Declaration", 0.95), &members);
        assert_eq!(capped.confidence, 1.0);
        let unboosted = g.generate(&cluster("Asset Declaration", 0.7), &members[..10]);
        assert_eq!(unboosted.confidence, 0.7);
    }

    #[test]
    fn generation_is_idempotent() {
        let members = subs(&["declare within 45 days annually", "prison 3 years"]);
        let c = cluster("Asset Declaration", 0.6);
        let g = ClauseGenerator::new();
        assert_eq!(g.generate(&c, &members), g.generate(&c, &members));
    }

    proptest! {
        #[test]
        fn confidence_always_in_range(conf in 0.0f32..=1.0, n in 0usize..25, theme in "[A-Za-z ]{0,24}") {
            let members = subs(&vec!["report wealth within 9 days"; n]);
            let clause = ClauseGenerator::new().generate(&cluster(&theme, conf), &members);
            prop_assert!((0.0..=1.0).contains(&clause.confidence));
            prop_assert_eq!(clause.based_on_submissions, n);
            prop_assert!(!clause.content.contains(crate::templates::TIMEFRAME));
        }
    }
}

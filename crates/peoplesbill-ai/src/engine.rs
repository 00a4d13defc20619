//! Clustering engine: submissions in, themed clusters out.
//!
//! # Pipeline
//!
//! 1. Normalise every submission text
//! 2. Batches below [`ClusteringConfig::min_batch_size`] become one cluster
//! 3. TF-IDF vectorise (unigrams + bigrams, capped vocabulary)
//! 4. PCA-project when the vocabulary exceeds the component target
//! 5. Cosine distance matrix → DBSCAN
//! 6. Noise points are collected into one extra group
//! 7. Each group gets keywords, theme, summary, representative, confidence
//! 8. Groups are sorted by size, largest first (stable)
//!
//! The engine holds configuration only. Every call fits its own vocabulary,
//! so concurrent calls on a shared engine are independent.

use peoplesbill_core::{Cluster, Region, Submission, normalize_text};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ClusteringConfig;
use crate::dbscan::{ClusterLabel, dbscan};
use crate::error::ClusterError;
use crate::pca;
use crate::similarity::{
    centroid, cosine_sim, distance_matrix, euclidean, round2, similarity_matrix,
};
use crate::themes::{extract_keywords, generate_summary, generate_theme};
use crate::tfidf::TfidfVectorizer;

/// Merged clusters keep at most this many keywords.
const MERGED_KEYWORD_CAP: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct ClusteringEngine {
    config: ClusteringConfig,
}

/// One hit from [`ClusteringEngine::find_similar`].
#[derive(Debug, Clone, Serialize)]
pub struct SimilarSubmission<'a> {
    pub submission: &'a Submission,
    /// Cosine similarity to the query, rounded to two decimals.
    pub similarity_score: f32,
}

impl ClusteringEngine {
    pub fn new(config: ClusteringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Group a batch of submissions into clusters.
    ///
    /// Every submission lands in exactly one returned cluster. An empty
    /// result means either an empty batch or a batch with no usable
    /// vocabulary; the latter is logged at `warn`.
    pub fn cluster_submissions(&self, submissions: &[Submission]) -> Vec<Cluster> {
        if submissions.is_empty() {
            return Vec::new();
        }

        let texts: Vec<String> = submissions.iter().map(|s| normalize_text(&s.content)).collect();
        info!(submissions = submissions.len(), "clustering submissions");

        if submissions.len() < self.config.min_batch_size {
            debug!("batch below minimum size, returning a single cluster");
            return vec![self.single_cluster(submissions, &texts)];
        }

        match self.density_clusters(submissions, &texts) {
            Ok(clusters) => {
                info!(clusters = clusters.len(), "clustering complete");
                clusters
            }
            Err(e) => {
                warn!(error = %e, "clustering failed, returning no clusters");
                Vec::new()
            }
        }
    }

    /// Rank `submissions` by TF-IDF cosine similarity to `query`.
    ///
    /// Returns at most `top_k` hits scoring above the configured floor,
    /// best first. Equal scores keep submission order.
    pub fn find_similar<'a>(
        &self,
        query: &str,
        submissions: &'a [Submission],
        top_k: usize,
    ) -> Vec<SimilarSubmission<'a>> {
        if submissions.is_empty() || top_k == 0 {
            return Vec::new();
        }

        let mut texts = Vec::with_capacity(submissions.len() + 1);
        texts.push(normalize_text(query));
        texts.extend(submissions.iter().map(|s| normalize_text(&s.content)));

        let matrix = match TfidfVectorizer::new(self.config.max_features).fit_transform(&texts) {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, "similarity search vectorisation failed");
                return Vec::new();
            }
        };

        let query_vec = &matrix.rows[0];
        let scores: Vec<f64> = matrix.rows[1..]
            .iter()
            .map(|row| cosine_sim(query_vec, row))
            .collect();

        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let hits: Vec<SimilarSubmission<'a>> = order
            .into_iter()
            .take(top_k)
            .filter(|&i| scores[i] > self.config.similarity_floor)
            .map(|i| SimilarSubmission {
                submission: &submissions[i],
                similarity_score: round2(scores[i]) as f32,
            })
            .collect();

        debug!(query = %query, hits = hits.len(), "similarity search");
        hits
    }

    /// Combine two clusters into one.
    ///
    /// Keeps the first cluster's theme and representative text; keywords,
    /// members and regions are de-duplicated in order; confidence is the
    /// mean of the two.
    pub fn merge_clusters(&self, first: &Cluster, second: &Cluster) -> Cluster {
        let mut keywords = dedup_in_order(first.keywords.iter().chain(&second.keywords).cloned());
        keywords.truncate(MERGED_KEYWORD_CAP);

        let confidence = ((first.confidence_score + second.confidence_score) / 2.0).clamp(0.0, 1.0);

        Cluster {
            theme: first.theme.clone(),
            summary: generate_summary(&[first.summary.as_str(), second.summary.as_str()]),
            representative_text: first.representative_text.clone(),
            keywords,
            submission_ids: dedup_in_order(
                first.submission_ids.iter().chain(&second.submission_ids).copied(),
            ),
            confidence_score: confidence,
            regions: dedup_in_order(first.regions.iter().chain(&second.regions).copied()),
        }
    }

    fn single_cluster(&self, submissions: &[Submission], texts: &[String]) -> Cluster {
        let keywords = extract_keywords(texts, self.config.keyword_count);
        Cluster {
            theme: generate_theme(&keywords),
            summary: generate_summary(texts),
            representative_text: texts.first().cloned().unwrap_or_default(),
            keywords,
            submission_ids: submissions.iter().map(|s| s.id).collect(),
            confidence_score: self.config.small_batch_confidence.clamp(0.0, 1.0),
            regions: regions_of(submissions.iter()),
        }
    }

    fn density_clusters(
        &self,
        submissions: &[Submission],
        texts: &[String],
    ) -> Result<Vec<Cluster>, ClusterError> {
        let tfidf = TfidfVectorizer::new(self.config.max_features).fit_transform(texts)?;
        debug!(vocabulary = tfidf.dim(), "tf-idf fitted");

        let vectors = if tfidf.dim() > self.config.pca_components {
            pca::project(&tfidf.rows, self.config.pca_components)?
        } else {
            tfidf.rows
        };

        let similarity = similarity_matrix(&vectors);
        let labels = dbscan(
            &distance_matrix(&similarity),
            self.config.eps,
            self.config.min_samples,
        );

        // Group indices by label, groups in first-encountered order.
        let mut groups: Vec<(ClusterLabel, Vec<usize>)> = Vec::new();
        for (idx, label) in labels.into_iter().enumerate() {
            match groups.iter_mut().find(|(l, _)| *l == label) {
                Some((_, members)) => members.push(idx),
                None => groups.push((label, vec![idx])),
            }
        }
        let noise = groups
            .iter()
            .find(|(l, _)| *l == ClusterLabel::Noise)
            .map_or(0, |(_, m)| m.len());
        debug!(groups = groups.len(), noise, "dbscan complete");

        let mut clusters: Vec<Cluster> = groups
            .iter()
            .map(|(_, indices)| self.describe(submissions, texts, &vectors, &similarity, indices))
            .collect();

        // Stable: equal sizes keep first-encountered order.
        clusters.sort_by_key(|c| std::cmp::Reverse(c.len()));
        Ok(clusters)
    }

    fn describe(
        &self,
        submissions: &[Submission],
        texts: &[String],
        vectors: &[Vec<f64>],
        similarity: &[Vec<f64>],
        indices: &[usize],
    ) -> Cluster {
        let member_texts: Vec<&str> = indices.iter().map(|&i| texts[i].as_str()).collect();
        let keywords = extract_keywords(&member_texts, self.config.keyword_count);

        let (representative, confidence) = if indices.len() > 1 {
            let center = centroid(vectors, indices);
            let mut best = indices[0];
            let mut best_dist = f64::INFINITY;
            for &i in indices {
                let d = euclidean(&vectors[i], &center);
                if d < best_dist {
                    best_dist = d;
                    best = i;
                }
            }

            let mut total = 0.0;
            for &i in indices {
                for &j in indices {
                    total += similarity[i][j];
                }
            }
            let mean = total / (indices.len() * indices.len()) as f64;
            let confidence = round2((mean + self.config.confidence_boost).min(1.0)).clamp(0.0, 1.0);
            (texts[best].clone(), confidence as f32)
        } else {
            (
                texts[indices[0]].clone(),
                self.config.singleton_confidence.clamp(0.0, 1.0),
            )
        };

        Cluster {
            theme: generate_theme(&keywords),
            summary: generate_summary(&member_texts),
            representative_text: representative,
            keywords,
            submission_ids: indices.iter().map(|&i| submissions[i].id).collect(),
            confidence_score: confidence,
            regions: regions_of(indices.iter().map(|&i| &submissions[i])),
        }
    }
}

fn regions_of<'a>(submissions: impl Iterator<Item = &'a Submission>) -> Vec<Region> {
    dedup_in_order(submissions.map(|s| s.region))
}

fn dedup_in_order<T: PartialEq>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sub(id: i64, content: &str, region: Region) -> Submission {
        Submission::new(id, content, region)
    }

    fn all_ids(clusters: &[Cluster]) -> Vec<i64> {
        let mut ids: Vec<i64> = clusters.iter().flat_map(|c| c.submission_ids.clone()).collect();
        ids.sort_unstable();
        ids
    }

    const SHARED: &str = "Public officers must declare all assets and liabilities to the special prosecutor";

    #[test]
    fn empty_batch_is_empty() {
        assert!(ClusteringEngine::default().cluster_submissions(&[]).is_empty());
    }

    #[test]
    fn small_batch_forms_single_cluster() {
        let subs = vec![
            sub(1, "Public officers must declare their assets.", Region::Ashanti),
            sub(2, "Asset declaration should be mandatory", Region::Volta),
            sub(3, "Every asset declaration must be published", Region::Ashanti),
        ];
        let clusters = ClusteringEngine::default().cluster_submissions(&subs);
        assert_eq!(clusters.len(), 1);

        let c = &clusters[0];
        assert_eq!(c.submission_ids, vec![1, 2, 3]);
        assert_eq!(c.confidence_score, 0.95);
        assert_eq!(c.theme, "Asset Declaration");
        assert_eq!(c.representative_text, "public officers must declare their assets");
        assert_eq!(c.regions, vec![Region::Ashanti, Region::Volta]);
        assert_eq!(c.keywords[0], "asset");
    }

    #[test]
    fn outliers_collect_in_noise_group() {
        let mut subs: Vec<Submission> = (1..=6).map(|i| sub(i, SHARED, Region::Central)).collect();
        subs.push(sub(7, "Fix potholes along highway roads quickly", Region::Oti));
        subs.push(sub(8, "Schools need textbooks and teachers", Region::Bono));

        let clusters = ClusteringEngine::default().cluster_submissions(&subs);
        assert!(clusters.len() >= 2);
        assert_eq!(all_ids(&clusters), (1..=8).collect::<Vec<_>>());

        assert_eq!(clusters[0].submission_ids, vec![1, 2, 3, 4, 5, 6]);
        assert!((clusters[0].confidence_score - 1.0).abs() < 1e-6);

        assert_eq!(clusters[1].submission_ids, vec![7, 8]);
        // Mean of [[1, 0], [0, 1]] plus boost.
        assert!((clusters[1].confidence_score - 0.8).abs() < 0.01);
        assert_eq!(clusters[1].regions, vec![Region::Oti, Region::Bono]);
    }

    #[test]
    fn large_vocabulary_goes_through_projection() {
        let shared = "Every public officer holding elected appointed office shall submit sworn \
                      declarations listing houses land vehicles shares savings pensions \
                      businesses spouses children trusts foreign accounts annually";
        let mut subs: Vec<Submission> = (1..=6).map(|i| sub(i, shared, Region::Western)).collect();
        subs.push(sub(
            7,
            "Repair potholes highways bridges culverts drainage gutters streetlights pavements",
            Region::Savannah,
        ));
        subs.push(sub(
            8,
            "Recruit teachers nurses midwives doctors pharmacists librarians counsellors coaches",
            Region::Northern,
        ));

        let clusters = ClusteringEngine::default().cluster_submissions(&subs);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].submission_ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(clusters[1].submission_ids, vec![7, 8]);
        for c in &clusters {
            assert!((0.0..=1.0).contains(&c.confidence_score));
        }
    }

    #[test]
    fn single_outlier_is_singleton() {
        let mut subs: Vec<Submission> = (1..=5).map(|i| sub(i, SHARED, Region::Eastern)).collect();
        subs.push(sub(6, "Fix potholes along highway roads quickly", Region::Oti));

        let clusters = ClusteringEngine::default().cluster_submissions(&subs);
        assert_eq!(clusters.len(), 2);
        let single = &clusters[1];
        assert_eq!(single.submission_ids, vec![6]);
        assert_eq!(single.confidence_score, 0.7);
        assert_eq!(single.representative_text, "fix potholes along highway roads quickly");
    }

    #[test]
    fn equal_sized_clusters_keep_first_seen_order() {
        const ROADS: &str = "Repair potholes on highway bridges";
        const SCHOOLS: &str = "Recruit teachers nurses doctors";
        let subs = vec![
            sub(1, ROADS, Region::Oti),
            sub(2, SCHOOLS, Region::Bono),
            sub(3, ROADS, Region::Volta),
            sub(4, SCHOOLS, Region::Central),
            sub(5, "Publish budget audits online", Region::Ahafo),
        ];

        let clusters = ClusteringEngine::default().cluster_submissions(&subs);
        assert_eq!(clusters.len(), 3);
        assert_eq!(clusters[0].submission_ids, vec![1, 3]);
        assert_eq!(clusters[1].submission_ids, vec![2, 4]);
        assert_eq!(clusters[2].submission_ids, vec![5]);

        // Reversing the input flips which pair is seen first.
        let mut reversed: Vec<Submission> = subs[..4].iter().rev().cloned().collect();
        reversed.push(subs[4].clone());
        let clusters = ClusteringEngine::default().cluster_submissions(&reversed);
        assert_eq!(clusters[0].submission_ids, vec![4, 2]);
        assert_eq!(clusters[1].submission_ids, vec![3, 1]);
    }

    #[test]
    fn stop_word_batch_yields_nothing() {
        let subs: Vec<Submission> = (1..=5).map(|i| sub(i, "the and of it", Region::Ahafo)).collect();
        assert!(ClusteringEngine::default().cluster_submissions(&subs).is_empty());
    }

    #[test]
    fn find_similar_ranks_and_filters() {
        let subs = vec![
            sub(1, "Fix potholes on highway roads", Region::Oti),
            sub(2, "Asset declaration for every public officer", Region::Ashanti),
            sub(3, "Publish asset declaration forms online", Region::Volta),
            sub(4, "Recruit more teachers", Region::Bono),
        ];
        let hits = ClusteringEngine::default().find_similar("asset declaration", &subs, 5);
        assert_eq!(hits.len(), 2);
        let ids: Vec<i64> = hits.iter().map(|h| h.submission.id).collect();
        assert!(ids.contains(&2) && ids.contains(&3));
        assert!(hits[0].similarity_score >= hits[1].similarity_score);
        assert!(hits.iter().all(|h| h.similarity_score > 0.1 && h.similarity_score <= 1.0));
    }

    #[test]
    fn find_similar_respects_top_k_and_empty() {
        let subs: Vec<Submission> = (1..=4).map(|i| sub(i, SHARED, Region::Central)).collect();
        let engine = ClusteringEngine::default();
        let hits = engine.find_similar("declare assets", &subs, 2);
        assert_eq!(hits.len(), 2);
        // Equal scores keep submission order.
        assert_eq!(hits[0].submission.id, 1);
        assert_eq!(hits[1].submission.id, 2);

        assert!(engine.find_similar("declare assets", &[], 5).is_empty());
        assert!(engine.find_similar("the", &[sub(1, "and of", Region::Oti)], 5).is_empty());
    }

    #[test]
    fn merge_combines_members_and_keywords() {
        let a = Cluster {
            theme: "Asset Declaration".into(),
            summary: "Citizens suggest: declare assets".into(),
            representative_text: "declare assets".into(),
            keywords: (0..7).map(|i| format!("kw{i}")).collect(),
            submission_ids: vec![1, 2],
            confidence_score: 0.9,
            regions: vec![Region::Ashanti],
        };
        let b = Cluster {
            theme: "Lifestyle Audits".into(),
            summary: "Citizens suggest: audit lifestyles".into(),
            representative_text: "audit lifestyles".into(),
            keywords: (5..12).map(|i| format!("kw{i}")).collect(),
            submission_ids: vec![2, 3],
            confidence_score: 0.7,
            regions: vec![Region::Ashanti, Region::Volta],
        };

        let merged = ClusteringEngine::default().merge_clusters(&a, &b);
        assert_eq!(merged.theme, "Asset Declaration");
        assert_eq!(merged.representative_text, "declare assets");
        assert_eq!(merged.keywords.len(), 10);
        assert_eq!(merged.keywords[0], "kw0");
        assert_eq!(merged.keywords[9], "kw9");
        assert_eq!(merged.submission_ids, vec![1, 2, 3]);
        assert!((merged.confidence_score - 0.8).abs() < 1e-6);
        assert_eq!(merged.regions, vec![Region::Ashanti, Region::Volta]);
        assert!(merged.summary.starts_with("Citizens suggest: Citizens suggest: declare assets"));
    }

    const WORDS: &[&str] = &[
        "asset", "declaration", "wealth", "officer", "audit", "bank", "income", "prison",
        "roads", "schools", "hospital", "water", "transparency", "whistleblower", "property",
        "investigation", "penalty", "court",
    ];

    fn batch(size: std::ops::Range<usize>) -> impl Strategy<Value = Vec<Submission>> {
        prop::collection::vec(
            (prop::collection::vec(prop::sample::select(WORDS), 1..8), 0usize..16),
            size,
        )
        .prop_map(|docs| {
            docs.into_iter()
                .enumerate()
                .map(|(i, (words, r))| sub(i as i64 + 100, &words.join(" "), Region::ALL[r]))
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn clusters_partition_the_batch(subs in batch(0..14)) {
            let clusters = ClusteringEngine::default().cluster_submissions(&subs);
            let mut expected: Vec<i64> = subs.iter().map(|s| s.id).collect();
            expected.sort_unstable();
            // Batches drawn from WORDS always have a vocabulary.
            prop_assert_eq!(all_ids(&clusters), expected);
        }

        #[test]
        fn confidences_in_range_and_sizes_descending(subs in batch(0..14)) {
            let clusters = ClusteringEngine::default().cluster_submissions(&subs);
            for c in &clusters {
                prop_assert!((0.0..=1.0).contains(&c.confidence_score));
                prop_assert!(!c.is_empty());
            }
            for pair in clusters.windows(2) {
                prop_assert!(pair[0].len() >= pair[1].len());
            }
        }

        #[test]
        fn small_batches_are_one_cluster(subs in batch(1..5)) {
            let clusters = ClusteringEngine::default().cluster_submissions(&subs);
            prop_assert_eq!(clusters.len(), 1);
            prop_assert_eq!(clusters[0].confidence_score, 0.95);
            prop_assert_eq!(clusters[0].submission_ids.len(), subs.len());
        }
    }
}

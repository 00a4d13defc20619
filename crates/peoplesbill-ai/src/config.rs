/// Tunable parameters for [`crate::ClusteringEngine`].
///
/// Defaults reproduce the platform's production behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringConfig {
    /// Batches smaller than this skip vectorisation and form one cluster.
    pub min_batch_size: usize,
    pub small_batch_confidence: f32,
    /// Vocabulary cap for the TF-IDF vectorizer.
    pub max_features: usize,
    /// PCA target dimensionality, applied when the vocabulary is larger.
    pub pca_components: usize,
    /// DBSCAN neighbourhood radius in cosine distance.
    pub eps: f64,
    pub min_samples: usize,
    pub keyword_count: usize,
    pub singleton_confidence: f32,
    /// Added to mean intra-cluster similarity before capping at 1.0.
    pub confidence_boost: f64,
    /// Similarity floor for [`crate::ClusteringEngine::find_similar`].
    pub similarity_floor: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            min_batch_size: 5,
            small_batch_confidence: 0.95,
            max_features: 500,
            pca_components: 50,
            eps: 0.5,
            min_samples: 2,
            keyword_count: 5,
            singleton_confidence: 0.7,
            confidence_boost: 0.3,
            similarity_floor: 0.1,
        }
    }
}

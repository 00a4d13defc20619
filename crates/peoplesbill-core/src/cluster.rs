//! Cluster descriptors produced by the clustering engine.

use serde::{Deserialize, Serialize};

use crate::region::Region;

/// A computed grouping of submissions sharing a theme.
///
/// Recomputed from scratch on every clustering run; never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub theme: String,
    pub summary: String,
    /// Normalised text of the member nearest the cluster centroid.
    pub representative_text: String,
    /// Most frequent first.
    pub keywords: Vec<String>,
    pub submission_ids: Vec<i64>,
    /// Heuristic quality estimate in `[0.0, 1.0]`.
    pub confidence_score: f32,
    /// Distinct member regions, in first-seen order.
    pub regions: Vec<Region>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.submission_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submission_ids.is_empty()
    }
}

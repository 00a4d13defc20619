//! JSON input files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use peoplesbill_core::{Cluster, Submission};
use serde::de::DeserializeOwned;
use tracing::debug;

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// A JSON array of submissions.
pub fn load_submissions(path: &Path) -> Result<Vec<Submission>> {
    let submissions: Vec<Submission> = load_json(path)?;
    debug!(path = %path.display(), count = submissions.len(), "loaded submissions");
    Ok(submissions)
}

/// A JSON array of clusters, as written by `cluster --format json`.
pub fn load_clusters(path: &Path) -> Result<Vec<Cluster>> {
    let clusters: Vec<Cluster> = load_json(path)?;
    debug!(path = %path.display(), count = clusters.len(), "loaded clusters");
    Ok(clusters)
}

/// Member submissions of `cluster`, in the cluster's id order.
pub fn members(cluster: &Cluster, submissions: &[Submission]) -> Vec<Submission> {
    cluster
        .submission_ids
        .iter()
        .filter_map(|id| submissions.iter().find(|s| s.id == *id))
        .cloned()
        .collect()
}

pub fn pick<'a>(clusters: &'a [Cluster], index: usize) -> Result<&'a Cluster> {
    match clusters.get(index) {
        Some(c) => Ok(c),
        None => bail!("cluster index {index} out of range ({} clusters)", clusters.len()),
    }
}

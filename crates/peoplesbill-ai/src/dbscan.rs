//! Density-based clustering over a precomputed distance matrix.

use std::collections::VecDeque;

/// Outcome of [`dbscan`] for one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClusterLabel {
    /// Member of a density-connected cluster. Ids are dense from 0, in
    /// order of discovery.
    Assigned(usize),
    /// Not density-reachable from any core point.
    Noise,
}

/// Run DBSCAN on a square distance matrix.
///
/// A point's neighbourhood is every point (itself included) at distance
/// `<= eps`. Points with at least `min_samples` neighbours are core points;
/// clusters grow from core points in index order, and a border point joins
/// the first cluster that reaches it.
pub fn dbscan(distances: &[Vec<f64>], eps: f64, min_samples: usize) -> Vec<ClusterLabel> {
    let n = distances.len();
    let neighbours: Vec<Vec<usize>> = distances
        .iter()
        .map(|row| (0..n).filter(|&j| row[j] <= eps).collect())
        .collect();
    let is_core: Vec<bool> = neighbours.iter().map(|nb| nb.len() >= min_samples).collect();

    let mut labels: Vec<Option<ClusterLabel>> = vec![None; n];
    let mut next_id = 0;

    for start in 0..n {
        if labels[start].is_some() || !is_core[start] {
            continue;
        }

        let id = next_id;
        next_id += 1;
        labels[start] = Some(ClusterLabel::Assigned(id));

        let mut queue: VecDeque<usize> = VecDeque::from([start]);
        while let Some(p) = queue.pop_front() {
            if !is_core[p] {
                continue;
            }
            for &q in &neighbours[p] {
                if labels[q].is_none() {
                    labels[q] = Some(ClusterLabel::Assigned(id));
                    queue.push_back(q);
                }
            }
        }
    }

    labels
        .into_iter()
        .map(|l| l.unwrap_or(ClusterLabel::Noise))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Distance matrix for points on a line.
    fn line(points: &[f64]) -> Vec<Vec<f64>> {
        points
            .iter()
            .map(|a| points.iter().map(|b| (a - b).abs()).collect())
            .collect()
    }

    #[test]
    fn two_dense_groups_and_noise() {
        let labels = dbscan(&line(&[0.0, 0.1, 0.2, 5.0, 5.1, 10.0]), 0.5, 2);
        assert_eq!(labels[0], ClusterLabel::Assigned(0));
        assert_eq!(labels[1], ClusterLabel::Assigned(0));
        assert_eq!(labels[2], ClusterLabel::Assigned(0));
        assert_eq!(labels[3], ClusterLabel::Assigned(1));
        assert_eq!(labels[4], ClusterLabel::Assigned(1));
        assert_eq!(labels[5], ClusterLabel::Noise);
    }

    #[test]
    fn chains_through_core_points() {
        let labels = dbscan(&line(&[0.0, 0.4, 0.8, 1.2]), 0.5, 2);
        assert!(labels.iter().all(|&l| l == ClusterLabel::Assigned(0)));
    }

    #[test]
    fn border_point_is_not_expanded() {
        // min_samples 3: point 0 and 2 are border points of core point 1.
        let labels = dbscan(&line(&[0.0, 0.4, 0.8, 1.3]), 0.45, 3);
        assert_eq!(labels[0], ClusterLabel::Assigned(0));
        assert_eq!(labels[1], ClusterLabel::Assigned(0));
        assert_eq!(labels[2], ClusterLabel::Assigned(0));
        assert_eq!(labels[3], ClusterLabel::Noise);
    }

    #[test]
    fn all_noise_when_sparse() {
        let labels = dbscan(&line(&[0.0, 1.0, 2.0]), 0.5, 2);
        assert!(labels.iter().all(|&l| l == ClusterLabel::Noise));
    }

    #[test]
    fn empty_input() {
        assert!(dbscan(&[], 0.5, 2).is_empty());
    }
}

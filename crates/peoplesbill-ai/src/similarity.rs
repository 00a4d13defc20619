//! Vector helpers: cosine similarity, centroids, and distances.

/// Cosine similarity between two vectors.
///
/// Returns 0.0 for mismatched lengths or zero-magnitude vectors.
pub fn cosine_sim(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut mag_a, mut mag_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }
    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

/// Full pairwise cosine similarity matrix.
pub fn similarity_matrix(vectors: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = vectors.len();
    let mut sim = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let s = cosine_sim(&vectors[i], &vectors[j]);
            sim[i][j] = s;
            sim[j][i] = s;
        }
    }
    sim
}

/// `1 - similarity`, clamped to the valid cosine-distance range.
pub fn distance_matrix(similarity: &[Vec<f64>]) -> Vec<Vec<f64>> {
    similarity
        .iter()
        .map(|row| row.iter().map(|s| (1.0 - s).clamp(0.0, 2.0)).collect())
        .collect()
}

/// Mean of the selected vectors.
pub fn centroid(vectors: &[Vec<f64>], indices: &[usize]) -> Vec<f64> {
    let dim = indices.first().map(|&i| vectors[i].len()).unwrap_or(0);
    let mut sum = vec![0.0f64; dim];
    for &i in indices {
        for (acc, &v) in sum.iter_mut().zip(&vectors[i]) {
            *acc += v;
        }
    }
    if !indices.is_empty() {
        for v in &mut sum {
            *v /= indices.len() as f64;
        }
    }
    sum
}

pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// L2-normalize a vector in place.
pub fn normalize(v: &mut [f64]) {
    let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Round to two decimals, as reported in cluster and search scores.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

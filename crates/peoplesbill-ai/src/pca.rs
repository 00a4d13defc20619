//! Principal-component projection fitted on a single batch.
//!
//! Data is mean-centred, then the smaller of the Gram matrix (`X Xᵀ`, n×n)
//! and the scatter matrix (`Xᵀ X`, d×d) is eigen-decomposed with cyclic
//! Jacobi rotations. Both give the same component scores:
//!
//! - Gram: `score[j][i] = u_i[j] * sqrt(λ_i)`
//! - Scatter: `score[j][i] = x_j · w_i`
//!
//! Component signs are arbitrary; cosine geometry is unaffected.

use tracing::debug;

use crate::error::ClusterError;

const MAX_SWEEPS: usize = 100;
const OFF_DIAGONAL_TOLERANCE: f64 = 1e-22;

/// Project `data` onto its top `min(components, n, d)` principal components.
pub fn project(data: &[Vec<f64>], components: usize) -> Result<Vec<Vec<f64>>, ClusterError> {
    let n = data.len();
    let d = data.first().map(|r| r.len()).unwrap_or(0);
    if n == 0 || d == 0 {
        return Ok(data.to_vec());
    }
    if let Some(bad) = data.iter().find(|r| r.len() != d) {
        return Err(ClusterError::DimensionMismatch {
            expected: d,
            got: bad.len(),
        });
    }

    let k = components.min(n).min(d);
    let centred = centre(data, d);

    let scores = if n <= d {
        let gram = gram_matrix(&centred);
        let (values, vectors) = symmetric_eigen(gram)?;
        let order = descending_order(&values);
        (0..n)
            .map(|j| {
                order[..k]
                    .iter()
                    .map(|&i| vectors[j][i] * values[i].max(0.0).sqrt())
                    .collect()
            })
            .collect()
    } else {
        let scatter = scatter_matrix(&centred, d);
        let (values, vectors) = symmetric_eigen(scatter)?;
        let order = descending_order(&values);
        centred
            .iter()
            .map(|row| {
                order[..k]
                    .iter()
                    .map(|&i| (0..d).map(|f| row[f] * vectors[f][i]).sum())
                    .collect()
            })
            .collect()
    };

    debug!(samples = n, features = d, components = k, "pca projection");
    Ok(scores)
}

fn centre(data: &[Vec<f64>], d: usize) -> Vec<Vec<f64>> {
    let n = data.len() as f64;
    let mut mean = vec![0.0f64; d];
    for row in data {
        for (m, v) in mean.iter_mut().zip(row) {
            *m += v;
        }
    }
    for m in &mut mean {
        *m /= n;
    }
    data.iter()
        .map(|row| row.iter().zip(&mean).map(|(v, m)| v - m).collect())
        .collect()
}

fn gram_matrix(x: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = x.len();
    let mut g = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let dot: f64 = x[i].iter().zip(&x[j]).map(|(a, b)| a * b).sum();
            g[i][j] = dot;
            g[j][i] = dot;
        }
    }
    g
}

fn scatter_matrix(x: &[Vec<f64>], d: usize) -> Vec<Vec<f64>> {
    let mut s = vec![vec![0.0; d]; d];
    for row in x {
        for p in 0..d {
            if row[p] == 0.0 {
                continue;
            }
            for q in p..d {
                s[p][q] += row[p] * row[q];
            }
        }
    }
    for p in 0..d {
        for q in 0..p {
            s[p][q] = s[q][p];
        }
    }
    s
}

/// Eigen-indices sorted by eigenvalue descending; ties keep index order.
fn descending_order(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[b]
            .partial_cmp(&values[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

/// Cyclic Jacobi eigen-decomposition of a symmetric matrix.
///
/// Returns `(eigenvalues, V)` where column `i` of `V` is the eigenvector
/// for `eigenvalues[i]`.
fn symmetric_eigen(mut a: Vec<Vec<f64>>) -> Result<(Vec<f64>, Vec<Vec<f64>>), ClusterError> {
    let m = a.len();
    let mut v = vec![vec![0.0; m]; m];
    for (i, row) in v.iter_mut().enumerate() {
        row[i] = 1.0;
    }

    let scale: f64 = a.iter().flatten().map(|x| x * x).sum::<f64>().max(f64::MIN_POSITIVE);

    let mut converged = false;
    for _ in 0..MAX_SWEEPS {
        let off: f64 = (0..m)
            .flat_map(|p| ((p + 1)..m).map(move |q| (p, q)))
            .map(|(p, q)| a[p][q] * a[p][q])
            .sum();
        if off <= OFF_DIAGONAL_TOLERANCE * scale {
            converged = true;
            break;
        }

        for p in 0..m {
            for q in (p + 1)..m {
                let apq = a[p][q];
                if apq.abs() < f64::MIN_POSITIVE {
                    continue;
                }
                let theta = (a[q][q] - a[p][p]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for row in a.iter_mut() {
                    let (kp, kq) = (row[p], row[q]);
                    row[p] = c * kp - s * kq;
                    row[q] = s * kp + c * kq;
                }
                for k in 0..m {
                    let (pk, qk) = (a[p][k], a[q][k]);
                    a[p][k] = c * pk - s * qk;
                    a[q][k] = s * pk + c * qk;
                }
                for row in v.iter_mut() {
                    let (kp, kq) = (row[p], row[q]);
                    row[p] = c * kp - s * kq;
                    row[q] = s * kp + c * kq;
                }
            }
        }
    }

    if !converged {
        return Err(ClusterError::NoConvergence(MAX_SWEEPS));
    }

    let values = (0..m).map(|i| a[i][i]).collect();
    Ok((values, v))
}

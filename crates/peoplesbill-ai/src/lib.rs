//! Clustering engine: groups citizen submissions into themed clusters.

mod config;
mod dbscan;
mod engine;
mod error;
mod pca;
mod similarity;
mod stopwords;
mod themes;
mod tfidf;

pub use config::ClusteringConfig;
pub use dbscan::{ClusterLabel, dbscan};
pub use engine::{ClusteringEngine, SimilarSubmission};
pub use error::ClusterError;
pub use tfidf::{TfidfMatrix, TfidfVectorizer};

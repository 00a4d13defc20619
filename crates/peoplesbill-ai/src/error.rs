use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("empty vocabulary; documents contain only stop words or no tokens")]
    EmptyVocabulary,

    #[error("no documents to vectorize")]
    NoDocuments,

    #[error("vector dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("eigen decomposition did not converge after {0} sweeps")]
    NoConvergence(usize),
}

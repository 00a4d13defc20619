//! TF-IDF vectorizer over unigrams and bigrams.
//!
//! Fitted fresh on every batch; nothing is cached between calls.
//!
//! # Weighting
//!
//! - Tokens are runs of 2+ alphanumeric characters, stop words removed
//! - Bigrams join adjacent surviving tokens with a single space
//! - Vocabulary keeps the `max_features` terms with the highest corpus count
//!   (ties broken alphabetically), then is ordered alphabetically
//! - `idf = ln((1 + n) / (1 + df)) + 1`
//! - Each row is L2-normalised

use std::collections::HashMap;

use crate::error::ClusterError;
use crate::similarity::normalize;
use crate::stopwords::ENGLISH;

pub struct TfidfVectorizer {
    max_features: usize,
}

/// Dense document-term matrix produced by [`TfidfVectorizer::fit_transform`].
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    pub vocabulary: Vec<String>,
    /// One row per input document, each of length `vocabulary.len()`.
    pub rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    /// Fit a vocabulary on `documents` and return their TF-IDF vectors.
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<TfidfMatrix, ClusterError> {
        if documents.is_empty() {
            return Err(ClusterError::NoDocuments);
        }

        let counts: Vec<HashMap<String, usize>> =
            documents.iter().map(|d| term_counts(d.as_ref())).collect();

        // Corpus totals and document frequency.
        let mut total: HashMap<&str, usize> = HashMap::new();
        let mut df: HashMap<&str, usize> = HashMap::new();
        for doc in &counts {
            for (term, &n) in doc {
                *total.entry(term.as_str()).or_insert(0) += n;
                *df.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        if total.is_empty() {
            return Err(ClusterError::EmptyVocabulary);
        }

        let mut ranked: Vec<(&str, usize)> = total.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features.max(1));

        let mut vocabulary: Vec<String> = ranked.iter().map(|(t, _)| t.to_string()).collect();
        vocabulary.sort_unstable();

        let n_docs = documents.len() as f64;
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|t| {
                let d = df.get(t.as_str()).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + d)).ln() + 1.0
            })
            .collect();

        let rows = counts
            .iter()
            .map(|doc| {
                let mut row: Vec<f64> = vocabulary
                    .iter()
                    .zip(&idf)
                    .map(|(t, w)| doc.get(t).copied().unwrap_or(0) as f64 * w)
                    .collect();
                normalize(&mut row);
                row
            })
            .collect();

        Ok(TfidfMatrix { vocabulary, rows })
    }
}

/// Unigram and bigram counts for one document.
fn term_counts(text: &str) -> HashMap<String, usize> {
    let tokens: Vec<String> = tokenize(text)
        .filter(|t| !ENGLISH.contains(t.as_str()))
        .collect();

    let mut counts = HashMap::new();
    for t in &tokens {
        *counts.entry(t.clone()).or_insert(0) += 1;
    }
    for pair in tokens.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_insert(0) += 1;
    }
    counts
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_lowercase)
}

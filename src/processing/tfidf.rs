//! TF-IDF vectorization over small in-memory corpora

use crate::config::ScoringConfig;
use crate::error::{Result, SkillGapError};
use regex::Regex;
use std::collections::{BTreeMap, HashMap};

/// Word n-gram TF-IDF with smoothed idf and L2-normalized rows.
pub struct TfidfVectorizer {
    ngram_range: (usize, usize),
    max_features: usize,
    min_df: usize,
    token_regex: Regex,
}

/// Document-term matrix produced by [`TfidfVectorizer::fit_transform`].
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    /// Terms in column order
    pub vocabulary: Vec<String>,
    /// One L2-normalized row per input document
    pub rows: Vec<Vec<f64>>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

impl TfidfVectorizer {
    pub fn new(ngram_range: (usize, usize), max_features: usize, min_df: usize) -> Self {
        let token_regex = Regex::new(r"\b\w\w+\b").expect("Invalid token regex");

        Self {
            ngram_range,
            max_features,
            min_df,
            token_regex,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.ngram_range, config.max_features, config.min_df)
    }

    /// Learn the vocabulary and idf weights from `documents` and return their
    /// vectors. Fails when no term survives tokenization and pruning.
    pub fn fit_transform(&self, documents: &[&str]) -> Result<TfidfMatrix> {
        let counts: Vec<HashMap<String, usize>> = documents.iter().map(|doc| self.term_counts(doc)).collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        let mut corpus_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for doc_counts in &counts {
            for (term, count) in doc_counts {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
                *corpus_frequency.entry(term.as_str()).or_insert(0) += count;
            }
        }

        if document_frequency.is_empty() {
            return Err(SkillGapError::Vectorization(
                "Empty vocabulary; documents contain no terms of two or more characters".to_string(),
            ));
        }

        // BTreeMap iteration is alphabetical, so the stable sort breaks
        // frequency ties alphabetically.
        let mut candidates: Vec<(&str, usize)> = corpus_frequency
            .iter()
            .filter(|(term, _)| document_frequency[*term] >= self.min_df)
            .map(|(term, freq)| (*term, *freq))
            .collect();

        if candidates.is_empty() {
            return Err(SkillGapError::Vectorization(
                "After pruning, no terms remain; lower min_df".to_string(),
            ));
        }

        candidates.sort_by(|a, b| b.1.cmp(&a.1));
        candidates.truncate(self.max_features);

        let mut vocabulary: Vec<String> = candidates.iter().map(|(term, _)| term.to_string()).collect();
        vocabulary.sort();

        let n_documents = documents.len() as f64;
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = document_frequency[term.as_str()] as f64;
                ((1.0 + n_documents) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let rows = counts
            .iter()
            .map(|doc_counts| {
                let mut row: Vec<f64> = vocabulary
                    .iter()
                    .zip(&idf)
                    .map(|(term, weight)| doc_counts.get(term).copied().unwrap_or(0) as f64 * weight)
                    .collect();
                l2_normalize(&mut row);
                row
            })
            .collect();

        Ok(TfidfMatrix { vocabulary, rows })
    }

    /// Cosine similarity of two documents vectorized as a two-document corpus,
    /// clamped to [0, 1].
    pub fn document_similarity(&self, first: &str, second: &str) -> Result<f64> {
        let matrix = self.fit_transform(&[first, second])?;
        Ok(cosine_similarity(&matrix.rows[0], &matrix.rows[1]).clamp(0.0, 1.0))
    }

    fn term_counts(&self, document: &str) -> HashMap<String, usize> {
        let lowered = document.to_lowercase();
        let tokens: Vec<&str> = self.token_regex.find_iter(&lowered).map(|m| m.as_str()).collect();

        let (min_n, max_n) = self.ngram_range;
        let mut counts = HashMap::new();

        for n in min_n..=max_n {
            if n == 0 || n > tokens.len() {
                continue;
            }
            for window in tokens.windows(n) {
                *counts.entry(window.join(" ")).or_insert(0) += 1;
            }
        }

        counts
    }
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        row.iter_mut().for_each(|x| *x /= norm);
    }
}

/// Cosine similarity of two equal-length vectors; 0.0 for mismatched lengths
/// or zero vectors.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

//! TF-IDF suggestion engine over record descriptions.
//!
//! When a lookup fails (or the caller only has a product description), the
//! suggester ranks reference records by cosine similarity between the query
//! and each record's description. Per-document TF-IDF vectors are built once
//! at construction and L2-normalized, so scoring a query is a sparse dot
//! product per document. IDF uses the smoothed form
//! `ln((n_docs + 1) / (df + 1)) + 1`, which stays positive even for terms
//! present in every document.
//!
//! When similarity produces fewer than the requested number of suggestions,
//! the remainder is filled from a case-insensitive substring search over
//! descriptions.
use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::dataset::HsnTable;

/// Minimum cosine score for a similarity match to be suggested.
const MIN_SIMILARITY: f64 = 0.1;

/// Score assigned to keyword-fallback matches.
const KEYWORD_SCORE: f64 = 0.1;

/// Tokens shorter than this are dropped by the tokenizer.
const MIN_TOKEN_LEN: usize = 2;

/// Common English words that carry no classification signal.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "in", "is", "it", "of", "on",
    "or", "other", "than", "that", "the", "their", "to", "with",
];

// ---------------------------------------------------------------------------
// Suggestion types
// ---------------------------------------------------------------------------

/// How confident the suggester is in a match, derived from its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Cosine score >= 0.7.
    High,
    /// Cosine score >= 0.4.
    Medium,
    /// Cosine score >= 0.2, or any keyword match.
    Low,
    /// Anything below 0.2.
    VeryLow,
}

impl Confidence {
    /// Maps a cosine score to a confidence band.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.7 {
            Self::High
        } else if score >= 0.4 {
            Self::Medium
        } else if score >= 0.2 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => f.write_str("high"),
            Self::Medium => f.write_str("medium"),
            Self::Low => f.write_str("low"),
            Self::VeryLow => f.write_str("very_low"),
        }
    }
}

/// Which matching strategy produced a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// TF-IDF cosine similarity.
    Similarity,
    /// Substring keyword fallback.
    Keyword,
}

/// A single ranked suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    /// The suggested HSN code.
    pub code: String,
    /// The record description the query matched against.
    pub description: String,
    /// Cosine score in `[0, 1]` (fixed at 0.1 for keyword matches).
    pub score: f64,
    /// Confidence band derived from the score.
    pub confidence: Confidence,
    /// Strategy that produced this suggestion.
    pub matched_by: MatchKind,
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// Lowercases and splits on non-alphanumeric boundaries, dropping stopwords
/// and tokens shorter than [`MIN_TOKEN_LEN`].
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| t.len() >= MIN_TOKEN_LEN && !STOPWORDS.contains(t))
        .map(str::to_owned)
        .collect()
}

// ---------------------------------------------------------------------------
// Suggester
// ---------------------------------------------------------------------------

/// Sparse TF-IDF vector, term id -> weight, L2-normalized at build time.
type SparseVec = HashMap<usize, f64>;

/// TF-IDF index over the descriptions of a loaded [`HsnTable`].
///
/// Holds a copy of the (code, description) pairs in table order so suggestion
/// output does not borrow from the table.
pub struct Suggester {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    doc_vectors: Vec<SparseVec>,
    entries: Vec<(String, String)>,
}

impl Suggester {
    /// Builds the TF-IDF index over every record description in `table`.
    pub fn new(table: &HsnTable) -> Self {
        let entries: Vec<(String, String)> = table
            .records()
            .iter()
            .map(|r| (r.code.as_str().to_owned(), r.description.clone()))
            .collect();

        let doc_tokens: Vec<Vec<String>> =
            entries.iter().map(|(_, desc)| tokenize(desc)).collect();

        // Vocabulary and document frequencies in one pass.
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();
        for tokens in &doc_tokens {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in tokens {
                if !seen.insert(token) {
                    continue;
                }
                match vocabulary.get(token) {
                    Some(&id) => doc_freq[id] += 1,
                    None => {
                        vocabulary.insert(token.clone(), doc_freq.len());
                        doc_freq.push(1);
                    }
                }
            }
        }

        let n_docs = doc_tokens.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((n_docs + 1.0) / (df as f64 + 1.0)).ln() + 1.0)
            .collect();

        let doc_vectors = doc_tokens
            .iter()
            .map(|tokens| weighted_vector(tokens, &vocabulary, &idf))
            .collect();

        Self {
            vocabulary,
            idf,
            doc_vectors,
            entries,
        }
    }

    /// Returns up to `top_k` suggestions for a free-text query.
    ///
    /// Similarity matches above [`MIN_SIMILARITY`] come first, sorted by
    /// score descending (ties broken by table order); keyword-fallback
    /// matches fill any remaining slots. Duplicate codes are suppressed.
    /// A blank query yields no suggestions.
    pub fn suggest(&self, query: &str, top_k: usize) -> Vec<Suggestion> {
        if query.trim().is_empty() || top_k == 0 {
            return Vec::new();
        }

        let query_vec = weighted_vector(&tokenize(query), &self.vocabulary, &self.idf);

        let mut scored: Vec<(usize, f64)> = self
            .doc_vectors
            .iter()
            .enumerate()
            .map(|(i, doc)| (i, dot(&query_vec, doc)))
            .filter(|&(_, score)| score >= MIN_SIMILARITY)
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let mut suggestions: Vec<Suggestion> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for &(i, score) in &scored {
            let (code, description) = &self.entries[i];
            if !seen.insert(code) {
                continue;
            }
            suggestions.push(Suggestion {
                code: code.clone(),
                description: description.clone(),
                score,
                confidence: Confidence::from_score(score),
                matched_by: MatchKind::Similarity,
            });
            if suggestions.len() == top_k {
                return suggestions;
            }
        }

        // Keyword fallback: substring match per query token.
        for token in tokenize(query) {
            for (code, description) in &self.entries {
                if suggestions.len() == top_k {
                    return suggestions;
                }
                if seen.contains(code.as_str()) {
                    continue;
                }
                if description.to_lowercase().contains(&token) {
                    seen.insert(code);
                    suggestions.push(Suggestion {
                        code: code.clone(),
                        description: description.clone(),
                        score: KEYWORD_SCORE,
                        confidence: Confidence::Low,
                        matched_by: MatchKind::Keyword,
                    });
                }
            }
        }

        suggestions
    }
}

/// Builds an L2-normalized TF-IDF vector for a token list.
///
/// Tokens outside the vocabulary are ignored. Returns an empty vector for an
/// empty (or fully out-of-vocabulary) token list.
fn weighted_vector(
    tokens: &[String],
    vocabulary: &HashMap<String, usize>,
    idf: &[f64],
) -> SparseVec {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for token in tokens {
        if let Some(&id) = vocabulary.get(token) {
            *counts.entry(id).or_insert(0) += 1;
        }
    }
    let mut vec: SparseVec = counts
        .into_iter()
        .map(|(id, count)| (id, count as f64 * idf[id]))
        .collect();
    let norm = vec.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in vec.values_mut() {
            *weight /= norm;
        }
    }
    vec
}

/// Sparse dot product. Both vectors are L2-normalized, so this is the cosine.
fn dot(a: &SparseVec, b: &SparseVec) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(id, w)| large.get(id).map(|v| w * v))
        .sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

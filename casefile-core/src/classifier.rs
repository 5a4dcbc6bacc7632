use crate::keywords::KEYWORD_TABLE;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Confidence reported when no keyword matched
pub const NO_MATCH_CONFIDENCE: f64 = 0.3;
/// Confidence for a single matched keyword
pub const BASE_CONFIDENCE: f64 = 0.6;
/// Added per extra matched keyword
pub const CONFIDENCE_STEP: f64 = 0.15;
/// Filename matching never claims more than this
pub const MAX_CONFIDENCE: f64 = 0.85;

pub const NO_MATCH_REASONING: &str =
    "No specific keywords found in filename. Manual categorization recommended.";

const MAX_SUGGESTED_TAGS: usize = 3;

/// Classification strategy seam.
///
/// Implementations share the `ClassificationResult` contract so callers can
/// swap filename matching for content analysis without touching call sites.
pub trait Classifier {
    /// `file_url` points at the stored file for strategies that inspect content
    fn classify(&self, filename: &str, file_url: Option<&str>) -> ClassificationResult;

    /// Strategy name for logging
    fn name(&self) -> &str;
}

/// Keyword-frequency heuristic over the filename only.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilenameClassifier;

impl FilenameClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Classifier for FilenameClassifier {
    fn classify(&self, filename: &str, _file_url: Option<&str>) -> ClassificationResult {
        classify(filename)
    }

    fn name(&self) -> &str {
        "filename"
    }
}

/// Content-based strategy.
///
/// Content analysis isn't wired to any model yet, so this records the request
/// and answers with the filename heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentClassifier {
    fallback: FilenameClassifier,
}

impl ContentClassifier {
    pub fn new() -> Self {
        Self {
            fallback: FilenameClassifier::new(),
        }
    }
}

impl Classifier for ContentClassifier {
    fn classify(&self, filename: &str, file_url: Option<&str>) -> ClassificationResult {
        tracing::debug!(
            filename,
            file_url = file_url.unwrap_or("<none>"),
            "content analysis requested, falling back to filename keywords"
        );
        self.fallback.classify(filename, file_url)
    }

    fn name(&self) -> &str {
        "content"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierStrategy {
    #[default]
    Filename,
    Content,
}

impl fmt::Display for ClassifierStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierStrategy::Filename => f.write_str("filename"),
            ClassifierStrategy::Content => f.write_str("content"),
        }
    }
}

impl FromStr for ClassifierStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "filename" => Ok(ClassifierStrategy::Filename),
            "content" => Ok(ClassifierStrategy::Content),
            other => Err(anyhow::anyhow!(
                "unknown classifier strategy '{other}' (expected filename or content)"
            )),
        }
    }
}

pub fn build_classifier(strategy: ClassifierStrategy) -> Box<dyn Classifier + Send + Sync> {
    match strategy {
        ClassifierStrategy::Filename => Box::new(FilenameClassifier::new()),
        ClassifierStrategy::Content => Box::new(ContentClassifier::new()),
    }
}

/// Match count for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub score: usize,
}

/// Per-category match counts, in tie-break priority order.
pub fn score_categories(filename: &str) -> Vec<CategoryScore> {
    let lower = filename.to_lowercase();
    KEYWORD_TABLE
        .iter()
        .map(|list| CategoryScore {
            category: list.category,
            score: list.count_matches(&lower),
        })
        .collect()
}

/// Linear ramp with a hard ceiling: 1 match = 0.60, 2 = 0.75, 3+ = 0.85.
pub fn confidence_for_matches(matches: usize) -> f64 {
    if matches == 0 {
        return NO_MATCH_CONFIDENCE;
    }
    (BASE_CONFIDENCE + (matches - 1) as f64 * CONFIDENCE_STEP).min(MAX_CONFIDENCE)
}

/// Categorize a document from its filename.
///
/// Matching is case-insensitive substring search against the static keyword
/// tables. When several categories share the top score, the one declared
/// first (financial, legal, property, custody) wins. Total and pure.
pub fn classify(filename: &str) -> ClassificationResult {
    let lower = filename.to_lowercase();

    // First strictly-greater score wins, which keeps the earliest category on ties
    let mut winner: Option<(usize, usize)> = None;
    for (index, list) in KEYWORD_TABLE.iter().enumerate() {
        let score = list.count_matches(&lower);
        if score > winner.map_or(0, |(_, best)| best) {
            winner = Some((index, score));
        }
    }

    let Some((index, max_score)) = winner else {
        return ClassificationResult {
            category: Category::Other,
            confidence: NO_MATCH_CONFIDENCE,
            reasoning: NO_MATCH_REASONING.to_string(),
            suggested_tags: None,
        };
    };

    let list = &KEYWORD_TABLE[index];
    let matched: Vec<String> = list.matches_in(&lower).map(str::to_string).collect();

    ClassificationResult {
        category: list.category,
        confidence: confidence_for_matches(max_score),
        reasoning: format!("Found \"{}\" in filename", matched.join("\", \"")),
        suggested_tags: Some(matched.into_iter().take(MAX_SUGGESTED_TAGS).collect()),
    }
}

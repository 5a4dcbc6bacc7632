// Casefile Core Library
//
// Filename-based categorization for case documents, plus the local half of
// the upload pipeline (validation, naming, advisory category) and dashboard
// analytics over the resulting records.

pub mod types;
pub mod keywords;
pub mod classifier;
pub mod config;
pub mod intake;
pub mod analytics;

// Re-export main types and functions for easy use
pub use types::*;
pub use classifier::{
    build_classifier, classify, score_categories, CategoryScore, Classifier, ClassifierStrategy,
    ContentClassifier, FilenameClassifier,
};
pub use config::IntakeConfig;
pub use intake::{IntakeError, IntakeProcessor, IntakeRecord, UploadCandidate};
pub use analytics::{CaseActivity, RecentUpload, UploadAnalytics};

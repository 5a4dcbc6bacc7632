// Upload intake - validation, naming and advisory categorization
//
// Everything here is local bookkeeping that happens before a file is handed
// to the blob store and the document table. Neither store is touched.

use crate::classifier::{build_classifier, Classifier};
use crate::config::IntakeConfig;
use crate::types::*;
use chrono::{DateTime, Utc};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("filename is empty")]
    EmptyFilename,
    #[error("file type '{mime_type}' not allowed. Please upload PDF, DOC, DOCX, JPG, or PNG files.")]
    UnsupportedFileType { mime_type: String },
    #[error("file size {} exceeds {} limit", readable(.size), readable(.limit))]
    FileTooLarge { size: u64, limit: u64 },
}

/// A file the user selected for upload, plus the optional form fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadCandidate {
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: u64,
    /// Category picked by the user before submitting; wins over the suggestion
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub description: Option<String>,
    /// Falls back to the configured default when unset
    #[serde(default)]
    pub share_with_client: Option<bool>,
}

impl UploadCandidate {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            size_bytes,
            category: None,
            description: None,
            share_with_client: None,
        }
    }

    /// Build a candidate from a file on disk, guessing the MIME type from its extension
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        Ok(Self::new(filename, mime_type_for_path(path), metadata.len()))
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn shared(mut self, share_with_client: bool) -> Self {
        self.share_with_client = Some(share_with_client);
        self
    }
}

/// Metadata row prepared for the document store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeRecord {
    pub id: Uuid,
    pub case_id: String,
    pub original_filename: String,
    pub stored_filename: String,
    pub storage_path: String,
    pub mime_type: String,
    pub file_size: u64,
    pub suggestion: ClassificationResult,
    /// Pre-filled from `suggestion`, editable by the user
    pub category: Category,
    pub category_overridden: bool,
    pub description: Option<String>,
    pub is_shared_with_client: bool,
    pub uploaded_at: DateTime<Utc>,
}

impl IntakeRecord {
    pub fn override_category(&mut self, category: Category) {
        self.category = category;
        self.category_overridden = category != self.suggestion.category;
    }
}

pub fn validate_upload(candidate: &UploadCandidate, config: &IntakeConfig) -> Result<(), IntakeError> {
    if candidate.filename.trim().is_empty() {
        return Err(IntakeError::EmptyFilename);
    }
    if !config.allows_mime_type(&candidate.mime_type) {
        return Err(IntakeError::UnsupportedFileType {
            mime_type: candidate.mime_type.clone(),
        });
    }
    if candidate.size_bytes > config.max_file_size {
        return Err(IntakeError::FileTooLarge {
            size: candidate.size_bytes,
            limit: config.max_file_size,
        });
    }
    Ok(())
}

fn readable(bytes: &u64) -> String {
    format_file_size(*bytes)
}

fn unsafe_chars() -> &'static Regex {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    UNSAFE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9._-]").expect("static regex"))
}

/// Replace anything outside `[a-zA-Z0-9._-]` with underscores, one per
/// UTF-16 code unit, so stored names match what the browser upload produces
pub fn sanitize_filename(name: &str) -> String {
    unsafe_chars()
        .replace_all(name, |caps: &Captures| "_".repeat(caps[0].encode_utf16().count()))
        .into_owned()
}

pub fn stored_filename(original: &str, uploaded_at: DateTime<Utc>) -> String {
    format!("{}_{}", uploaded_at.timestamp_millis(), sanitize_filename(original))
}

pub fn storage_path(case_id: &str, stored_filename: &str) -> String {
    format!("case-{case_id}/{stored_filename}")
}

pub fn mime_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

/// Human-readable size in base-1024 units, e.g. `1.5 KB`
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut unit = 0;
    while unit + 1 < UNITS.len() && bytes >= 1024u64.pow(unit as u32 + 1) {
        unit += 1;
    }
    let scaled = bytes as f64 / 1024f64.powi(unit as i32);
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

pub struct IntakeProcessor {
    config: IntakeConfig,
    classifier: Box<dyn Classifier + Send + Sync>,
}

impl IntakeProcessor {
    pub fn new(config: IntakeConfig) -> Self {
        let classifier = build_classifier(config.strategy);
        Self { config, classifier }
    }

    pub fn with_classifier(config: IntakeConfig, classifier: Box<dyn Classifier + Send + Sync>) -> Self {
        Self { config, classifier }
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Validate, name and categorize one upload.
    pub fn intake(
        &self,
        case_id: &str,
        candidate: &UploadCandidate,
        uploaded_at: DateTime<Utc>,
    ) -> Result<IntakeRecord, IntakeError> {
        if let Err(e) = validate_upload(candidate, &self.config) {
            tracing::info!(filename = %candidate.filename, error = %e, "upload rejected");
            return Err(e);
        }

        let stored = stored_filename(&candidate.filename, uploaded_at);
        let path = storage_path(case_id, &stored);
        let suggestion = self.classifier.classify(&candidate.filename, Some(&path));
        tracing::debug!(
            filename = %candidate.filename,
            strategy = self.classifier.name(),
            category = %suggestion.category,
            confidence = suggestion.confidence,
            "upload categorized"
        );

        let mut record = IntakeRecord {
            id: Uuid::new_v4(),
            case_id: case_id.to_string(),
            original_filename: candidate.filename.clone(),
            stored_filename: stored,
            storage_path: path,
            mime_type: candidate.mime_type.clone(),
            file_size: candidate.size_bytes,
            category: suggestion.category,
            suggestion,
            category_overridden: false,
            description: candidate.description.clone(),
            is_shared_with_client: candidate
                .share_with_client
                .unwrap_or(self.config.share_with_client),
            uploaded_at,
        };
        if let Some(chosen) = candidate.category {
            record.override_category(chosen);
        }
        Ok(record)
    }

    /// Each candidate succeeds or fails on its own; results keep input order.
    pub fn intake_batch(
        &self,
        case_id: &str,
        candidates: &[UploadCandidate],
        uploaded_at: DateTime<Utc>,
    ) -> Vec<Result<IntakeRecord, IntakeError>> {
        candidates
            .iter()
            .map(|candidate| self.intake(case_id, candidate, uploaded_at))
            .collect()
    }
}

impl Default for IntakeProcessor {
    fn default() -> Self {
        Self::new(IntakeConfig::default())
    }
}

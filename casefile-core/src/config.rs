use crate::classifier::ClassifierStrategy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Upload size ceiling: 50MB in bytes
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

pub const ALLOWED_FILE_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "image/jpeg",
    "image/jpg",
    "image/png",
];

// Default value functions for serde
fn default_allowed_mime_types() -> Vec<String> {
    ALLOWED_FILE_TYPES.iter().map(|t| t.to_string()).collect()
}

fn default_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

fn default_largest_files_limit() -> usize {
    5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// MIME types accepted for upload
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
    /// Largest accepted upload in bytes (inclusive)
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Which classifier pre-fills the category field
    #[serde(default)]
    pub strategy: ClassifierStrategy,
    /// Whether new uploads are visible to the client by default
    #[serde(default)]
    pub share_with_client: bool,
    /// How many entries the analytics "largest files" list keeps
    #[serde(default = "default_largest_files_limit")]
    pub largest_files_limit: usize,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            allowed_mime_types: default_allowed_mime_types(),
            max_file_size: default_max_file_size(),
            strategy: ClassifierStrategy::default(),
            share_with_client: false,
            largest_files_limit: default_largest_files_limit(),
        }
    }
}

impl IntakeConfig {
    /// Load config from a YAML file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading intake config {path}"))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: IntakeConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                tracing::warn!(path = p, error = %e, "failed to load intake config, using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn allows_mime_type(&self, mime_type: &str) -> bool {
        self.allowed_mime_types
            .iter()
            .any(|allowed| allowed == mime_type)
    }
}

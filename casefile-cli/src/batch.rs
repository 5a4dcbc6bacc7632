// One `casefile intake` run over files on disk, kept apart from printing so
// the exit status and JSON shape can be checked directly.

use crate::report::collect_candidates;
use casefile_core::{IntakeProcessor, IntakeRecord, UploadAnalytics};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntakeOutcome {
    pub records: Vec<IntakeRecord>,
    pub rejected: Vec<Rejection>,
    pub analytics: UploadAnalytics,
}

impl IntakeOutcome {
    /// 1 when any file was rejected
    pub fn exit_code(&self) -> i32 {
        if self.rejected.is_empty() {
            0
        } else {
            1
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Read, validate and categorize every path. Unreadable files and failed
/// validation both land in `rejected`; neither stops the run.
pub fn run_intake(
    processor: &IntakeProcessor,
    paths: &[PathBuf],
    case_id: &str,
    description: Option<&str>,
    now: DateTime<Utc>,
) -> IntakeOutcome {
    let mut records = Vec::new();
    let mut rejected = Vec::new();

    for (path, candidate) in collect_candidates(paths) {
        let result = match candidate {
            Ok(mut c) => {
                if let Some(d) = description {
                    c = c.with_description(d);
                }
                processor.intake(case_id, &c, now).map_err(|e| e.to_string())
            }
            Err(e) => Err(e.to_string()),
        };

        match result {
            Ok(record) => records.push(record),
            Err(error) => rejected.push(Rejection {
                path: path.display().to_string(),
                error,
            }),
        }
    }

    let analytics =
        UploadAnalytics::from_records(&records, processor.config().largest_files_limit, now);
    IntakeOutcome {
        records,
        rejected,
        analytics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casefile_core::{Category, IntakeConfig};
    use std::fs;

    #[test]
    fn rejected_file_sets_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let deed = dir.path().join("deed.pdf");
        let notes = dir.path().join("notes.txt");
        fs::write(&deed, b"%PDF").unwrap();
        fs::write(&notes, b"hello").unwrap();

        let processor = IntakeProcessor::default();
        let outcome = run_intake(&processor, &[deed, notes], "7", Some("from scanner"), Utc::now());

        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].category, Category::Property);
        assert_eq!(outcome.records[0].description.as_deref(), Some("from scanner"));
        assert!(outcome.rejected[0].path.ends_with("notes.txt"));
        assert!(outcome.rejected[0].error.contains("application/octet-stream"));
    }

    #[test]
    fn clean_run_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let lease = dir.path().join("lease.pdf");
        fs::write(&lease, b"%PDF").unwrap();

        let outcome = run_intake(&IntakeProcessor::default(), &[lease], "7", None, Utc::now());
        assert_eq!(outcome.exit_code(), 0);
        assert!(outcome.rejected.is_empty());
    }

    #[test]
    fn json_has_records_rejected_and_analytics() {
        let dir = tempfile::tempdir().unwrap();
        let tax = dir.path().join("tax_return.pdf");
        let photo = dir.path().join("photo.png");
        fs::write(&tax, vec![0u8; 300]).unwrap();
        fs::write(&photo, vec![0u8; 100]).unwrap();
        let missing = dir.path().join("missing.pdf");

        let config = IntakeConfig {
            largest_files_limit: 1,
            ..IntakeConfig::default()
        };
        let processor = IntakeProcessor::new(config);
        let outcome = run_intake(&processor, &[tax, photo, missing], "2", None, Utc::now());

        let json: serde_json::Value = serde_json::from_str(&outcome.to_json().unwrap()).unwrap();
        assert_eq!(json["records"].as_array().unwrap().len(), 2);
        assert_eq!(json["rejected"].as_array().unwrap().len(), 1);
        assert!(json["rejected"][0]["error"].is_string());
        assert_eq!(json["analytics"]["total_documents"], 2);
        assert_eq!(json["analytics"]["uploaded_this_week"], 2);
        assert_eq!(json["analytics"]["largest_files"][0]["filename"], "tax_return.pdf");
        assert_eq!(json["analytics"]["largest_files"].as_array().unwrap().len(), 1);
        assert_eq!(json["records"][0]["suggestion"]["suggestedTags"][0], "tax");
    }
}

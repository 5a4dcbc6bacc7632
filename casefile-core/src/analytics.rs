use crate::intake::IntakeRecord;
use crate::types::*;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Entries kept in the recent-uploads and most-active-cases lists
pub const DASHBOARD_LIST_LIMIT: usize = 5;
/// Window for `uploaded_this_week`, counted back from `now`
pub const RECENT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSizeEntry {
    pub id: Uuid,
    pub filename: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentUpload {
    pub id: Uuid,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseActivity {
    pub case_id: String,
    pub count: usize,
}

/// Dashboard summary over a set of intake records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadAnalytics {
    /// Only categories that occur, most frequent first
    pub category_counts: Vec<CategoryCount>,
    pub largest_files: Vec<FileSizeEntry>,
    pub total_documents: usize,
    pub total_bytes: u64,
    /// Uploads no older than seven days before `now`
    pub uploaded_this_week: usize,
    /// Newest first
    pub recent_uploads: Vec<RecentUpload>,
    /// Cases with the most uploads, busiest first
    pub most_active_cases: Vec<CaseActivity>,
    /// Mean suggestion confidence; 0.0 with no records
    pub average_confidence: f64,
    /// Records whose final category differs from the suggestion
    pub overridden: usize,
}

impl UploadAnalytics {
    pub fn from_records(records: &[IntakeRecord], largest_limit: usize, now: DateTime<Utc>) -> Self {
        let week_start = now - Duration::days(RECENT_WINDOW_DAYS);
        Self {
            category_counts: Self::compute_category_counts(records),
            largest_files: Self::compute_largest_files(records, largest_limit),
            total_documents: records.len(),
            total_bytes: records.iter().map(|r| r.file_size).sum(),
            uploaded_this_week: records.iter().filter(|r| r.uploaded_at >= week_start).count(),
            recent_uploads: Self::compute_recent_uploads(records),
            most_active_cases: Self::compute_most_active_cases(records),
            average_confidence: Self::compute_average_confidence(records),
            overridden: records.iter().filter(|r| r.category_overridden).count(),
        }
    }

    fn compute_category_counts(records: &[IntakeRecord]) -> Vec<CategoryCount> {
        let mut counts: HashMap<Category, usize> = HashMap::new();
        for record in records {
            *counts.entry(record.category).or_insert(0) += 1;
        }

        let mut sorted: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect();
        // Equal counts fall back to priority order so output is stable
        sorted.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.category.priority().cmp(&b.category.priority()))
        });
        sorted
    }

    fn compute_largest_files(records: &[IntakeRecord], limit: usize) -> Vec<FileSizeEntry> {
        let mut by_size: Vec<&IntakeRecord> = records.iter().collect();
        by_size.sort_by(|a, b| b.file_size.cmp(&a.file_size));
        by_size
            .into_iter()
            .take(limit)
            .map(|r| FileSizeEntry {
                id: r.id,
                filename: r.original_filename.clone(),
                size: r.file_size,
            })
            .collect()
    }

    fn compute_recent_uploads(records: &[IntakeRecord]) -> Vec<RecentUpload> {
        let mut newest: Vec<&IntakeRecord> = records.iter().collect();
        newest.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        newest
            .into_iter()
            .take(DASHBOARD_LIST_LIMIT)
            .map(|r| RecentUpload {
                id: r.id,
                filename: r.original_filename.clone(),
                uploaded_at: r.uploaded_at,
                category: r.category,
            })
            .collect()
    }

    fn compute_most_active_cases(records: &[IntakeRecord]) -> Vec<CaseActivity> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in records {
            *counts.entry(record.case_id.as_str()).or_insert(0) += 1;
        }

        let mut sorted: Vec<CaseActivity> = counts
            .into_iter()
            .map(|(case_id, count)| CaseActivity {
                case_id: case_id.to_string(),
                count,
            })
            .collect();
        sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.case_id.cmp(&b.case_id)));
        sorted.truncate(DASHBOARD_LIST_LIMIT);
        sorted
    }

    fn compute_average_confidence(records: &[IntakeRecord]) -> f64 {
        if records.is_empty() {
            return 0.0;
        }
        let total: f64 = records.iter().map(|r| r.suggestion.confidence).sum();
        total / records.len() as f64
    }

    pub fn count_for(&self, category: Category) -> usize {
        self.category_counts
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.count)
    }
}

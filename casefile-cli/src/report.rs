// Text rendering for CLI output. Everything returns a String so the
// formatting can be tested without capturing stdout.

use casefile_core::analytics::UploadAnalytics;
use casefile_core::intake::format_file_size;
use casefile_core::{score_categories, Category, ClassificationResult, IntakeRecord, UploadCandidate};
use std::fmt::Write;
use std::path::{Path, PathBuf};

pub fn classification_line(filename: &str, result: &ClassificationResult) -> String {
    format!(
        "📄 {filename}\n   → {} ({:.2}, {})\n   {}",
        result.category,
        result.confidence,
        result.confidence_label(),
        result.reasoning
    )
}

/// Per-category match counts, shown with `--explain`
pub fn explain_lines(filename: &str) -> String {
    let mut out = String::new();
    for score in score_categories(filename) {
        let _ = writeln!(out, "   {:.<12} {}", score.category.as_str(), score.score);
    }
    out
}

pub fn record_line(record: &IntakeRecord) -> String {
    let mut line = format!(
        "✅ {} ({})\n   → {} [{}] {:.2} {}\n   💾 {}",
        record.original_filename,
        format_file_size(record.file_size),
        record.category.label(),
        record.category,
        record.suggestion.confidence,
        record.suggestion.confidence_label(),
        record.storage_path,
    );
    if record.category_overridden {
        let _ = write!(line, "\n   ✏️  overridden (suggested {})", record.suggestion.category);
    }
    line
}

pub fn category_table() -> String {
    let mut out = String::from("📋 Document categories:\n");
    for category in Category::ALL {
        let _ = writeln!(
            out,
            "  {:<10} {:<20} {}",
            category.as_str(),
            category.label(),
            category.color()
        );
    }
    out
}

pub fn analytics_summary(analytics: &UploadAnalytics) -> String {
    let mut out = String::from("📊 Intake summary:\n");
    let _ = writeln!(
        out,
        "   - Documents: {} ({})",
        analytics.total_documents,
        format_file_size(analytics.total_bytes)
    );
    for count in &analytics.category_counts {
        let _ = writeln!(out, "   - {}: {}", count.category.label(), count.count);
    }
    let _ = writeln!(out, "   - Uploaded this week: {}", analytics.uploaded_this_week);
    let _ = writeln!(out, "   - Average confidence: {:.2}", analytics.average_confidence);
    if analytics.overridden > 0 {
        let _ = writeln!(out, "   - Overridden: {}", analytics.overridden);
    }
    if !analytics.largest_files.is_empty() {
        out.push_str("   - Largest files:\n");
        for file in &analytics.largest_files {
            let _ = writeln!(out, "       {} ({})", file.filename, format_file_size(file.size));
        }
    }
    if !analytics.recent_uploads.is_empty() {
        out.push_str("   - Recent uploads:\n");
        for upload in &analytics.recent_uploads {
            let _ = writeln!(
                out,
                "       {} [{}] {}",
                upload.filename,
                upload.category,
                upload.uploaded_at.format("%Y-%m-%d %H:%M")
            );
        }
    }
    if !analytics.most_active_cases.is_empty() {
        out.push_str("   - Most active cases:\n");
        for case in &analytics.most_active_cases {
            let _ = writeln!(out, "       case {}: {}", case.case_id, case.count);
        }
    }
    out
}

/// Read metadata for each path; failures are kept alongside their path
pub fn collect_candidates(paths: &[PathBuf]) -> Vec<(PathBuf, std::io::Result<UploadCandidate>)> {
    paths
        .iter()
        .map(|p| (p.clone(), UploadCandidate::from_path(Path::new(p))))
        .collect()
}

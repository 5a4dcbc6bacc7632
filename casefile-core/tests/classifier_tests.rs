//! Classifier contract tests.
//!
//! These pin the behavior callers depend on:
//!
//! - Scoring: category choice, confidence ramp and ceiling, tie-break order
//! - Result shape: JSON field names consumed by the portal
//! - Presentation: label/color tiers stay in lockstep
//!
//! Keyword lists themselves are not enumerated here beyond a few
//! representative entries; they are expected to grow.

use casefile_core::keywords::KEYWORD_TABLE;
use casefile_core::*;
use serde_json::Value;

// ============================================================================
// Helpers
// ============================================================================

/// Every (category, keyword) pair whose keyword occurs in no other list
/// and contains no other keyword as a substring
fn isolated_keywords() -> Vec<(Category, &'static str)> {
    let mut isolated = Vec::new();
    for list in KEYWORD_TABLE.iter() {
        for keyword in list.keywords {
            let hits: usize = KEYWORD_TABLE
                .iter()
                .map(|other| other.count_matches(keyword))
                .sum();
            if hits == 1 {
                isolated.push((list.category, *keyword));
            }
        }
    }
    isolated
}

fn to_json(result: &ClassificationResult) -> Value {
    serde_json::to_value(result).expect("result serializes")
}

// ============================================================================
// Scoring
// ============================================================================

mod scoring {
    use super::*;

    #[test]
    fn no_keywords_means_other() {
        for name in ["vacation_photo.jpg", "IMG_0042.png", "", "scan0001.pdf"] {
            let result = classify(name);
            assert_eq!(result.category, Category::Other, "{name}");
            assert_eq!(result.confidence, 0.3, "{name}");
        }
    }

    #[test]
    fn single_isolated_keyword_scores_point_six() {
        let isolated = isolated_keywords();
        assert!(!isolated.is_empty());
        for (category, keyword) in isolated {
            let filename = format!("{keyword}.pdf");
            let result = classify(&filename);
            assert_eq!(result.category, category, "{filename}");
            assert_eq!(result.confidence, 0.6, "{filename}");
        }
    }

    #[test]
    fn two_keywords_score_point_seven_five() {
        let result = classify("2023_W2_tax_form.pdf");
        assert_eq!(result.category, Category::Financial);
        assert_eq!(result.confidence, 0.75);
        assert!(result.reasoning.contains("\"w2\""));
        assert!(result.reasoning.contains("\"tax\""));
    }

    #[test]
    fn ceiling_holds_for_many_matches() {
        // petition, motion, decree, judgment, summons
        let result = classify("petition-motion-decree-judgment-summons.pdf");
        assert_eq!(result.category, Category::Legal);
        assert_eq!(result.confidence, 0.85);
        assert_eq!(result.suggested_tags.as_ref().map(Vec::len), Some(3));
    }

    #[test]
    fn custody_schedule() {
        let result = classify("custody_visitation_schedule.docx");
        assert_eq!(result.category, Category::Custody);
        assert!(result.confidence >= 0.75);
    }

    #[test]
    fn first_declared_category_wins_ties() {
        assert_eq!(classify("bank_motion.pdf").category, Category::Financial);
        assert_eq!(classify("motion_deed.pdf").category, Category::Legal);
        assert_eq!(classify("deed_custody.pdf").category, Category::Property);
    }

    #[test]
    fn shared_keyword_resolves_to_earlier_list() {
        // "mortgage" is both financial and property
        assert_eq!(classify("mortgage.pdf").category, Category::Financial);
    }

    #[test]
    fn higher_score_beats_priority() {
        // legal: motion; property: deed, lease
        let result = classify("motion_deed_lease.pdf");
        assert_eq!(result.category, Category::Property);
        assert_eq!(result.confidence, 0.75);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(classify("BANK_STATEMENT.PDF"), classify("bank_statement.pdf"));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let name = "Parenting Plan - Final Decree.pdf";
        let first = classify(name);
        let second = classify(name);
        assert_eq!(first, second);
        assert_eq!(first.confidence.to_bits(), second.confidence.to_bits());
    }

    #[test]
    fn confidence_is_monotonic_in_matches() {
        let names = [
            "other.pdf",
            "bank.pdf",
            "bank_loan.pdf",
            "bank_loan_debt.pdf",
            "bank_loan_debt_salary.pdf",
        ];
        let confidences: Vec<f64> = names.iter().map(|n| classify(n).confidence).collect();
        assert_eq!(confidences, vec![0.3, 0.6, 0.75, 0.85, 0.85]);
    }

    #[test]
    fn explain_scores_match_classification() {
        let scores = score_categories("Motion_Deed_Lease.pdf");
        let best = scores.iter().map(|s| s.score).max().unwrap();
        let winner = scores.iter().find(|s| s.score == best).unwrap();
        assert_eq!(winner.category, classify("Motion_Deed_Lease.pdf").category);
    }
}

// ============================================================================
// Result shape
// ============================================================================

mod result_shape {
    use super::*;

    #[test]
    fn matched_result_uses_portal_field_names() {
        let json = to_json(&classify("bank_statement.pdf"));
        assert_eq!(json["category"], "financial");
        assert_eq!(json["confidence"], 0.75);
        assert_eq!(json["reasoning"], "Found \"bank\", \"statement\" in filename");
        assert_eq!(json["suggestedTags"], serde_json::json!(["bank", "statement"]));
    }

    #[test]
    fn unmatched_result_omits_tags() {
        let json = to_json(&classify("vacation_photo.jpg"));
        assert_eq!(json["category"], "other");
        assert!(json.get("suggestedTags").is_none());
        assert_eq!(
            json["reasoning"],
            "No specific keywords found in filename. Manual categorization recommended."
        );
    }

    #[test]
    fn result_deserializes_back() {
        let original = classify("lease_and_deed.pdf");
        let json = serde_json::to_string(&original).unwrap();
        let parsed: ClassificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}

// ============================================================================
// Presentation
// ============================================================================

mod presentation {
    use super::*;

    #[test]
    fn classifier_outputs_map_to_expected_tiers() {
        assert_eq!(classify("photo.jpg").confidence_label(), "Low Confidence");
        assert_eq!(classify("deed.pdf").confidence_label(), "Medium Confidence");
        assert_eq!(classify("deed.pdf").confidence_color(), "yellow");
        assert_eq!(classify("bank_loan_debt.pdf").confidence_label(), "High Confidence");
        assert_eq!(classify("bank_loan_debt.pdf").confidence_color(), "green");
    }

    #[test]
    fn free_functions_agree_with_tier() {
        for c in [0.0, 0.3, 0.59, 0.6, 0.75, 0.79, 0.8, 0.85, 1.0] {
            let tier = ConfidenceTier::from_confidence(c);
            assert_eq!(confidence_label(c), tier.label());
            assert_eq!(confidence_color(c), tier.color());
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ===== CATEGORY =====
// Closed set of document classes used to organize case files.
// Declaration order doubles as the tie-break priority for the classifier.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Financial,
    Legal,
    Property,
    Custody,
    Other,
}

impl Category {
    /// Every category, in priority order
    pub const ALL: [Category; 5] = [
        Category::Financial,
        Category::Legal,
        Category::Property,
        Category::Custody,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Financial => "financial",
            Category::Legal => "legal",
            Category::Property => "property",
            Category::Custody => "custody",
            Category::Other => "other",
        }
    }

    /// Human-facing label shown in category selectors and badges
    pub fn label(&self) -> &'static str {
        match self {
            Category::Financial => "Financial",
            Category::Legal => "Legal Documents",
            Category::Property => "Property",
            Category::Custody => "Custody & Children",
            Category::Other => "Other",
        }
    }

    /// Badge color tag
    pub fn color(&self) -> &'static str {
        match self {
            Category::Financial => "blue",
            Category::Legal => "purple",
            Category::Property => "green",
            Category::Custody => "orange",
            Category::Other => "gray",
        }
    }

    /// Position in the tie-break order (0 = highest priority)
    pub fn priority(&self) -> usize {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .unwrap_or(Self::ALL.len())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown document category '{0}' (expected financial, legal, property, custody or other)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

// ===== CLASSIFICATION RESULT =====

/// Advisory categorization of a single uploaded file.
///
/// Created fresh for every upload attempt. Callers pre-fill a user-editable
/// category field from it; it is never authoritative on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    /// 0.3 when nothing matched, otherwise 0.6..=0.85
    pub confidence: f64,
    pub reasoning: String,
    /// Up to three matched keywords; absent when nothing matched
    #[serde(rename = "suggestedTags", default, skip_serializing_if = "Option::is_none")]
    pub suggested_tags: Option<Vec<String>>,
}

impl ClassificationResult {
    pub fn tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_confidence(self.confidence)
    }

    pub fn confidence_label(&self) -> &'static str {
        self.tier().label()
    }

    pub fn confidence_color(&self) -> &'static str {
        self.tier().color()
    }
}

// ===== CONFIDENCE PRESENTATION =====
// Label and color both come from the tier so their thresholds can't drift apart.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub const HIGH_THRESHOLD: f64 = 0.8;
    pub const MEDIUM_THRESHOLD: f64 = 0.6;

    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= Self::HIGH_THRESHOLD {
            ConfidenceTier::High
        } else if confidence >= Self::MEDIUM_THRESHOLD {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "High Confidence",
            ConfidenceTier::Medium => "Medium Confidence",
            ConfidenceTier::Low => "Low Confidence",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "green",
            ConfidenceTier::Medium => "yellow",
            ConfidenceTier::Low => "orange",
        }
    }
}

pub fn confidence_label(confidence: f64) -> &'static str {
    ConfidenceTier::from_confidence(confidence).label()
}

pub fn confidence_color(confidence: f64) -> &'static str {
    ConfidenceTier::from_confidence(confidence).color()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Custody".parse::<Category>(), Ok(Category::Custody));
        assert_eq!("  legal ".parse::<Category>(), Ok(Category::Legal));
        assert!("receipts".parse::<Category>().is_err());
    }

    #[test]
    fn category_metadata_matches_portal_table() {
        assert_eq!(Category::Legal.label(), "Legal Documents");
        assert_eq!(Category::Custody.label(), "Custody & Children");
        assert_eq!(Category::Financial.color(), "blue");
        assert_eq!(Category::Other.color(), "gray");
    }

    #[test]
    fn priority_follows_declaration_order() {
        let priorities: Vec<usize> = Category::ALL.iter().map(|c| c.priority()).collect();
        assert_eq!(priorities, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(confidence_label(0.8), "High Confidence");
        assert_eq!(confidence_color(0.8), "green");
        assert_eq!(confidence_label(0.6), "Medium Confidence");
        assert_eq!(confidence_color(0.6), "yellow");
        assert_eq!(confidence_label(0.59), "Low Confidence");
        assert_eq!(confidence_color(0.3), "orange");
    }

    #[test]
    fn label_and_color_agree_across_range() {
        for step in 0..=100 {
            let c = step as f64 / 100.0;
            let expected_color = match confidence_label(c) {
                "High Confidence" => "green",
                "Medium Confidence" => "yellow",
                _ => "orange",
            };
            assert_eq!(confidence_color(c), expected_color, "tier mismatch at {c}");
        }
    }
}

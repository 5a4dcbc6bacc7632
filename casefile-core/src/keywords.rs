// Static keyword tables for filename categorization.
//
// Each list is a set of lowercase substrings. Some terms ("mortgage", "asset")
// appear under more than one category; the overlap is intentional and is
// resolved by the table's declaration order.

use crate::types::Category;

const FINANCIAL_KEYWORDS: &[&str] = &[
    "bank", "statement", "w2", "w-2", "tax", "1099",
    "pay stub", "paystub", "income", "salary", "asset",
    "debt", "credit", "loan", "mortgage", "financial",
    "account", "balance", "investment", "401k", "retirement",
];

const LEGAL_KEYWORDS: &[&str] = &[
    "petition", "motion", "order", "decree", "judgment",
    "summons", "complaint", "response", "declaration",
    "affidavit", "stipulation", "settlement", "agreement",
    "filing", "court", "legal", "attorney", "notice",
];

const PROPERTY_KEYWORDS: &[&str] = &[
    "deed", "title", "property", "mortgage", "lease",
    "rental", "real estate", "appraisal", "valuation",
    "home", "house", "vehicle", "car", "asset",
];

const CUSTODY_KEYWORDS: &[&str] = &[
    "parenting", "custody", "child", "children", "school",
    "medical", "health", "visitation", "support", "education",
    "daycare", "minor", "kid", "kids",
];

/// A category together with its ordered keyword list
#[derive(Debug, Clone, Copy)]
pub struct KeywordList {
    pub category: Category,
    pub keywords: &'static [&'static str],
}

/// Keyword lists in tie-break priority order. `Other` has no list; it is the fallback.
pub static KEYWORD_TABLE: [KeywordList; 4] = [
    KeywordList { category: Category::Financial, keywords: FINANCIAL_KEYWORDS },
    KeywordList { category: Category::Legal, keywords: LEGAL_KEYWORDS },
    KeywordList { category: Category::Property, keywords: PROPERTY_KEYWORDS },
    KeywordList { category: Category::Custody, keywords: CUSTODY_KEYWORDS },
];

pub fn keywords_for(category: Category) -> &'static [&'static str] {
    KEYWORD_TABLE
        .iter()
        .find(|list| list.category == category)
        .map(|list| list.keywords)
        .unwrap_or(&[])
}

impl KeywordList {
    /// Keywords that occur in `text`, in table order. `text` must already be lower-cased.
    pub fn matches_in<'t>(&self, text: &'t str) -> impl Iterator<Item = &'static str> + 't {
        let keywords: &'static [&'static str] = self.keywords;
        keywords
            .iter()
            .copied()
            .filter(move |keyword| text.contains(keyword))
    }

    /// Number of distinct keywords found in `text`
    pub fn count_matches(&self, text: &str) -> usize {
        self.matches_in(text).count()
    }
}

//! Skill category inference.
//!
//! Maps an item to the capability labels whose trigger keywords appear in its
//! text. A keyword matches anywhere in the lower-cased text, including inside
//! a larger word ("art" fires on "smart"). This is a presence check per
//! category, not a per-token count.

use std::sync::{Arc, LazyLock};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::core::Item;
use crate::error::{Result, ScoutError};

// =============================================================================
// CATEGORY TABLE
// =============================================================================

/// One label and the keywords that trigger it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    pub keywords: Vec<String>,
}

/// Ordered label → keyword mapping. Iteration order is label output order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryTable {
    categories: Vec<Category>,
}

static BUILTIN_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "automation",
        &["automate", "automation", "browser", "playwright", "puppeteer", "selenium", "scraping", "workflow"],
    ),
    (
        "coding",
        &["code", "coding", "programming", "developer", "typescript", "python", "javascript", "rust", "git", "github"],
    ),
    (
        "trading",
        &["crypto", "trading", "defi", "wallet", "blockchain", "btc", "eth", "swap", "market", "bitcoin"],
    ),
    (
        "writing",
        &["content", "blog", "writing", "copywriting", "newsletter", "article", "documentation"],
    ),
    (
        "research",
        &["research", "analysis", "data", "report", "study", "investigate"],
    ),
    (
        "assistant",
        &["assistant", "help", "task", "organize", "calendar", "email", "schedule"],
    ),
    (
        "creative",
        &["art", "design", "creative", "image", "music", "video", "generate"],
    ),
    (
        "security",
        &["security", "pentest", "vulnerability", "audit", "ctf", "hack", "exploit"],
    ),
    (
        "infrastructure",
        &["infrastructure", "devops", "deploy", "server", "docker", "kubernetes", "aws"],
    ),
    (
        "social",
        &["social", "community", "discord", "twitter", "moltbook", "telegram"],
    ),
    (
        "messaging",
        &["whatsapp", "telegram", "slack", "discord", "chat", "message", "sms"],
    ),
    (
        "api",
        &["api", "rest", "graphql", "endpoint", "integration", "webhook"],
    ),
];

static DEFAULT_TABLE: LazyLock<Arc<CategoryTable>> = LazyLock::new(|| {
    Arc::new(CategoryTable {
        categories: BUILTIN_CATEGORIES
            .iter()
            .map(|(label, keywords)| Category {
                label: (*label).to_string(),
                keywords: keywords.iter().map(|kw| (*kw).to_string()).collect(),
            })
            .collect(),
    })
});

impl CategoryTable {
    /// The process-wide built-in table.
    #[must_use]
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&DEFAULT_TABLE)
    }

    /// Build a table from configured categories.
    ///
    /// Labels and keywords are lower-cased and blank keywords dropped. Labels
    /// must be non-empty and unique, and each category needs at least one
    /// keyword.
    pub fn from_categories(categories: Vec<Category>) -> Result<Self> {
        let mut out: Vec<Category> = Vec::with_capacity(categories.len());
        for category in categories {
            let label = category.label.trim().to_lowercase();
            if label.is_empty() {
                return Err(ScoutError::ValidationFailed(
                    "category label must not be empty".to_string(),
                ));
            }
            if out.iter().any(|existing| existing.label == label) {
                return Err(ScoutError::ValidationFailed(format!(
                    "duplicate category label {label}"
                )));
            }
            let keywords: Vec<String> = category
                .keywords
                .iter()
                .map(|kw| kw.trim().to_lowercase())
                .filter(|kw| !kw.is_empty())
                .collect();
            if keywords.is_empty() {
                return Err(ScoutError::ValidationFailed(format!(
                    "category {label} has no keywords"
                )));
            }
            out.push(Category { label, keywords });
        }
        Ok(Self { categories: out })
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.label.as_str()).collect()
    }

    #[must_use]
    pub fn contains_label(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c.label == label)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Labels whose keyword set hits `lowered`, in table order.
    #[must_use]
    pub fn matching_labels(&self, lowered: &str) -> Vec<String> {
        self.categories
            .iter()
            .filter(|category| category.keywords.iter().any(|kw| lowered.contains(kw.as_str())))
            .map(|category| category.label.clone())
            .collect()
    }
}

// =============================================================================
// CLASSIFIER TRAIT
// =============================================================================

/// Infers skill labels for an item.
pub trait SkillClassifier: Send + Sync {
    /// Labels for `item`, without duplicates, in a stable order.
    fn classify(&self, item: &Item) -> Vec<String>;

    /// Returns the name of this classifier for debugging.
    fn name(&self) -> &'static str;
}

/// Keyword-membership classifier over a [`CategoryTable`].
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    table: Arc<CategoryTable>,
}

impl KeywordClassifier {
    #[must_use]
    pub const fn new(table: Arc<CategoryTable>) -> Self {
        Self { table }
    }

    #[must_use]
    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    /// Classify already-lowered text.
    #[must_use]
    pub fn classify_text(&self, lowered: &str) -> Vec<String> {
        self.table.matching_labels(lowered)
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(CategoryTable::builtin())
    }
}

impl SkillClassifier for KeywordClassifier {
    fn classify(&self, item: &Item) -> Vec<String> {
        self.classify_text(&item.search_text().to_lowercase())
    }

    fn name(&self) -> &'static str {
        "KeywordClassifier"
    }
}

/// Count how many items carry each label, most common first.
///
/// Ties are broken by label so the listing is stable.
pub fn skill_histogram<'a, I>(classifier: &dyn SkillClassifier, items: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a Item>,
{
    items
        .into_iter()
        .flat_map(|item| classifier.classify(item))
        .counts()
        .into_iter()
        .sorted_by(|(la, ca), (lb, cb)| cb.cmp(ca).then_with(|| la.cmp(lb)))
        .collect()
}

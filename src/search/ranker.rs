//! Ranking a collection of items against a query.

use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use super::classifier::{KeywordClassifier, SkillClassifier};
use super::scorer::Scorer;
use super::tokenizer::tokenize;
use crate::core::{Item, ItemKind};

/// Collections at least this large are scored on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 2048;

/// Default number of results shown.
pub const DEFAULT_LIMIT: usize = 10;

/// One scored item. Borrows the item from the collection.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult<'a> {
    pub item: &'a Item,
    pub score: f64,
    pub matched_terms: Vec<String>,
    pub skills: Vec<String>,
}

/// What to rank for.
#[derive(Debug, Clone)]
pub struct RankQuery {
    pub text: String,
    /// Only rank items of this kind.
    pub kind: Option<ItemKind>,
    /// Only keep results carrying at least one of these skill labels.
    pub skills: Vec<String>,
    pub limit: usize,
}

impl RankQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: None,
            skills: Vec::new(),
            limit: DEFAULT_LIMIT,
        }
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: Option<ItemKind>) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_skills(mut self, skills: Vec<String>) -> Self {
        self.skills = skills;
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Scores, filters and orders items.
pub struct Ranker {
    scorer: Scorer,
    classifier: Arc<dyn SkillClassifier>,
    parallel: bool,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(
            Scorer::default(),
            Arc::new(KeywordClassifier::default()),
        )
    }
}

impl Ranker {
    pub fn new(scorer: Scorer, classifier: Arc<dyn SkillClassifier>) -> Self {
        Self {
            scorer,
            classifier,
            parallel: true,
        }
    }

    /// Allow or forbid the rayon path for large collections.
    #[must_use]
    pub const fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    #[must_use]
    pub fn classifier(&self) -> &dyn SkillClassifier {
        self.classifier.as_ref()
    }

    /// Top `query.limit` results, best first.
    #[must_use]
    pub fn rank<'a>(&self, items: &'a [Item], query: &RankQuery) -> Vec<SearchResult<'a>> {
        let mut results = self.rank_all(items, query);
        results.truncate(query.limit);
        results
    }

    /// Every matching result, best first. Equal scores keep input order.
    #[must_use]
    pub fn rank_all<'a>(&self, items: &'a [Item], query: &RankQuery) -> Vec<SearchResult<'a>> {
        let query_tokens = tokenize(&query.text);
        if query_tokens.is_empty() {
            debug!(target: "search", query = %query.text, "query has no usable tokens");
            return Vec::new();
        }

        let candidates: Vec<&'a Item> = items
            .iter()
            .filter(|item| query.kind.is_none_or(|kind| item.kind() == kind))
            .collect();

        let use_parallel = self.parallel && candidates.len() >= PARALLEL_THRESHOLD;
        debug!(
            target: "search",
            tokens = ?query_tokens,
            candidates = candidates.len(),
            parallel = use_parallel,
            "ranking"
        );

        let mut results: Vec<SearchResult<'a>> = if use_parallel {
            candidates
                .into_par_iter()
                .filter_map(|item| self.evaluate(item, &query_tokens, &query.skills))
                .collect()
        } else {
            candidates
                .into_iter()
                .filter_map(|item| self.evaluate(item, &query_tokens, &query.skills))
                .collect()
        };

        // `sort_by` is stable: ties stay in collection order.
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        debug!(target: "search", matches = results.len(), "ranking complete");
        results
    }

    fn evaluate<'a>(
        &self,
        item: &'a Item,
        query_tokens: &[String],
        skill_filter: &[String],
    ) -> Option<SearchResult<'a>> {
        let item_tokens = tokenize(&item.search_text());
        let breakdown = self.scorer.score(item, &item_tokens, query_tokens);
        if !breakdown.is_match() {
            return None;
        }

        let skills = self.classifier.classify(item);
        if !skill_filter.is_empty() && !skills.iter().any(|s| skill_filter.contains(s)) {
            return None;
        }

        Some(SearchResult {
            item,
            score: breakdown.score,
            matched_terms: breakdown.matched_terms,
            skills,
        })
    }
}

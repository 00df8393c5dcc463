//! Term-match relevance scoring for a single item.
//!
//! Each query token earns points for exact token hits, partial (substring)
//! token hits, and substring hits in the name, description and tags. The
//! summed total is then scaled by small log-scale popularity boosts, so
//! popularity can reorder comparable matches but never creates one.

use serde::{Deserialize, Serialize};

use crate::core::Item;

/// Suffix marking a term that only matched partially.
pub const PARTIAL_MARKER: char = '*';

/// Points and boost coefficients used by the [`Scorer`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Per item token equal to the query token.
    pub exact: f64,
    /// Per item token that contains, or is contained in, the query token.
    pub partial: f64,
    /// Query token appears in the name.
    pub name: f64,
    /// Query token appears in the description.
    pub description: f64,
    /// Query token appears in any skill tag.
    pub tag: f64,
    /// Coefficient on `log10(max(karma, 1) + 1)`.
    pub karma_boost: f64,
    /// Multiplier for active agents.
    pub active_boost: f64,
    /// Coefficient on `log10(max(downloads, 1) + 1)`.
    pub download_boost: f64,
    /// Coefficient on `log10(stars + 1)`, applied when stars > 0.
    pub star_boost: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            exact: 10.0,
            partial: 3.0,
            name: 15.0,
            description: 5.0,
            tag: 8.0,
            karma_boost: 0.1,
            active_boost: 1.2,
            download_boost: 0.1,
            star_boost: 0.15,
        }
    }
}

/// Score for one item and the query terms that produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub score: f64,
    /// Distinct query terms in first-match order; partial-only hits end in `*`.
    pub matched_terms: Vec<String>,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.score > 0.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    #[must_use]
    pub const fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Score `item` whose text tokenized to `item_tokens` against `query_tokens`.
    #[must_use]
    pub fn score(
        &self,
        item: &Item,
        item_tokens: &[String],
        query_tokens: &[String],
    ) -> ScoreBreakdown {
        let w = &self.weights;
        let name = item.name().to_lowercase();
        let description = item.description().to_lowercase();
        let tags: Vec<String> = item.tags().iter().map(|t| t.to_lowercase()).collect();

        let mut total = 0.0;
        let mut matched: Vec<String> = Vec::new();

        for qt in query_tokens {
            let exact = item_tokens.iter().filter(|t| *t == qt).count();
            if exact > 0 {
                total += exact as f64 * w.exact;
                record_term(&mut matched, qt, false);
            }

            let partial = item_tokens
                .iter()
                .filter(|t| t.contains(qt.as_str()) || qt.contains(t.as_str()))
                .count();
            if partial > 0 {
                total += partial as f64 * w.partial;
                record_term(&mut matched, qt, true);
            }

            if name.contains(qt.as_str()) {
                total += w.name;
            }
            if description.contains(qt.as_str()) {
                total += w.description;
            }
            if tags.iter().any(|tag| tag.contains(qt.as_str())) {
                total += w.tag;
            }
        }

        ScoreBreakdown {
            score: total * self.popularity_boost(item),
            matched_terms: matched,
        }
    }

    /// Multiplicative popularity factor, always >= 1.
    #[must_use]
    pub fn popularity_boost(&self, item: &Item) -> f64 {
        let w = &self.weights;
        match item {
            Item::Agent(agent) => {
                let karma = agent.karma.max(1) as f64;
                let mut factor = 1.0 + (karma + 1.0).log10() * w.karma_boost;
                if agent.is_active {
                    factor *= w.active_boost;
                }
                factor
            }
            Item::Skill(skill) => {
                let downloads = skill.stats.downloads.max(1) as f64;
                let mut factor = 1.0 + (downloads + 1.0).log10() * w.download_boost;
                if skill.stats.stars > 0 {
                    factor *= 1.0 + (skill.stats.stars as f64 + 1.0).log10() * w.star_boost;
                }
                factor
            }
        }
    }
}

fn record_term(matched: &mut Vec<String>, term: &str, partial: bool) {
    let already = matched
        .iter()
        .any(|m| m.strip_suffix(PARTIAL_MARKER).unwrap_or(m) == term);
    if already {
        return;
    }
    if partial {
        matched.push(format!("{term}{PARTIAL_MARKER}"));
    } else {
        matched.push(term.to_string());
    }
}

//! Keyword relevance search over agents and skills
//!
//! Tokenize, score each item by term overlap, boost by popularity, sort.
//! There is no index: every query is a linear scan over the in-memory
//! collection.

pub mod classifier;
pub mod ranker;
pub mod scorer;
pub mod tokenizer;

pub use classifier::{
    Category, CategoryTable, KeywordClassifier, SkillClassifier, skill_histogram,
};
pub use ranker::{DEFAULT_LIMIT, PARALLEL_THRESHOLD, RankQuery, Ranker, SearchResult};
pub use scorer::{PARTIAL_MARKER, ScoreBreakdown, Scorer, ScoringWeights};
pub use tokenizer::{MIN_TOKEN_LEN, tokenize};

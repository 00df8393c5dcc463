//! Result presenters for each output format.

pub mod search_results;

pub use search_results::SearchResults;

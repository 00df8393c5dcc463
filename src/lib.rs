//! scout - keyword relevance search over agent profiles and skill packages
//!
//! Loads a JSON snapshot of agents and skills, scores every item against a
//! free-text query, and prints the best matches.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod search;
pub mod test_utils;
pub mod utils;

pub use error::{Result, ScoutError};

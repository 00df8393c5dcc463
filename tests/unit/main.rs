//! Table-driven and scenario tests against the public API.

mod config_tests;
mod scenario_tests;
mod tokenizer_tests;

//! Property-based tests for the ranking engine.

mod ranking_props;

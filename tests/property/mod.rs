//! Property-based tests for merge precedence

mod precedence;

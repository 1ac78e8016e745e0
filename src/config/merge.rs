//! Merge stages and the option-granular merge policy.

mod merge_policy;

pub use merge_policy::{apply, MergeStage};

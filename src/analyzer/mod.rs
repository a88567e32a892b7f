//! Automatic bump-level analysis over pending changes.

pub mod bump_analyzer;

pub use bump_analyzer::BumpAnalyzer;

// src/matching/mod.rs
//! Resume-to-job scoring and resume improvement suggestions

pub mod scorer;
pub mod suggestions;

pub use scorer::MatchScorer;
pub use suggestions::ResumeAdvisor;

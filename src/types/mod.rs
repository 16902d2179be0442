// src/types/mod.rs
pub mod job;
pub mod report;
pub mod resume;

pub use job::{ExtractedJobFields, JobOrigin, JobPostingText, TargetJob};
pub use report::{FeedbackRecord, KeywordMatches, MatchReport};
pub use resume::ResumeText;

//! Skill extraction and gap analysis

pub mod catalog;
pub mod display;
pub mod extractor;
pub mod gap_analyzer;
pub mod models;
pub mod normalizer;
pub mod ranker;
pub mod recommendations;
pub mod sections;
pub mod tfidf;

pub use extractor::ResumeExtractor;
pub use gap_analyzer::{analyze_skill_gap, GapAnalyzer};
pub use models::{JobRequirement, ResumeProfile, SkillGapResult};
pub use normalizer::SkillNormalizer;
pub use ranker::{rank_jobs, JobRanking};
pub use recommendations::generate_recommendations;

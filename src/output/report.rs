//! Report records handed to the formatters

use crate::processing::models::{JobRequirement, ResumeProfile, SkillGapResult};
use crate::processing::normalizer::SkillOverlap;
use crate::processing::ranker::JobRanking;
use crate::processing::recommendations::generate_recommendations;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Characters of resume text shown in human-readable profile output
pub const TEXT_PREVIEW_CHARS: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    /// Resume file or "skills input"
    pub source: String,
}

impl ReportMetadata {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            source: source.into(),
        }
    }
}

/// Everything extracted from one resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    pub metadata: ReportMetadata,
    pub profile: ResumeProfile,
    pub total_skills_found: usize,
}

impl ProfileReport {
    pub fn new(profile: ResumeProfile) -> Self {
        Self {
            metadata: ReportMetadata::new(profile.filename.clone()),
            total_skills_found: profile.skills.len(),
            profile,
        }
    }

    /// First 500 characters of the resume text, with an ellipsis when cut.
    pub fn text_preview(&self) -> String {
        let text = &self.profile.text;
        if text.chars().count() > TEXT_PREVIEW_CHARS {
            let preview: String = text.chars().take(TEXT_PREVIEW_CHARS).collect();
            format!("{}...", preview)
        } else {
            text.clone()
        }
    }
}

/// Summary of one gap analysis as exposed to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGapAnalysis {
    pub job_fit_score: f64,
    /// Matching required skills followed by matching preferred skills
    pub matching_skills: Vec<String>,
    /// Missing required skills
    pub missing_skills: Vec<String>,
    pub additional_skills: Vec<String>,
    pub similarity_score: f64,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub metadata: ReportMetadata,
    pub job_title: String,
    pub analysis: SkillGapAnalysis,
    pub details: SkillGapResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_overlap: Option<SkillOverlap>,
    pub status: String,
}

impl MatchReport {
    pub fn new(source: impl Into<String>, job: &JobRequirement, result: SkillGapResult) -> Self {
        let recommendations = generate_recommendations(
            &result.missing_required,
            &result.missing_preferred,
            result.job_fit_score,
        );

        let matching_skills = result
            .matching_required
            .iter()
            .chain(result.matching_preferred.iter())
            .cloned()
            .collect();

        let analysis = SkillGapAnalysis {
            job_fit_score: result.job_fit_score,
            matching_skills,
            missing_skills: result.missing_required.clone(),
            additional_skills: result.additional_skills.clone(),
            similarity_score: result.similarity_score,
            recommendations,
        };

        Self {
            metadata: ReportMetadata::new(source),
            job_title: job.job_title.clone(),
            analysis,
            details: result,
            skill_overlap: None,
            status: "success".to_string(),
        }
    }

    pub fn with_overlap(mut self, overlap: SkillOverlap) -> Self {
        self.skill_overlap = Some(overlap);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub metadata: ReportMetadata,
    pub total_jobs_analyzed: usize,
    pub results: Vec<JobRanking>,
}

impl RankingReport {
    pub fn new(source: impl Into<String>, results: Vec<JobRanking>) -> Self {
        Self {
            metadata: ReportMetadata::new(source),
            total_jobs_analyzed: results.len(),
            results,
        }
    }

    pub fn best_match(&self) -> Option<&JobRanking> {
        self.results.first()
    }
}

/// Any report the CLI can render.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Report {
    Profile(ProfileReport),
    Match(MatchReport),
    Ranking(RankingReport),
}

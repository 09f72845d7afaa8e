//! Records produced by extraction and analysis

use crate::error::{Result, SkillGapError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything extracted from one resume text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub text: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Sorted, deduplicated display names
    pub skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    pub work_experience: Vec<WorkExperienceEntry>,
    pub experience_years: Option<f64>,
    pub filename: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DegreeLabel {
    #[serde(rename = "B.Tech")]
    BTech,
    #[serde(rename = "M.Tech")]
    MTech,
    #[serde(rename = "B.E.")]
    BE,
    #[serde(rename = "BCA")]
    Bca,
    #[serde(rename = "MCA")]
    Mca,
    #[serde(rename = "MBA")]
    Mba,
    #[serde(rename = "12th")]
    Twelfth,
    #[serde(rename = "10th")]
    Tenth,
}

impl DegreeLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DegreeLabel::BTech => "B.Tech",
            DegreeLabel::MTech => "M.Tech",
            DegreeLabel::BE => "B.E.",
            DegreeLabel::Bca => "BCA",
            DegreeLabel::Mca => "MCA",
            DegreeLabel::Mba => "MBA",
            DegreeLabel::Twelfth => "12th",
            DegreeLabel::Tenth => "10th",
        }
    }
}

impl fmt::Display for DegreeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: DegreeLabel,
    /// Degree text as written, e.g. "B.Tech CSE AI&ML"
    pub matched_text: String,
    pub institution: Option<String>,
    pub year: Option<String>,
    /// Percentage or CGPA token, e.g. "70.6 %"
    pub score: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperienceEntry {
    pub title: String,
    pub company: String,
    /// Raw range such as "2020-2024" or "2023-Present"
    pub duration: String,
}

/// A job to analyze against. `min_experience` and `education_required` are
/// carried through but do not affect scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirement {
    pub job_title: String,
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Option<Vec<String>>,
    #[serde(default)]
    pub min_experience: Option<f64>,
    #[serde(default)]
    pub education_required: Option<String>,
}

impl JobRequirement {
    pub fn new(job_title: impl Into<String>, required_skills: Vec<String>) -> Self {
        Self {
            job_title: job_title.into(),
            required_skills,
            preferred_skills: None,
            min_experience: None,
            education_required: None,
        }
    }

    pub fn with_preferred(mut self, preferred_skills: Vec<String>) -> Self {
        self.preferred_skills = Some(preferred_skills);
        self
    }

    pub fn preferred(&self) -> &[String] {
        self.preferred_skills.as_deref().unwrap_or(&[])
    }

    /// Boundary check run before a job reaches the analyzer.
    pub fn validate(&self) -> Result<()> {
        if self.job_title.trim().is_empty() {
            return Err(SkillGapError::InvalidInput("Job title cannot be empty".to_string()));
        }
        if self.required_skills.iter().all(|s| s.trim().is_empty()) {
            return Err(SkillGapError::InvalidInput(format!(
                "Job required skills cannot be empty ({})",
                self.job_title
            )));
        }
        if let Some(years) = self.min_experience {
            if !years.is_finite() || years < 0.0 {
                return Err(SkillGapError::InvalidInput(format!(
                    "Minimum experience must be a non-negative number ({})",
                    self.job_title
                )));
            }
        }
        Ok(())
    }
}

/// Outcome of comparing one skill set with one job. Every set is sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapResult {
    pub matching_required: Vec<String>,
    pub matching_preferred: Vec<String>,
    pub missing_required: Vec<String>,
    pub missing_preferred: Vec<String>,
    pub additional_skills: Vec<String>,
    /// TF-IDF cosine similarity in [0, 1]
    pub similarity_score: f64,
    /// Composite score in [0, 100], two decimals
    pub job_fit_score: f64,
    pub required_match_percentage: f64,
    pub total_skills_matched: usize,
}

//! Ranking one skill set against many jobs

use crate::processing::gap_analyzer::GapAnalyzer;
use crate::processing::models::JobRequirement;
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRanking {
    pub job_title: String,
    pub fit_score: f64,
    /// TF-IDF cosine similarity in [0, 1]
    pub similarity_score: f64,
    pub required_match_percentage: f64,
    pub skills_matched: usize,
    pub missing_required_count: usize,
}

impl GapAnalyzer {
    /// Analyze every job and sort by fit score, highest first. Equal scores
    /// keep their input order.
    pub fn rank_jobs<S: AsRef<str>>(&self, resume_skills: &[S], jobs: &[JobRequirement]) -> Vec<JobRanking> {
        info!("Ranking {} jobs", jobs.len());

        let mut rankings: Vec<JobRanking> = jobs
            .iter()
            .map(|job| {
                let resume: Vec<&str> = resume_skills.iter().map(|s| s.as_ref()).collect();
                let required: Vec<&str> = job.required_skills.iter().map(String::as_str).collect();
                let preferred: Vec<&str> = job.preferred().iter().map(String::as_str).collect();

                let analysis = self.analyze_skill_gap(&resume, &required, &preferred);

                JobRanking {
                    job_title: job.job_title.clone(),
                    fit_score: analysis.job_fit_score,
                    similarity_score: analysis.similarity_score,
                    required_match_percentage: analysis.required_match_percentage,
                    skills_matched: analysis.total_skills_matched,
                    missing_required_count: analysis.missing_required.len(),
                }
            })
            .collect();

        rankings.sort_by(|a, b| b.fit_score.total_cmp(&a.fit_score));
        rankings
    }
}

/// Rank jobs with the default scoring settings.
pub fn rank_jobs<S: AsRef<str>>(resume_skills: &[S], jobs: &[JobRequirement]) -> Vec<JobRanking> {
    GapAnalyzer::default().rank_jobs(resume_skills, jobs)
}

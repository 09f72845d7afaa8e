//! Skill gap analysis: set comparison plus TF-IDF similarity

use crate::config::ScoringConfig;
use crate::processing::models::{JobRequirement, SkillGapResult};
use crate::processing::normalizer::{SkillNormalizer, SkillOverlap};
use crate::processing::tfidf::TfidfVectorizer;
use log::{debug, warn};
use std::collections::BTreeSet;

pub struct GapAnalyzer {
    normalizer: SkillNormalizer,
    vectorizer: TfidfVectorizer,
    config: ScoringConfig,
}

impl Default for GapAnalyzer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl GapAnalyzer {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            normalizer: SkillNormalizer::new(),
            vectorizer: TfidfVectorizer::from_config(&config),
            config,
        }
    }

    /// Overlap between the resume skills and everything the job lists,
    /// required and preferred together.
    pub fn skill_overlap<S: AsRef<str>>(&self, resume_skills: &[S], job: &JobRequirement) -> SkillOverlap {
        let job_skills: Vec<&str> = job
            .required_skills
            .iter()
            .chain(job.preferred())
            .map(String::as_str)
            .collect();
        let resume: Vec<&str> = resume_skills.iter().map(|s| s.as_ref()).collect();

        self.normalizer.calculate_skill_overlap(&resume, &job_skills)
    }

    /// Compare resume skills with a job's required and preferred skills.
    /// Empty inputs degrade to zero scores rather than failing.
    pub fn analyze_skill_gap<S: AsRef<str>>(
        &self,
        resume_skills: &[S],
        required_skills: &[S],
        preferred_skills: &[S],
    ) -> SkillGapResult {
        let resume: BTreeSet<String> = self.normalizer.normalize_many(resume_skills).into_iter().collect();
        let required: BTreeSet<String> = self.normalizer.normalize_many(required_skills).into_iter().collect();
        let preferred: BTreeSet<String> = self.normalizer.normalize_many(preferred_skills).into_iter().collect();

        let matching_required: Vec<String> = required.intersection(&resume).cloned().collect();
        let missing_required: Vec<String> = required.difference(&resume).cloned().collect();
        let matching_preferred: Vec<String> = preferred.intersection(&resume).cloned().collect();
        let missing_preferred: Vec<String> = preferred.difference(&resume).cloned().collect();
        let additional_skills: Vec<String> = resume
            .iter()
            .filter(|skill| !required.contains(*skill) && !preferred.contains(*skill))
            .cloned()
            .collect();

        let similarity_score = self.calculate_similarity(resume_skills, required_skills);

        let required_ratio = ratio(matching_required.len(), required.len());
        let preferred_ratio = ratio(matching_preferred.len(), preferred.len());

        let job_fit_score = round_to_hundredths(
            required_ratio * self.config.required_weight
                + preferred_ratio * self.config.preferred_weight
                + similarity_score * self.config.similarity_weight,
        );

        debug!(
            "Gap analysis: {}/{} required, {}/{} preferred, similarity {:.3}, fit {:.2}",
            matching_required.len(),
            required.len(),
            matching_preferred.len(),
            preferred.len(),
            similarity_score,
            job_fit_score
        );

        SkillGapResult {
            total_skills_matched: matching_required.len() + matching_preferred.len(),
            matching_required,
            matching_preferred,
            missing_required,
            missing_preferred,
            additional_skills,
            similarity_score,
            job_fit_score,
            required_match_percentage: required_ratio * 100.0,
        }
    }

    /// TF-IDF cosine similarity of the two skill lists as documents. Any
    /// vectorization failure is logged and scored as 0.0.
    pub fn calculate_similarity<S: AsRef<str>>(&self, resume_skills: &[S], job_skills: &[S]) -> f64 {
        let resume_text = self.normalizer.skills_to_text(resume_skills);
        let job_text = self.normalizer.skills_to_text(job_skills);

        if resume_text.is_empty() || job_text.is_empty() {
            return 0.0;
        }

        match self.vectorizer.document_similarity(&resume_text, &job_text) {
            Ok(similarity) => similarity,
            Err(e) => {
                warn!("Similarity calculation failed, using 0.0: {}", e);
                0.0
            }
        }
    }
}

/// Gap analysis with the default weights and vectorizer settings.
pub fn analyze_skill_gap<S: AsRef<str>>(
    resume_skills: &[S],
    required_skills: &[S],
    preferred_skills: &[S],
) -> SkillGapResult {
    GapAnalyzer::default().analyze_skill_gap(resume_skills, required_skills, preferred_skills)
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_perfect_match() {
        let skills = strings(&["Python", "Machine Learning", "SQL"]);
        let result = analyze_skill_gap(&skills, &skills, &[]);

        assert!(result.missing_required.is_empty());
        assert_eq!(result.required_match_percentage, 100.0);
        assert!((result.similarity_score - 1.0).abs() < 1e-9);
        assert_eq!(result.job_fit_score, 80.0);
        assert_eq!(result.total_skills_matched, 3);
    }

    #[test]
    fn test_no_overlap() {
        let resume = strings(&["JavaScript", "React", "HTML", "CSS"]);
        let required = strings(&["Python", "Machine Learning", "Deep Learning", "TensorFlow", "PyTorch"]);
        let result = analyze_skill_gap(&resume, &required, &[]);

        assert!(result.matching_required.is_empty());
        assert_eq!(
            result.missing_required,
            vec!["deep learning", "machine learning", "python", "pytorch", "tensorflow"]
        );
        assert!(result.job_fit_score < 20.0);
        assert_eq!(result.required_match_percentage, 0.0);
        assert_eq!(result.additional_skills, vec!["css", "html", "javascript", "react"]);
    }

    #[test]
    fn test_partial_match_with_preferred() {
        let resume = strings(&["Python", "SQL", "Docker", "Git"]);
        let required = strings(&["Python", "SQL", "Statistics", "Machine Learning"]);
        let preferred = strings(&["Docker", "Spark"]);
        let result = analyze_skill_gap(&resume, &required, &preferred);

        assert_eq!(result.matching_required, vec!["python", "structured query language"]);
        assert_eq!(result.missing_required, vec!["machine learning", "statistics"]);
        assert_eq!(result.matching_preferred, vec!["docker"]);
        assert_eq!(result.missing_preferred, vec!["spark"]);
        assert_eq!(result.additional_skills, vec!["git"]);
        assert_eq!(result.required_match_percentage, 50.0);
        assert_eq!(result.total_skills_matched, 3);

        // 30 from required, 10 from preferred, similarity on top
        assert!(result.job_fit_score >= 40.0 && result.job_fit_score <= 60.0);
    }

    #[test]
    fn test_synonyms_match_across_lists() {
        let resume = strings(&["JS", "K8s", "ML"]);
        let required = strings(&["JavaScript", "Kubernetes", "Machine Learning"]);
        let result = analyze_skill_gap(&resume, &required, &[]);

        assert!(result.missing_required.is_empty());
        assert_eq!(result.required_match_percentage, 100.0);
    }

    #[test]
    fn test_set_algebra_holds() {
        let cases: Vec<(Vec<String>, Vec<String>)> = vec![
            (strings(&["Python", "SQL"]), strings(&["python", "Docker", "AWS"])),
            (strings(&["js", "React", "CSS"]), strings(&["JavaScript", "css", "HTML"])),
            (strings(&[]), strings(&["Rust"])),
            (strings(&["Go", "C++"]), strings(&["C++", "Go", "go"])),
        ];
        let normalizer = SkillNormalizer::new();

        for (resume, required) in cases {
            let result = analyze_skill_gap(&resume, &required, &[]);
            let resume_set: BTreeSet<String> = normalizer.normalize_many(&resume).into_iter().collect();
            let required_set: BTreeSet<String> = normalizer.normalize_many(&required).into_iter().collect();

            let expected_missing: Vec<String> = required_set.difference(&resume_set).cloned().collect();
            assert_eq!(result.missing_required, expected_missing);
            assert!(result.matching_required.iter().all(|s| resume_set.contains(s) && required_set.contains(s)));

            let union: BTreeSet<String> = result
                .matching_required
                .iter()
                .chain(result.missing_required.iter())
                .cloned()
                .collect();
            assert_eq!(union, required_set);
        }
    }

    #[test]
    fn test_fit_score_bounds() {
        let cases: Vec<(Vec<String>, Vec<String>, Vec<String>)> = vec![
            (strings(&[]), strings(&[]), strings(&[])),
            (strings(&["Python"]), strings(&[]), strings(&[])),
            (strings(&["Python", "Docker"]), strings(&["Python"]), strings(&["Docker"])),
            (strings(&["a", "b"]), strings(&["c"]), strings(&["d"])),
            (strings(&["C++"]), strings(&["C++"]), strings(&[])),
        ];

        for (resume, required, preferred) in cases {
            let result = analyze_skill_gap(&resume, &required, &preferred);
            assert!((0.0..=100.0).contains(&result.job_fit_score), "{:?}", result);
            assert!((0.0..=1.0).contains(&result.similarity_score));
        }
    }

    #[test]
    fn test_vectorization_failure_falls_back_to_zero() {
        let skills = strings(&["C++", "C#"]);
        let result = analyze_skill_gap(&skills, &skills, &[]);

        assert_eq!(result.similarity_score, 0.0);
        assert_eq!(result.job_fit_score, 60.0);
    }

    #[test]
    fn test_empty_required_degrades() {
        let result = analyze_skill_gap(&strings(&["Python"]), &[], &[]);

        assert_eq!(result.similarity_score, 0.0);
        assert_eq!(result.job_fit_score, 0.0);
        assert_eq!(result.required_match_percentage, 0.0);
        assert_eq!(result.additional_skills, vec!["python"]);
    }

    #[test]
    fn test_custom_weights() {
        let config = ScoringConfig {
            required_weight: 100.0,
            preferred_weight: 0.0,
            similarity_weight: 0.0,
            ..ScoringConfig::default()
        };
        let analyzer = GapAnalyzer::new(config);
        let result = analyzer.analyze_skill_gap(&["Python"], &["Python", "SQL", "Docker"], &[]);

        assert_eq!(result.job_fit_score, 33.33);
    }

    #[test]
    fn test_skill_overlap_covers_required_and_preferred() {
        let job = JobRequirement::new("Backend Developer", strings(&["Python", "SQL"]))
            .with_preferred(strings(&["Docker"]));
        let overlap = GapAnalyzer::default().skill_overlap(&["python", "Docker", "Rust"], &job);

        assert_eq!(overlap.matching, vec!["docker", "python"]);
        assert_eq!(overlap.only_in_first, vec!["rust"]);
        assert_eq!(overlap.only_in_second, vec!["structured query language"]);
        assert_eq!(overlap.total_unique, 4);
        assert_eq!(overlap.overlap_ratio, 0.5);
    }
}

//! Guidance lines derived from a gap analysis

const MAX_PRIORITY_SKILLS: usize = 5;
const MAX_BONUS_SKILLS: usize = 3;
const BONUS_SCORE_CEILING: f64 = 90.0;

/// Score band of a fit score, used for the headline and console badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitBand {
    Excellent,
    Good,
    Moderate,
    Low,
}

impl FitBand {
    pub fn from_score(job_fit_score: f64) -> Self {
        if job_fit_score >= 80.0 {
            FitBand::Excellent
        } else if job_fit_score >= 60.0 {
            FitBand::Good
        } else if job_fit_score >= 40.0 {
            FitBand::Moderate
        } else {
            FitBand::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FitBand::Excellent => "EXCELLENT",
            FitBand::Good => "GOOD",
            FitBand::Moderate => "MODERATE",
            FitBand::Low => "LOW",
        }
    }

    fn headline(&self) -> &'static str {
        match self {
            FitBand::Excellent => "[EXCELLENT] You meet most requirements.",
            FitBand::Good => "[GOOD] Consider strengthening a few areas.",
            FitBand::Moderate => "[MODERATE] Significant skill gaps to address.",
            FitBand::Low => "[LOW] Major skill development needed.",
        }
    }
}

/// Ordered advice: one headline, then priority and bonus skill lines when
/// applicable, then two lines of general advice. Never empty.
pub fn generate_recommendations<S: AsRef<str>>(
    missing_required: &[S],
    missing_preferred: &[S],
    job_fit_score: f64,
) -> Vec<String> {
    let mut recommendations = vec![FitBand::from_score(job_fit_score).headline().to_string()];

    if !missing_required.is_empty() {
        recommendations.push(format!(
            "[PRIORITY] Learn these required skills - {}",
            join_first(missing_required, MAX_PRIORITY_SKILLS)
        ));
    }

    if !missing_preferred.is_empty() && job_fit_score < BONUS_SCORE_CEILING {
        recommendations.push(format!(
            "[BONUS] Consider learning - {}",
            join_first(missing_preferred, MAX_BONUS_SKILLS)
        ));
    }

    let advice: [&str; 2] = if job_fit_score < 50.0 {
        [
            "[ADVICE] Take online courses or certifications in missing skills",
            "[ADVICE] Consider entry-level or junior positions to build experience",
        ]
    } else if job_fit_score < 70.0 {
        [
            "[ADVICE] Build projects showcasing the missing skills",
            "[ADVICE] Network with professionals in this field",
        ]
    } else {
        [
            "[ADVICE] Highlight your matching skills prominently in your resume",
            "[ADVICE] Prepare to discuss your relevant experience in interviews",
        ]
    };
    recommendations.extend(advice.iter().map(|line| line.to_string()));

    recommendations
}

fn join_first<S: AsRef<str>>(skills: &[S], limit: usize) -> String {
    skills
        .iter()
        .take(limit)
        .map(|skill| skill.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

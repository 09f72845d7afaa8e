//! Built-in job roles and job definition files

use crate::error::{Result, SkillGapError};
use crate::processing::models::JobRequirement;
use anyhow::Context;
use log::info;
use serde::Deserialize;
use std::path::Path;

struct RoleTemplate {
    title: &'static str,
    required: &'static [&'static str],
    preferred: &'static [&'static str],
    min_experience: f64,
}

const BUILTIN_ROLES: &[RoleTemplate] = &[
    RoleTemplate {
        title: "Data Scientist",
        required: &[
            "Python",
            "Machine Learning",
            "Statistics",
            "Pandas",
            "NumPy",
            "Scikit-learn",
            "SQL",
            "Data Visualization",
            "Deep Learning",
        ],
        preferred: &["TensorFlow", "PyTorch", "AWS", "Docker", "Spark", "NLP", "Computer Vision"],
        min_experience: 2.0,
    },
    RoleTemplate {
        title: "Full Stack Developer",
        required: &[
            "JavaScript",
            "React",
            "Node.js",
            "HTML",
            "CSS",
            "REST API",
            "Git",
            "SQL",
            "MongoDB",
        ],
        preferred: &["TypeScript", "Next.js", "Docker", "AWS", "GraphQL", "Redis", "CI/CD"],
        min_experience: 2.0,
    },
    RoleTemplate {
        title: "Machine Learning Engineer",
        required: &[
            "Python",
            "Machine Learning",
            "Deep Learning",
            "TensorFlow",
            "PyTorch",
            "Model Deployment",
            "Docker",
            "Git",
            "Linux",
        ],
        preferred: &["Kubernetes", "MLOps", "AWS", "FastAPI", "Spark", "Airflow", "CI/CD"],
        min_experience: 3.0,
    },
    RoleTemplate {
        title: "Backend Developer",
        required: &[
            "Python",
            "FastAPI",
            "Django",
            "REST API",
            "SQL",
            "PostgreSQL",
            "Git",
            "Docker",
            "Testing",
        ],
        preferred: &["Redis", "Celery", "Kubernetes", "AWS", "Microservices", "GraphQL"],
        min_experience: 2.0,
    },
    RoleTemplate {
        title: "DevOps Engineer",
        required: &[
            "Docker",
            "Kubernetes",
            "CI/CD",
            "Linux",
            "Git",
            "AWS",
            "Terraform",
            "Monitoring",
            "Scripting",
        ],
        preferred: &["Ansible", "Jenkins", "Prometheus", "Grafana", "Python", "Helm"],
        min_experience: 3.0,
    },
];

impl RoleTemplate {
    fn to_requirement(&self) -> JobRequirement {
        let mut job = JobRequirement::new(self.title, to_strings(self.required))
            .with_preferred(to_strings(self.preferred));
        job.min_experience = Some(self.min_experience);
        job
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The five sample roles, in catalog order.
pub fn builtin_roles() -> Vec<JobRequirement> {
    BUILTIN_ROLES.iter().map(RoleTemplate::to_requirement).collect()
}

/// Case-insensitive lookup by job title among `jobs`.
pub fn find_role<'a>(jobs: &'a [JobRequirement], title: &str) -> Option<&'a JobRequirement> {
    let wanted = title.trim().to_lowercase();
    jobs.iter().find(|job| job.job_title.to_lowercase() == wanted)
}

/// Like [`find_role`], but an unknown title is an `InvalidInput` error that
/// lists the available roles.
pub fn require_role(jobs: &[JobRequirement], title: &str) -> Result<JobRequirement> {
    find_role(jobs, title).cloned().ok_or_else(|| {
        let available: Vec<&str> = jobs.iter().map(|job| job.job_title.as_str()).collect();
        SkillGapError::InvalidInput(format!("Unknown role: {}. Available: {}", title, available.join(", ")))
    })
}

#[derive(Deserialize)]
struct JobFile {
    jobs: Vec<JobRequirement>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonJobs {
    List(Vec<JobRequirement>),
    Wrapped(JobFile),
}

/// Load job requirements from a TOML (`[[jobs]]`) or JSON file. Every job is
/// validated before it is returned.
pub fn load_jobs_file(path: &Path) -> Result<Vec<JobRequirement>> {
    let jobs = read_jobs(path)?;

    if jobs.is_empty() {
        return Err(SkillGapError::EmptyInput(format!(
            "No jobs defined in {}",
            path.display()
        )));
    }
    for job in &jobs {
        job.validate()?;
    }

    info!("Loaded {} jobs from {}", jobs.len(), path.display());
    Ok(jobs)
}

fn read_jobs(path: &Path) -> anyhow::Result<Vec<JobRequirement>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read jobs file {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    if extension == "json" {
        let parsed: JsonJobs = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON job definitions in {}", path.display()))?;
        Ok(match parsed {
            JsonJobs::List(jobs) => jobs,
            JsonJobs::Wrapped(file) => file.jobs,
        })
    } else {
        let parsed: JobFile = toml::from_str(&content)
            .with_context(|| format!("Invalid TOML job definitions in {}", path.display()))?;
        Ok(parsed.jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_builtin_roles() {
        let roles = builtin_roles();
        assert_eq!(roles.len(), 5);
        assert_eq!(roles[0].job_title, "Data Scientist");
        assert!(roles.iter().all(|job| job.validate().is_ok()));
        assert!(roles.iter().all(|job| job.required_skills.len() == 9));

        let devops = find_role(&roles, "devops engineer").unwrap();
        assert_eq!(devops.min_experience, Some(3.0));
        assert!(devops.preferred().contains(&"Helm".to_string()));
        assert!(find_role(&roles, "Astronaut").is_none());
    }

    #[test]
    fn test_require_role() {
        let roles = builtin_roles();
        assert_eq!(require_role(&roles, " backend developer ").unwrap().job_title, "Backend Developer");

        let err = require_role(&roles, "Astronaut").unwrap_err();
        assert!(err.is_client_error());
        assert!(matches!(err, SkillGapError::InvalidInput(ref m)
            if m.contains("Unknown role: Astronaut") && m.contains("DevOps Engineer")));
    }

    #[test]
    fn test_load_toml_jobs() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[[jobs]]
job_title = "Data Engineer"
required_skills = ["Python", "SQL", "Spark"]
preferred_skills = ["Airflow"]
min_experience = 2.0

[[jobs]]
job_title = "Frontend Developer"
required_skills = ["JavaScript", "React"]
"#
        )
        .unwrap();

        let jobs = load_jobs_file(file.path()).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].preferred(), ["Airflow".to_string()]);
        assert!(jobs[1].preferred_skills.is_none());
    }

    #[test]
    fn test_load_json_jobs_both_shapes() {
        let mut list = Builder::new().suffix(".json").tempfile().unwrap();
        write!(list, r#"[{{"job_title": "Analyst", "required_skills": ["SQL"]}}]"#).unwrap();
        assert_eq!(load_jobs_file(list.path()).unwrap()[0].job_title, "Analyst");

        let mut wrapped = Builder::new().suffix(".json").tempfile().unwrap();
        write!(wrapped, r#"{{"jobs": [{{"job_title": "SRE", "required_skills": ["Linux"]}}]}}"#).unwrap();
        assert_eq!(load_jobs_file(wrapped.path()).unwrap()[0].job_title, "SRE");
    }

    #[test]
    fn test_invalid_job_files() {
        let mut empty_required = Builder::new().suffix(".json").tempfile().unwrap();
        write!(empty_required, r#"[{{"job_title": "Analyst", "required_skills": []}}]"#).unwrap();
        assert!(matches!(
            load_jobs_file(empty_required.path()),
            Err(SkillGapError::InvalidInput(_))
        ));

        let mut no_jobs = Builder::new().suffix(".json").tempfile().unwrap();
        write!(no_jobs, "[]").unwrap();
        assert!(matches!(load_jobs_file(no_jobs.path()), Err(SkillGapError::EmptyInput(_))));

        let mut garbage = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(garbage, "not = [valid").unwrap();
        assert!(matches!(load_jobs_file(garbage.path()), Err(SkillGapError::InvalidInput(_))));

        assert!(load_jobs_file(Path::new("/no/such/jobs.toml")).is_err());
    }
}

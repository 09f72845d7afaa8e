//! Integration tests for the skill gap analyzer

use skill_gap::input::InputManager;
use skill_gap::output::report::{MatchReport, Report};
use skill_gap::output::ReportGenerator;
use clap::Parser;
use skill_gap::cli::{self, Cli, Commands};
use skill_gap::config::OutputFormat;
use skill_gap::processing::catalog::{builtin_roles, find_role, require_role};
use skill_gap::processing::models::DegreeLabel;
use skill_gap::processing::{analyze_skill_gap, generate_recommendations, rank_jobs, ResumeExtractor};
use skill_gap::SkillGapError;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

const RESUME_PARAGRAPHS: &[&str] = &[
    "Arjun Mehta",
    "arjun.mehta@example.org",
    "+91 9812345678",
    "",
    "SKILLS",
    "Python, Pandas, NumPy, SQL",
    "Machine Learning | Statistics | Data Visualization",
    "",
    "WORK EXPERIENCE",
    "Data Analyst at Insight Works (2020-2023)",
    "Built dashboards with Matplotlib &amp; Jupyter.",
    "",
    "EDUCATION",
    "B.Tech IT, Pune University, 2020, 78%",
    "",
    "3 years of experience in analytics.",
];

fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|text| {
            if text.is_empty() {
                "<w:p/>".to_string()
            } else {
                format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", text)
            }
        })
        .collect();
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body>{}</w:body></w:document>",
        body
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

#[tokio::test]
async fn test_docx_extraction_and_profile() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "arjun.docx", &docx_bytes(RESUME_PARAGRAPHS));

    let mut manager = InputManager::new();
    let text = manager.extract_text(&path).await.unwrap();
    assert!(text.starts_with("Arjun Mehta"));
    assert!(text.contains("Matplotlib & Jupyter"));

    let profile = ResumeExtractor::new().parse_resume_full(&text, "arjun.docx");

    assert_eq!(profile.name.as_deref(), Some("Arjun Mehta"));
    assert_eq!(profile.email.as_deref(), Some("arjun.mehta@example.org"));
    assert_eq!(profile.phone.as_deref(), Some("9812345678"));
    assert_eq!(profile.experience_years, Some(3.0));

    for skill in ["Python", "Pandas", "NumPy", "SQL", "Machine Learning", "Statistics", "Matplotlib", "Jupyter"] {
        assert!(profile.skills.contains(&skill.to_string()), "missing {}", skill);
    }

    assert_eq!(profile.work_experience.len(), 1);
    assert_eq!(profile.work_experience[0].company, "Insight Works");
    assert_eq!(profile.education[0].degree, DegreeLabel::BTech);
    assert_eq!(profile.education[0].year.as_deref(), Some("2020"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "cached.docx", &docx_bytes(&["Jane Doe", "Python"]));

    let mut manager = InputManager::new();
    let text1 = manager.extract_text(&path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(&path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_empty_file_is_client_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "empty.pdf", b"");

    let err = InputManager::new().extract_text(&path).await.unwrap_err();
    assert!(matches!(err, SkillGapError::EmptyInput(_)));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "resume.txt", b"Jane Doe\nPython");

    let err = InputManager::new().extract_text(&path).await.unwrap_err();
    assert!(err.is_client_error());
    assert!(matches!(err, SkillGapError::UnsupportedFormat(ref m) if m.contains("txt")));
}

#[tokio::test]
async fn test_corrupt_docx_is_client_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "broken.docx", b"PK not really a zip");

    let err = InputManager::new().extract_text(&path).await.unwrap_err();
    assert!(matches!(err, SkillGapError::DocxExtraction(_)));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nonexistent.pdf")).await;
    assert!(matches!(result, Err(SkillGapError::InvalidInput(_))));
}

#[test]
fn test_profile_to_ranking_pipeline() {
    let text = RESUME_PARAGRAPHS.join("\n").replace("&amp;", "&");
    let profile = ResumeExtractor::new().parse_resume_full(&text, "arjun.txt");

    let rankings = rank_jobs(&profile.skills, &builtin_roles());
    assert_eq!(rankings.len(), 5);
    assert_eq!(rankings[0].job_title, "Data Scientist");
    assert!(rankings.windows(2).all(|pair| pair[0].fit_score >= pair[1].fit_score));

    let roles = builtin_roles();
    let data_scientist = find_role(&roles, "Data Scientist").unwrap();
    let result = analyze_skill_gap(
        &profile.skills,
        &data_scientist.required_skills,
        data_scientist.preferred(),
    );
    assert!(result.missing_required.contains(&"deep learning".to_string()));
    assert!(result.matching_required.contains(&"python".to_string()));

    let recommendations =
        generate_recommendations(&result.missing_required, &result.missing_preferred, result.job_fit_score);
    assert!(recommendations[1].starts_with("[PRIORITY]"));

    let report = Report::Match(MatchReport::new("arjun.txt", data_scientist, result));
    let json = ReportGenerator::new().generate_report(&report, &OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["job_title"], "Data Scientist");
}

#[test]
fn test_match_boundary_rejects_bad_input() {
    let cli = Cli::try_parse_from(["skill-gap", "match", "--skills", " , ;", "--role", "Astronaut"]).unwrap();
    let Commands::Match { source, role, .. } = cli.command else {
        panic!("expected match command");
    };

    let err = cli::require_skills(source.skills.as_deref().unwrap_or_default(), "Skills input").unwrap_err();
    assert!(matches!(err, SkillGapError::InvalidInput(_)));
    assert_eq!(err.exit_code(), 2);

    let err = require_role(&builtin_roles(), role.as_deref().unwrap()).unwrap_err();
    assert!(err.to_string().contains("Unknown role: Astronaut"));
    assert_eq!(err.exit_code(), 2);

    let server_side = SkillGapError::Configuration("unreadable config".to_string());
    assert_eq!(server_side.exit_code(), 1);
}

#[test]
fn test_match_with_typed_skills_and_overlap() {
    let cli = Cli::try_parse_from([
        "skill-gap", "match", "--skills", "Python; SQL", "--required", "Python,Docker", "--preferred", "SQL",
    ])
    .unwrap();
    let Commands::Match { source, required, preferred, title, .. } = cli.command else {
        panic!("expected match command");
    };
    assert_eq!(title, "Custom Role");

    let skills = cli::require_skills(source.skills.as_deref().unwrap(), "Skills input").unwrap();
    let job = skill_gap::processing::JobRequirement::new(
        title,
        cli::require_skills(required.as_deref().unwrap(), "Required skills").unwrap(),
    )
    .with_preferred(cli::parse_skills_input(preferred.as_deref().unwrap()));
    job.validate().unwrap();

    let analyzer = skill_gap::processing::GapAnalyzer::default();
    let result = analyzer.analyze_skill_gap(&skills, &job.required_skills, job.preferred());
    let overlap = analyzer.skill_overlap(&skills, &job);
    assert_eq!(overlap.match_count, 2);

    let report = Report::Match(MatchReport::new("skills input", &job, result).with_overlap(overlap));
    let markdown = ReportGenerator::new().generate_report(&report, &OutputFormat::Markdown).unwrap();
    assert!(markdown.contains("| Skill Overlap | 66.67% (2 of 3) |"));
}

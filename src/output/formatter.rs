//! Output formatters for profile, match and ranking reports

use crate::config::OutputFormat;
use crate::error::{Result, SkillGapError};
use crate::output::report::{MatchReport, ProfileReport, RankingReport, Report, ReportMetadata};
use crate::processing::recommendations::FitBand;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting reports
pub trait OutputFormatter {
    fn format_report(&self, report: &Report) -> Result<String>;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and API integration
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that dispatches to the configured formatter
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let band = FitBand::from_score(score);
        let color = match band {
            FitBand::Excellent => Color::Green,
            FitBand::Good => Color::Yellow,
            FitBand::Moderate => Color::BrightYellow,
            FitBand::Low => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", band.label().color(color).bold())
        } else {
            format!("[{}]", band.label())
        }
    }

    fn format_list(&self, items: &[String], color: Color) -> String {
        if items.is_empty() {
            return "  (none)\n".to_string();
        }
        items
            .iter()
            .map(|item| format!("  • {}\n", self.colorize(item, color)))
            .collect()
    }

    fn format_metadata(&self, metadata: &ReportMetadata) -> String {
        format!(
            "Generated: {} | Source: {}\n",
            metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            metadata.source
        )
    }

    fn format_profile(&self, report: &ProfileReport) -> String {
        let profile = &report.profile;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME PROFILE", 1));
        output.push_str(&self.format_metadata(&report.metadata));

        output.push_str(&self.format_header("Contact", 2));
        output.push_str(&format!("Name:  {}\n", profile.name.as_deref().unwrap_or("-")));
        output.push_str(&format!("Email: {}\n", profile.email.as_deref().unwrap_or("-")));
        output.push_str(&format!("Phone: {}\n", profile.phone.as_deref().unwrap_or("-")));
        if let Some(years) = profile.experience_years {
            output.push_str(&format!("Experience: {} years\n", years));
        }

        output.push_str(&self.format_header(&format!("Skills ({})", report.total_skills_found), 2));
        output.push_str(&self.format_list(&profile.skills, Color::Cyan));

        output.push_str(&self.format_header("Education", 2));
        if profile.education.is_empty() {
            output.push_str("  (none)\n");
        }
        for entry in &profile.education {
            output.push_str(&format!("  • {}", self.colorize(entry.degree.as_str(), Color::Cyan)));
            if let Some(institution) = &entry.institution {
                output.push_str(&format!(", {}", institution));
            }
            if let Some(year) = &entry.year {
                output.push_str(&format!(" ({})", year));
            }
            if let Some(score) = &entry.score {
                output.push_str(&format!(" - {}", score));
            }
            output.push('\n');
        }

        output.push_str(&self.format_header("Work Experience", 2));
        if profile.work_experience.is_empty() {
            output.push_str("  (none)\n");
        }
        for entry in &profile.work_experience {
            output.push_str(&format!(
                "  • {} at {} ({})\n",
                self.colorize(&entry.title, Color::Cyan),
                entry.company,
                entry.duration
            ));
        }

        if self.detailed {
            output.push_str(&self.format_header("Text Preview", 3));
            output.push_str(&report.text_preview());
            output.push('\n');
        }

        output
    }

    fn format_match(&self, report: &MatchReport) -> String {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str(&self.format_header(&format!("SKILL GAP ANALYSIS: {}", report.job_title), 1));
        output.push_str(&self.format_metadata(&report.metadata));

        output.push_str(&format!(
            "\nJob Fit Score: {:.2}% {}\n",
            analysis.job_fit_score,
            self.format_score_badge(analysis.job_fit_score)
        ));
        output.push_str(&format!("Similarity:    {:.2}%\n", analysis.similarity_score * 100.0));
        output.push_str(&format!(
            "Required Match: {:.2}%\n",
            report.details.required_match_percentage
        ));
        if let Some(overlap) = &report.skill_overlap {
            output.push_str(&format!(
                "Skill Overlap:  {:.2}% ({} of {} unique skills)\n",
                overlap.overlap_ratio * 100.0,
                overlap.match_count,
                overlap.total_unique
            ));
        }

        output.push_str(&self.format_header(&format!("Matching Skills ({})", analysis.matching_skills.len()), 2));
        output.push_str(&self.format_list(&analysis.matching_skills, Color::Green));

        output.push_str(&self.format_header(&format!("Missing Required Skills ({})", analysis.missing_skills.len()), 2));
        output.push_str(&self.format_list(&analysis.missing_skills, Color::Red));

        if self.detailed {
            output.push_str(&self.format_header("Missing Preferred Skills", 3));
            output.push_str(&self.format_list(&report.details.missing_preferred, Color::Yellow));

            output.push_str(&self.format_header("Additional Skills", 3));
            output.push_str(&self.format_list(&analysis.additional_skills, Color::Blue));
        }

        output.push_str(&self.format_header("Recommendations", 2));
        for (i, recommendation) in analysis.recommendations.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, recommendation));
        }

        output
    }

    fn format_ranking(&self, report: &RankingReport) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header("JOB RANKING", 1));
        output.push_str(&self.format_metadata(&report.metadata));
        output.push_str(&format!("Jobs analyzed: {}\n\n", report.total_jobs_analyzed));

        output.push_str(&format!(
            "{:<4} {:<30} {:>9} {:>11} {:>10} {:>8} {:>8}\n",
            "#", "Job Title", "Fit", "Similarity", "Required", "Matched", "Missing"
        ));
        for (i, ranking) in report.results.iter().enumerate() {
            output.push_str(&format!(
                "{:<4} {:<30} {:>8.2}% {:>10.2}% {:>9.2}% {:>8} {:>8}\n",
                i + 1,
                ranking.job_title,
                ranking.fit_score,
                ranking.similarity_score * 100.0,
                ranking.required_match_percentage,
                ranking.skills_matched,
                ranking.missing_required_count
            ));
        }

        if let Some(best) = report.best_match() {
            output.push_str(&format!(
                "\nBest match: {} ({:.2}%) {}\n",
                self.colorize(&best.job_title, Color::Green),
                best.fit_score,
                self.format_score_badge(best.fit_score)
            ));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        Ok(match report {
            Report::Profile(profile) => self.format_profile(profile),
            Report::Match(analysis) => self.format_match(analysis),
            Report::Ranking(ranking) => self.format_ranking(ranking),
        })
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn metadata_line(&self, metadata: &ReportMetadata) -> String {
        if !self.include_metadata {
            return String::new();
        }
        format!(
            "**Generated:** {} | **Source:** `{}` | **Version:** {}\n\n",
            metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            metadata.source,
            metadata.tool_version
        )
    }

    fn bullet_list(items: &[String]) -> String {
        if items.is_empty() {
            return "_None_\n".to_string();
        }
        items.iter().map(|item| format!("- {}\n", item)).collect()
    }

    fn format_profile(&self, report: &ProfileReport) -> String {
        let profile = &report.profile;
        let mut output = String::from("# Resume Profile\n\n");
        output.push_str(&self.metadata_line(&report.metadata));

        output.push_str("## Contact\n\n");
        output.push_str(&format!("- **Name:** {}\n", profile.name.as_deref().unwrap_or("-")));
        output.push_str(&format!("- **Email:** {}\n", profile.email.as_deref().unwrap_or("-")));
        output.push_str(&format!("- **Phone:** {}\n", profile.phone.as_deref().unwrap_or("-")));
        if let Some(years) = profile.experience_years {
            output.push_str(&format!("- **Experience:** {} years\n", years));
        }

        output.push_str(&format!("\n## Skills ({})\n\n", report.total_skills_found));
        output.push_str(&Self::bullet_list(&profile.skills));

        output.push_str("\n## Education\n\n");
        if profile.education.is_empty() {
            output.push_str("_None_\n");
        } else {
            output.push_str("| Degree | Institution | Year | Score |\n");
            output.push_str("|--------|-------------|------|-------|\n");
            for entry in &profile.education {
                output.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    entry.degree,
                    entry.institution.as_deref().unwrap_or("-"),
                    entry.year.as_deref().unwrap_or("-"),
                    entry.score.as_deref().unwrap_or("-")
                ));
            }
        }

        output.push_str("\n## Work Experience\n\n");
        if profile.work_experience.is_empty() {
            output.push_str("_None_\n");
        }
        for entry in &profile.work_experience {
            output.push_str(&format!("- **{}** at {} ({})\n", entry.title, entry.company, entry.duration));
        }

        output.push_str("\n## Text Preview\n\n```\n");
        output.push_str(&report.text_preview());
        output.push_str("\n```\n");

        output
    }

    fn format_match(&self, report: &MatchReport) -> String {
        let analysis = &report.analysis;
        let mut output = format!("# Skill Gap Analysis: {}\n\n", report.job_title);
        output.push_str(&self.metadata_line(&report.metadata));

        output.push_str("| Metric | Value |\n|--------|-------|\n");
        output.push_str(&format!(
            "| Job Fit Score | {:.2}% ({}) |\n",
            analysis.job_fit_score,
            FitBand::from_score(analysis.job_fit_score).label()
        ));
        output.push_str(&format!("| Similarity | {:.2}% |\n", analysis.similarity_score * 100.0));
        output.push_str(&format!(
            "| Required Match | {:.2}% |\n",
            report.details.required_match_percentage
        ));
        if let Some(overlap) = &report.skill_overlap {
            output.push_str(&format!(
                "| Skill Overlap | {:.2}% ({} of {}) |\n",
                overlap.overlap_ratio * 100.0,
                overlap.match_count,
                overlap.total_unique
            ));
        }

        output.push_str("\n## Matching Skills\n\n");
        output.push_str(&Self::bullet_list(&analysis.matching_skills));
        output.push_str("\n## Missing Required Skills\n\n");
        output.push_str(&Self::bullet_list(&analysis.missing_skills));
        output.push_str("\n## Missing Preferred Skills\n\n");
        output.push_str(&Self::bullet_list(&report.details.missing_preferred));
        output.push_str("\n## Additional Skills\n\n");
        output.push_str(&Self::bullet_list(&analysis.additional_skills));

        output.push_str("\n## Recommendations\n\n");
        for (i, recommendation) in analysis.recommendations.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, recommendation));
        }

        output
    }

    fn format_ranking(&self, report: &RankingReport) -> String {
        let mut output = String::from("# Job Ranking\n\n");
        output.push_str(&self.metadata_line(&report.metadata));
        output.push_str(&format!("**Jobs analyzed:** {}\n\n", report.total_jobs_analyzed));

        output.push_str("| Rank | Job Title | Fit Score | Similarity | Required Match | Skills Matched | Missing Required |\n");
        output.push_str("|------|-----------|-----------|------------|----------------|----------------|------------------|\n");
        for (i, ranking) in report.results.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {:.2}% | {:.2}% | {:.2}% | {} | {} |\n",
                i + 1,
                ranking.job_title,
                ranking.fit_score,
                ranking.similarity_score * 100.0,
                ranking.required_match_percentage,
                ranking.skills_matched,
                ranking.missing_required_count
            ));
        }

        if let Some(best) = report.best_match() {
            output.push_str(&format!("\n**Best match:** {} ({:.2}%)\n", best.job_title, best.fit_score));
        }

        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        Ok(match report {
            Report::Profile(profile) => self.format_profile(profile),
            Report::Match(analysis) => self.format_match(analysis),
            Report::Ranking(ranking) => self.format_ranking(ranking),
        })
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &Report, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    let write = || -> std::io::Result<()> {
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(file_path, content)
    };

    write().map_err(|e| {
        SkillGapError::OutputFormatting(format!("Failed to save report to {}: {}", file_path.display(), e))
    })
}

pub fn suggest_filename(format: &OutputFormat, source_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(source_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_skill_gap{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_skill_gap{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_skill_gap{}.md", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::gap_analyzer::{analyze_skill_gap, GapAnalyzer};
    use crate::processing::models::JobRequirement;
    use crate::processing::ranker::rank_jobs;

    fn sample_match() -> Report {
        let job = JobRequirement::new("Backend Developer", vec!["Python".to_string(), "Docker".to_string()]);
        let result = analyze_skill_gap(&["Python", "Git"], &["Python", "Docker"], &[]);
        let overlap = GapAnalyzer::default().skill_overlap(&["Python", "Git"], &job);
        Report::Match(MatchReport::new("skills input", &job, result).with_overlap(overlap))
    }

    #[test]
    fn test_console_match_without_colors() {
        let formatter = ConsoleFormatter::new(false, true);
        let output = formatter.format_report(&sample_match()).unwrap();

        assert!(output.contains("SKILL GAP ANALYSIS: Backend Developer"));
        assert!(output.contains("• docker"));
        assert!(output.contains("[PRIORITY] Learn these required skills - docker"));
        assert!(output.contains("Additional Skills"));
        assert!(output.contains("Skill Overlap:  33.33% (1 of 3 unique skills)"));
    }

    #[test]
    fn test_json_output_is_parseable() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format_report(&sample_match()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["job_title"], "Backend Developer");
        assert_eq!(value["status"], "success");
        assert!(value["analysis"]["recommendations"].is_array());
    }

    #[test]
    fn test_markdown_ranking() {
        let jobs = vec![
            JobRequirement::new("Data Engineer", vec!["Python".to_string(), "SQL".to_string()]),
            JobRequirement::new("Designer", vec!["Figma".to_string()]),
        ];
        let report = Report::Ranking(RankingReport::new("skills input", rank_jobs(&["Python", "SQL"], &jobs)));
        let output = MarkdownFormatter::new(false).format_report(&report).unwrap();

        assert!(output.starts_with("# Job Ranking"));
        assert!(output.contains("| 1 | Data Engineer |"));
        assert!(output.contains("**Best match:** Data Engineer"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false, true, false);
        let report = sample_match();

        assert!(generator.generate_report(&report, &OutputFormat::Json).unwrap().starts_with('{'));
        assert!(generator
            .generate_report(&report, &OutputFormat::Markdown)
            .unwrap()
            .starts_with("# Skill Gap Analysis"));
    }

    #[test]
    fn test_save_report_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reports").join("match.md");

        save_report_to_file("# Report", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Report");
    }

    #[test]
    fn test_save_failure_is_output_error() {
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let path = blocker.path().join("report.json");

        let err = save_report_to_file("{}", &path).unwrap_err();
        assert!(matches!(err, SkillGapError::OutputFormatting(ref m) if m.contains("report.json")));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Json, "/tmp/jane_resume.pdf", false),
            "jane_resume_skill_gap.json"
        );
        assert!(suggest_filename(&OutputFormat::Markdown, "cv.docx", true).ends_with(".md"));
    }
}

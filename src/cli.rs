//! CLI interface for the skill gap analyzer

use crate::config::OutputFormat;
use crate::error::{Result, SkillGapError};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skill-gap")]
#[command(about = "Resume skill extraction and job skill-gap analysis")]
#[command(
    long_about = "Extract contact details, skills, education and work history from PDF/DOCX resumes, then score them against job requirements with set overlap and TF-IDF similarity"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a structured profile from a resume
    Parse {
        /// Path to resume file (PDF, DOCX, DOC)
        #[arg(short, long)]
        resume: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Analyze the skill gap between a resume and one job
    Match {
        #[command(flatten)]
        source: SkillSource,

        /// Built-in or job-file role to match against
        #[arg(long, conflicts_with = "required")]
        role: Option<String>,

        /// Job definition file (TOML or JSON) to look the role up in
        #[arg(long, requires = "role")]
        jobs_file: Option<PathBuf>,

        /// Required skills, separated by , ; | or newlines
        #[arg(long)]
        required: Option<String>,

        /// Preferred skills, separated by , ; | or newlines
        #[arg(long, requires = "required")]
        preferred: Option<String>,

        /// Job title used with --required
        #[arg(long, default_value = "Custom Role")]
        title: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Rank a resume against several jobs
    Rank {
        #[command(flatten)]
        source: SkillSource,

        /// Job definition file (TOML or JSON); defaults to the built-in roles
        #[arg(long)]
        jobs_file: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the built-in job roles
    Roles,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

/// Where the candidate's skills come from
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct SkillSource {
    /// Path to resume file (PDF, DOCX, DOC)
    #[arg(short, long)]
    pub resume: Option<PathBuf>,

    /// Skills typed directly, separated by , ; | or newlines
    #[arg(long)]
    pub skills: Option<String>,
}

#[derive(Args)]
pub struct OutputArgs {
    /// Output format: console, json, markdown (defaults to the config value)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Show additional sections in console output
    #[arg(short, long)]
    pub detailed: bool,

    /// Save output to file; a directory gets a generated file name
    #[arg(short, long)]
    pub save: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> std::result::Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Split free-form skill input on `, ; | newline`, trimming and dropping
/// empty items.
pub fn parse_skills_input(skills_text: &str) -> Vec<String> {
    skills_text
        .split([',', ';', '\n', '|'])
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

/// [`parse_skills_input`] for a list that must not come out empty. `label`
/// names the input in the error message.
pub fn require_skills(skills_text: &str, label: &str) -> Result<Vec<String>> {
    let skills = parse_skills_input(skills_text);
    if skills.is_empty() {
        return Err(SkillGapError::InvalidInput(format!("{} cannot be empty", label)));
    }
    Ok(skills)
}

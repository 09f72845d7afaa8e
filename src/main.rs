//! skill-gap: resume skill extraction and job skill-gap analysis

use clap::Parser;
use colored::Colorize;
use log::{error, info};
use skill_gap::cli::{self, Cli, Commands, ConfigAction, OutputArgs, SkillSource};
use skill_gap::input::InputManager;
use skill_gap::output::report::{MatchReport, ProfileReport, RankingReport};
use skill_gap::output::{save_report_to_file, suggest_filename, Report, ReportGenerator};
use skill_gap::processing::catalog::{builtin_roles, load_jobs_file, require_role};
use skill_gap::processing::{GapAnalyzer, JobRequirement, ResumeExtractor, ResumeProfile};
use skill_gap::{Config, Result, SkillGapError};
use std::path::Path;
use std::process;

const SKILLS_INPUT_SOURCE: &str = "skills input";

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(e.exit_code());
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Parse { resume, output } => {
            info!("Parsing resume: {}", resume.display());
            let profile = parse_resume_file(&resume, &config).await?;
            let source = profile.filename.clone();

            let report = Report::Profile(ProfileReport::new(profile));
            emit_report(&report, &output, &config, &source)?;
        }

        Commands::Match {
            source,
            role,
            jobs_file,
            required,
            preferred,
            title,
            output,
        } => {
            let (skills, source_name) = resolve_skills(&source, &config).await?;

            let job = match (role, required) {
                (Some(role), _) => require_role(&load_job_set(jobs_file.as_deref())?, &role)?,
                (None, Some(required)) => {
                    let mut job = JobRequirement::new(title, cli::require_skills(&required, "Required skills")?);
                    job.preferred_skills = preferred.as_deref().map(cli::parse_skills_input);
                    job
                }
                (None, None) => {
                    return Err(SkillGapError::InvalidInput(
                        "Specify either --role or --required".to_string(),
                    ));
                }
            };
            job.validate()?;

            info!("Analyzing skill gap for: {}", job.job_title);
            let analyzer = GapAnalyzer::new(config.scoring.clone());
            let result = analyzer.analyze_skill_gap(&skills, &job.required_skills, job.preferred());
            let overlap = analyzer.skill_overlap(&skills, &job);

            let report = Report::Match(MatchReport::new(source_name.clone(), &job, result).with_overlap(overlap));
            emit_report(&report, &output, &config, &source_name)?;
        }

        Commands::Rank {
            source,
            jobs_file,
            output,
        } => {
            let (skills, source_name) = resolve_skills(&source, &config).await?;
            let jobs = load_job_set(jobs_file.as_deref())?;

            let analyzer = GapAnalyzer::new(config.scoring.clone());
            let rankings = analyzer.rank_jobs(&skills, &jobs);

            let report = Report::Ranking(RankingReport::new(source_name.clone(), rankings));
            emit_report(&report, &output, &config, &source_name)?;
        }

        Commands::Roles => {
            println!("{}\n", "Built-in job roles".bold());
            for job in builtin_roles() {
                println!("{}", job.job_title.cyan().bold());
                if let Some(years) = job.min_experience {
                    println!("  Minimum experience: {} years", years);
                }
                println!("  Required:  {}", job.required_skills.join(", "));
                println!("  Preferred: {}\n", job.preferred().join(", "));
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let rendered = toml::to_string_pretty(&config)
                    .map_err(|e| SkillGapError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("Configuration file: {}\n", Config::config_path().display());
                println!("{}", rendered);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save()?;
                println!("Configuration reset to defaults: {}", Config::config_path().display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}

async fn parse_resume_file(path: &Path, config: &Config) -> Result<ResumeProfile> {
    let mut input_manager = InputManager::new();
    let text = input_manager.extract_text(path).await?;

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let extractor = ResumeExtractor::with_config(config.extraction.clone());
    Ok(extractor.parse_resume_full(&text, &filename))
}

/// Candidate skills and a label for where they came from.
async fn resolve_skills(source: &SkillSource, config: &Config) -> Result<(Vec<String>, String)> {
    if let Some(resume) = &source.resume {
        let profile = parse_resume_file(resume, config).await?;
        if profile.skills.is_empty() {
            return Err(SkillGapError::InvalidInput(format!(
                "No skills found in resume: {}",
                profile.filename
            )));
        }
        info!("Found {} skills in {}", profile.skills.len(), profile.filename);
        return Ok((profile.skills, profile.filename));
    }

    let skills = cli::require_skills(source.skills.as_deref().unwrap_or_default(), "Skills input")?;
    Ok((skills, SKILLS_INPUT_SOURCE.to_string()))
}

fn load_job_set(jobs_file: Option<&Path>) -> Result<Vec<JobRequirement>> {
    match jobs_file {
        Some(path) => load_jobs_file(path),
        None => Ok(builtin_roles()),
    }
}

fn emit_report(report: &Report, args: &OutputArgs, config: &Config, source_name: &str) -> Result<()> {
    let format = match &args.output {
        Some(format) => cli::parse_output_format(format).map_err(SkillGapError::InvalidInput)?,
        None => config.output.format,
    };
    let detailed = args.detailed || config.output.detailed;

    let generator = ReportGenerator::with_options(config.output.color_output, detailed, true, true);
    println!("{}", generator.generate_report(report, &format)?);

    if let Some(save) = &args.save {
        let path = if save.is_dir() {
            save.join(suggest_filename(&format, source_name, true))
        } else {
            save.clone()
        };

        let plain = ReportGenerator::with_options(false, detailed, true, true);
        save_report_to_file(&plain.generate_report(report, &format)?, &path)?;
        info!("Report saved to: {}", path.display());
    }

    Ok(())
}

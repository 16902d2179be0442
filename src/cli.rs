// src/cli.rs
use crate::config::AppConfig;
use crate::extraction::ContentLocator;
use crate::pdf_text;
use crate::service::JobFitService;
use crate::types::{ExtractedJobFields, TargetJob};
use crate::web::start_web_server;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "jobfit")]
#[command(about = "Extract job postings and score resumes against them")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// YAML configuration file; defaults are used when it is absent
    #[arg(long, env = "JOBFIT_CONFIG", default_value = "config.yaml", global = true)]
    pub config: PathBuf,

    /// Section of the configuration file to use (local or production)
    #[arg(long, env = "JOBFIT_ENV", default_value = "local", global = true)]
    pub environment: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP API (default)
    Serve,
    /// Fetch a job posting and print the extracted fields
    ExtractUrl { url: String },
    /// Print the job text located in a saved HTML page
    ExtractHtml { file: PathBuf },
    /// Print the normalized text of a resume PDF
    ParseResume { file: PathBuf },
    /// Score a resume against a job description
    Match {
        #[arg(long)]
        resume: PathBuf,
        /// Plain-text job description
        #[arg(long)]
        job: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long)]
        company: String,
    },
    /// Suggest resume improvements, optionally for a target job
    Suggest {
        #[arg(long)]
        resume: PathBuf,
        #[arg(long, requires_all = ["title", "company"])]
        job: Option<PathBuf>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        company: Option<String>,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load_from(&cli.config, &cli.environment)?;
    info!("Configuration environment: {}", cli.environment);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => start_web_server(config).await?,

        Command::ExtractUrl { url } => {
            let service = JobFitService::from_config(&config)?;
            let fields = service.extract_job_from_link(&url).await?;
            print_json(&fields)?;
        }

        Command::ExtractHtml { file } => {
            let html = read_text(&file).await?;
            let text = ContentLocator::new().locate(&html)?;
            println!("{}", text);
        }

        Command::ParseResume { file } => {
            let resume = read_resume(&file, &config).await?;
            println!("{}", resume.text);
            println!();
            println!("Extracted length: {}", resume.length);
        }

        Command::Match {
            resume,
            job,
            title,
            company,
        } => {
            let service = JobFitService::from_config(&config)?;
            let resume = read_resume(&resume, &config).await?;
            let job = ExtractedJobFields {
                title,
                company,
                full_jd: read_text(&job).await?,
                ..Default::default()
            };

            let report = service.analyze_match(&resume.text, &job).await?;
            print_json(&report)?;
        }

        Command::Suggest {
            resume,
            job,
            title,
            company,
        } => {
            let service = JobFitService::from_config(&config)?;
            let resume = read_resume(&resume, &config).await?;

            let target = match job {
                Some(path) => Some(TargetJob {
                    title: title.unwrap_or_default(),
                    company: company.unwrap_or_default(),
                    description: read_text(&path).await?,
                }),
                None => None,
            };

            let suggestions = service
                .resume_suggestions(&resume.text, target.as_ref())
                .await?;
            for (i, suggestion) in suggestions.iter().enumerate() {
                println!("{}. {}", i + 1, suggestion);
            }
        }
    }

    Ok(())
}

async fn read_text(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

async fn read_resume(path: &Path, config: &AppConfig) -> Result<crate::types::ResumeText> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    if bytes.len() > config.limits.max_pdf_bytes {
        anyhow::bail!(
            "{} is {} bytes, the limit is {}",
            path.display(),
            bytes.len(),
            config.limits.max_pdf_bytes
        );
    }

    let resume = pdf_text::extract_resume_text_async(bytes)
        .await
        .with_context(|| format!("Failed to extract text from {}", path.display()))?;
    Ok(resume)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_with_local_config() {
        let cli = Cli::try_parse_from(["jobfit"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.environment, "local");
    }

    #[test]
    fn parses_match_command() {
        let cli = Cli::try_parse_from([
            "jobfit",
            "match",
            "--resume",
            "cv.pdf",
            "--job",
            "job.txt",
            "--title",
            "Data Engineer",
            "--company",
            "Acme",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Match { title, company, .. }) => {
                assert_eq!(title, "Data Engineer");
                assert_eq!(company, "Acme");
            }
            _ => panic!("expected match command"),
        }
    }

    #[test]
    fn suggest_job_requires_title_and_company() {
        let result = Cli::try_parse_from([
            "jobfit", "suggest", "--resume", "cv.pdf", "--job", "job.txt",
        ]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn extract_html_needs_no_model() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("posting.html");
        let body = "Responsibilities include designing data pipelines and mentoring. ".repeat(3);
        let html = format!("<html><body><main>{}</main></body></html>", body);
        std::fs::write(&page, html).unwrap();

        let html = read_text(&page).await.unwrap();
        let text = ContentLocator::new().locate(&html).unwrap();
        assert!(text.starts_with("Responsibilities include"));
    }
}

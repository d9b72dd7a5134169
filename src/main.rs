//! `jobscan` — check job postings for fraud risk.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Evaluate the optional job URL locally ([`urlcheck::evaluate`]).
//! 4. Submit title/company/description to the classification service ([`client`]).
//! 5. Merge both verdicts into a [`models::Record`].
//! 6. Store the record in the capped local history ([`history`]).
//! 7. Render the requested report ([`report`]).
//! 8. Exit `0` (REAL) or `1` (FAKE or suspicious URL).

mod cli;
mod client;
mod config;
mod history;
mod models;
mod report;
mod urlcheck;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cli::{Cli, Command, ReportFormat};
use client::ApiClient;
use config::{load_config, Config};
use history::History;
use models::{Classification, JobPosting, Record};
use urlcheck::UrlStatus;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Check {
            title,
            company,
            description,
            description_file,
            url,
            report,
            pdf,
            no_save,
            quiet,
        } => {
            let description = resolve_description(description, description_file)?;
            let posting = JobPosting {
                title,
                company,
                description,
                url,
            };
            run_check(&config, posting, report, pdf, no_save, quiet).await?;
        }
        Command::Url { url } => run_url(&url),
        Command::History { show, clear } => run_history(&config, show, clear)?,
        Command::Export { index, pdf } => run_export(&config, index, &pdf)?,
        Command::Health => run_health(&config).await?,
    }

    Ok(())
}

async fn run_check(
    config: &Config,
    posting: JobPosting,
    report: ReportFormat,
    pdf: Option<PathBuf>,
    no_save: bool,
    quiet: bool,
) -> Result<()> {
    client::validate(&posting)?;

    // Local URL verdict first; it never depends on the backend.
    let verdict = posting.url.as_deref().and_then(urlcheck::evaluate);

    let api = ApiClient::new(&config.api)?;

    let pb = if !quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message("Checking with classification service...");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let prediction = api.predict(&posting).await;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    // A failed call stores nothing; history only ever holds completed checks.
    let prediction = prediction?;

    let record = Record::new(&posting, prediction, verdict);

    if !no_save {
        let mut history = History::open(config)?;
        history.push(record.clone())?;
    }

    // --pdf implies PDF format
    let report = match &pdf {
        Some(_) => ReportFormat::Pdf,
        None => report,
    };
    let pdf_path = pdf.unwrap_or_else(|| PathBuf::from("jobscan-report.pdf"));

    match report {
        ReportFormat::Terminal => report::terminal::render(&record, quiet)?,
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        ReportFormat::Pdf => report::pdf::render(&record, &pdf_path)?,
    }

    if record.result == Classification::Fake {
        std::process::exit(1);
    }

    Ok(())
}

fn run_url(url: &str) {
    match urlcheck::evaluate(url) {
        Some(verdict) => {
            report::terminal::render_url_verdict(url, &verdict);
            if verdict.status == UrlStatus::Suspicious {
                std::process::exit(1);
            }
        }
        None => eprintln!("No URL provided."),
    }
}

fn run_history(config: &Config, show: Option<usize>, clear: bool) -> Result<()> {
    let mut history = History::open(config)?;

    if clear {
        history.clear()?;
        println!("History cleared.");
        return Ok(());
    }

    if let Some(index) = show {
        let record = history
            .get(index)
            .with_context(|| format!("No history record at index {}", index))?;
        return report::terminal::render(record, false);
    }

    report::terminal::render_history(history.records());
    Ok(())
}

fn run_export(config: &Config, index: usize, pdf: &std::path::Path) -> Result<()> {
    let history = History::open(config)?;
    let record = history
        .get(index)
        .with_context(|| format!("No history record at index {}", index))?;
    report::pdf::render(record, pdf)
}

async fn run_health(config: &Config) -> Result<()> {
    let api = ApiClient::new(&config.api)?;
    match api.health().await {
        Ok(health) => {
            report::terminal::render_health(&health);
            Ok(())
        }
        Err(e) => {
            eprintln!(" {} {:#}", "✗".red(), e);
            std::process::exit(1);
        }
    }
}

fn resolve_description(
    description: Option<String>,
    description_file: Option<PathBuf>,
) -> Result<String> {
    match (description, description_file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read description from {}", path.display())),
        (None, None) => anyhow::bail!("Provide --description or --description-file"),
    }
}

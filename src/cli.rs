use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "jobscan",
    about = "Check job postings for fraud risk with a remote classifier and local URL heuristics",
    version
)]
pub struct Cli {
    /// Config file [default: ./.jobscan/config.toml, fallback ~/.config/jobscan/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a job posting and store the result in history
    Check {
        /// Job title
        #[arg(long)]
        title: String,

        /// Company name
        #[arg(long)]
        company: String,

        /// Job description text
        #[arg(long, conflicts_with = "description_file")]
        description: Option<String>,

        /// Read the job description from a file
        #[arg(long, value_name = "FILE")]
        description_file: Option<PathBuf>,

        /// Job URL / company website (checked locally, never sent to the backend)
        #[arg(long)]
        url: Option<String>,

        /// Report format
        #[arg(long, default_value = "terminal", value_name = "FORMAT")]
        report: ReportFormat,

        /// PDF output path; use without value to default to jobscan-report.pdf
        #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "jobscan-report.pdf")]
        pdf: Option<PathBuf>,

        /// Do not store the result in history
        #[arg(long)]
        no_save: bool,

        /// Only print a one-line summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run only the URL reputation heuristic on a single URL
    Url {
        /// Candidate URL to evaluate
        url: String,
    },

    /// List recent evaluations
    History {
        /// Re-render the record at this index in full
        #[arg(long, value_name = "INDEX", conflicts_with = "clear")]
        show: Option<usize>,

        /// Delete all stored history
        #[arg(long)]
        clear: bool,
    },

    /// Export a stored evaluation as a PDF report
    Export {
        /// History index of the record to export (0 = most recent)
        index: usize,

        /// PDF output path
        #[arg(long, value_name = "FILE", default_value = "jobscan-report.pdf")]
        pdf: PathBuf,
    },

    /// Query classification backend health
    Health,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Pdf,
}

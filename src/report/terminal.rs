use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{Classification, HealthResponse, Record, RiskLevel};
use crate::urlcheck::{UrlStatus, UrlVerdict};

/// Render a full evaluation record to the terminal.
pub fn render(record: &Record, quiet: bool) -> Result<()> {
    if quiet {
        println!(
            "{}  risk: {}  confidence: {:.2}%  url: {}",
            classification_colored(record.result),
            risk_colored(record.risk_level),
            record.confidence,
            record.url_status_label(),
        );
        return Ok(());
    }

    println!("\n {} v{}", "jobscan".bold(), env!("CARGO_PKG_VERSION"));
    println!(
        " {} — {}   [{}]\n",
        record.title.bold(),
        record.company,
        record.time
    );

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "VERDICT".bold());
    println!(
        " │  {:<48} │",
        format!(
            "Final prediction   : {}",
            classification_colored(record.result)
        )
    );
    println!(
        " │  {:<48} │",
        format!(
            "Model prediction   : {}",
            classification_colored(record.model_result)
        )
    );
    println!(
        " │  {:<48} │",
        format!(
            "Confidence         : {:>6.2}%  {}",
            record.confidence,
            confidence_bar(record.confidence)
        )
    );
    println!(
        " │  {:<48} │",
        format!("Risk level         : {}", risk_colored(record.risk_level))
    );
    println!(
        " │  {:<48} │",
        format!("Model version      : {}", record.model_version)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if let Some(warning) = &record.warning {
        println!(" {} {}\n", "[WARNING]".yellow().bold(), warning);
    }

    // URL verification
    match &record.url {
        Some(url) => {
            let status = match record.url_status {
                Some(UrlStatus::Suspicious) => "SUSPICIOUS".red().bold(),
                Some(UrlStatus::Safe) => "SAFE".green().bold(),
                None => "NOT_PROVIDED".dimmed().bold(),
            };
            println!(" URL check: {}  ({})", status, url);
            for reason in &record.url_reasons {
                println!("   {} {}", "•".red(), reason);
            }
            println!();
        }
        None => println!(" URL check: {} (no URL supplied)\n", "NOT_PROVIDED".dimmed()),
    }

    // Red flags from the classifier
    if record.red_flags.is_empty() {
        println!(" {} No suspicious patterns detected\n", "✓".green());
    } else {
        println!(" {} Suspicious red flags found:\n", "[RED FLAGS]".red().bold());
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("#").add_attribute(Attribute::Bold),
                Cell::new("Red flag").add_attribute(Attribute::Bold),
            ]);
        for (i, flag) in record.red_flags.iter().enumerate() {
            table.add_row(vec![
                Cell::new(i + 1).set_alignment(CellAlignment::Right),
                Cell::new(flag).fg(Color::Red),
            ]);
        }
        println!("{}\n", table);
    }

    Ok(())
}

/// Render the outcome of a standalone URL check.
pub fn render_url_verdict(url: &str, verdict: &UrlVerdict) {
    let status = match verdict.status {
        UrlStatus::Suspicious => "SUSPICIOUS".red().bold(),
        UrlStatus::Safe => "SAFE".green().bold(),
    };
    println!("\n {}  {}", status, url);
    for reason in &verdict.reasons {
        println!("   {} {}", "•".yellow(), reason);
    }
    if verdict.reasons.is_empty() {
        println!("   {} no heuristic rules triggered", "✓".green());
    }
    println!();
}

/// Render the stored history as a table, newest first.
pub fn render_history(records: &[Record]) {
    if records.is_empty() {
        println!("No history yet.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Company").add_attribute(Attribute::Bold),
            Cell::new("Result").add_attribute(Attribute::Bold),
            Cell::new("Risk").add_attribute(Attribute::Bold),
            Cell::new("Confidence").add_attribute(Attribute::Bold),
            Cell::new("URL").add_attribute(Attribute::Bold),
            Cell::new("Time").add_attribute(Attribute::Bold),
        ]);

    for (i, record) in records.iter().enumerate() {
        let result_color = match record.result {
            Classification::Fake => Color::Red,
            Classification::Real => Color::Green,
        };
        let risk_color = match record.risk_level {
            RiskLevel::High => Color::Red,
            RiskLevel::Medium => Color::Yellow,
            RiskLevel::Low => Color::Green,
        };
        table.add_row(vec![
            Cell::new(i).set_alignment(CellAlignment::Right),
            Cell::new(&record.title),
            Cell::new(&record.company),
            Cell::new(record.result.to_string()).fg(result_color),
            Cell::new(record.risk_level.to_string()).fg(risk_color),
            Cell::new(format!("{:.2}%", record.confidence)).set_alignment(CellAlignment::Right),
            Cell::new(record.url_status_label()),
            Cell::new(&record.time),
        ]);
    }

    println!("{}", table);
}

/// Render the backend health summary.
pub fn render_health(health: &HealthResponse) {
    let status = if health.status.eq_ignore_ascii_case("ok") {
        health.status.green().bold()
    } else {
        health.status.red().bold()
    };
    println!("\n Backend status : {}", status);
    if let Some(message) = &health.message {
        println!(" Message        : {}", message);
    }
    if let Some(version) = &health.model_version {
        println!(" Model version  : {}", version);
    }
    println!(
        " Model loaded   : {}",
        if health.model_loaded {
            "yes".green()
        } else {
            "no".red()
        }
    );
    println!(
        " Vectorizer     : {}\n",
        if health.vectorizer_loaded {
            "loaded".green()
        } else {
            "missing".red()
        }
    );
}

fn classification_colored(c: Classification) -> ColoredString {
    match c {
        Classification::Fake => "FAKE".red().bold(),
        Classification::Real => "REAL".green().bold(),
    }
}

fn risk_colored(r: RiskLevel) -> ColoredString {
    match r {
        RiskLevel::High => "HIGH".red().bold(),
        RiskLevel::Medium => "MEDIUM".yellow().bold(),
        RiskLevel::Low => "LOW".green().bold(),
    }
}

/// Ten-slot bar, one block per 10% of confidence.
fn confidence_bar(confidence: f64) -> String {
    let filled = ((confidence / 10.0).round() as usize).min(10);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(10 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_bar_bounds() {
        assert_eq!(confidence_bar(0.0), format!("[{}]", "░".repeat(10)));
        assert_eq!(confidence_bar(100.0), format!("[{}]", "█".repeat(10)));
        assert_eq!(confidence_bar(250.0), format!("[{}]", "█".repeat(10)));
    }

    #[test]
    fn test_confidence_bar_rounds() {
        assert_eq!(confidence_bar(87.2), format!("[{}{}]", "█".repeat(9), "░"));
    }
}

//! Markdown report generation
//!
//! The report opens with a title and a run summary, followed by one section
//! per collected page in ranked order. Failed fetches are headed by their URL.

use crate::crawler::{CrawlOutcome, PageRecord};
use crate::output::{OutputError, OutputResult};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Report path used when none is configured: `{domain}_report.md`
pub fn default_report_path(domain: &str) -> PathBuf {
    PathBuf::from(format!("{}_report.md", domain.replace(':', "_")))
}

/// Writes the markdown report of a crawl
///
/// # Arguments
///
/// * `outcome` - The finished (or interrupted) crawl
/// * `config_hash` - Hash of the configuration file, if one was used
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn write_markdown_report(
    outcome: &CrawlOutcome,
    config_hash: Option<&str>,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_report(outcome, config_hash, Utc::now());

    let write = |path: &Path| -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(markdown.as_bytes())?;
        file.flush()
    };

    write(output_path).map_err(|source| OutputError::Write {
        path: output_path.display().to_string(),
        source,
    })?;

    tracing::info!("Saved report to {}", output_path.display());
    Ok(())
}

/// Formats a crawl outcome as markdown
pub fn format_markdown_report(
    outcome: &CrawlOutcome,
    config_hash: Option<&str>,
    generated_at: DateTime<Utc>,
) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Web Scraping Report for {}\n\n", outcome.domain));
    md.push_str(&format!(
        "Generated on {}\n\n",
        generated_at.format("%B %d, %Y")
    ));

    md.push_str("## Summary\n\n");
    md.push_str(&format!("- **Status**: {}\n", outcome.state));
    md.push_str(&format!("- **Pages Collected**: {}\n", outcome.records.len()));
    md.push_str(&format!("- **Fetch Errors**: {}\n", outcome.error_count()));
    md.push_str(&format!(
        "- **Pages Discovered**: {}\n",
        outcome.pages_discovered
    ));
    md.push_str(&format!("- **Pages Visited**: {}\n", outcome.pages_visited));
    md.push_str(&format!(
        "- **Average Relevance**: {:.2}\n",
        average_relevance(&outcome.records)
    ));
    if let Some(hash) = config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    if outcome.records.is_empty() {
        md.push_str("_No pages were collected._\n");
        return md;
    }

    for record in &outcome.records {
        md.push_str("---\n\n");
        format_record(&mut md, record);
    }

    md
}

fn format_record(md: &mut String, record: &PageRecord) {
    let heading = if record.fetch_failed {
        record.url.as_str()
    } else {
        record.title.as_str()
    };

    md.push_str(&format!("## {}\n\n", heading));
    md.push_str(&format!("- **Relevance**: {:.2}\n", record.relevance));
    md.push_str(&format!("- **URL**: <{}>\n\n", record.url));

    if !record.text.is_empty() {
        md.push_str(&record.text);
        md.push_str("\n\n");
    }
}

fn average_relevance(records: &[PageRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(|r| r.relevance).sum::<f64>() / records.len() as f64
}

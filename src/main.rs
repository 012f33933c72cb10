//! SiteSift main entry point
//!
//! This is the command-line interface for the SiteSift crawler.

use anyhow::{Context, Result};
use clap::Parser;
use sitesift::config::{load_config_with_hash, validate, Config};
use sitesift::crawler::crawl;
use sitesift::output::{
    default_report_path, print_statistics, write_markdown_report, CrawlStatistics,
};
use sitesift::url::{crawl_domain, normalize_seed};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

/// SiteSift: a relevance-ranked single-site crawler
///
/// SiteSift explores one website from a start URL, stays on that site's
/// domain, ranks every page it reads by length and keyword density, and
/// writes the pages to a markdown report, most relevant first.
#[derive(Parser, Debug)]
#[command(name = "sitesift")]
#[command(version)]
#[command(about = "A relevance-ranked single-site crawler", long_about = None)]
struct Cli {
    /// Start URL; "https://" is assumed when no scheme is given
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Stop accepting new URLs once this many are known
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Topical keyword (repeatable); replaces the configured keywords
    #[arg(short = 'k', long = "keyword", value_name = "KEYWORD")]
    keywords: Vec<String>,

    /// Delay after each request, in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Where to write the markdown report
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate settings and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let seed = normalize_seed(&cli.url)
        .with_context(|| format!("Invalid start URL '{}'", cli.url))?;
    let domain = crawl_domain(&seed).context("Start URL has no domain")?;

    // Setup logging based on verbosity; dry runs only log to stderr
    let log_path = crawl_log_path(&domain, cli.dry_run);
    setup_logging(cli.verbose, cli.quiet, log_path.as_deref())?;

    let (config, config_hash) = load_configuration(&cli)?;

    let report_path = cli
        .output
        .clone()
        .or_else(|| config.output.report_path.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| default_report_path(&domain));

    if cli.dry_run {
        print_dry_run(&config, &seed, &domain, &report_path);
        return Ok(());
    }

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let outcome = match crawl(&config, &seed, &cancel).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if outcome.is_interrupted() {
        println!("\nStopped by user.");
    } else {
        println!(
            "\nCrawling complete. Processed {} pages.",
            outcome.records.len()
        );
    }

    // The partial collection is still written when interrupted
    write_markdown_report(&outcome, config_hash.as_deref(), &report_path)
        .context("Failed to save report")?;

    if !cli.quiet {
        println!();
        print_statistics(&CrawlStatistics::from_outcome(&outcome));
        println!();
    }
    println!("Report saved to {}", report_path.display());
    if let Some(log_path) = &log_path {
        println!("Log saved to {}", log_path.display());
    }

    if outcome.is_interrupted() {
        std::process::exit(130);
    }

    Ok(())
}

/// Per-crawl log file `{domain}_crawl.log`, or none for a dry run
fn crawl_log_path(domain: &str, dry_run: bool) -> Option<PathBuf> {
    if dry_run {
        return None;
    }
    Some(PathBuf::from(format!("{}_crawl.log", domain.replace(':', "_"))))
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Events go to stderr and, when `log_path` is given, to that file.
fn setup_logging(verbose: u8, quiet: bool, log_path: Option<&Path>) -> Result<()> {
    let directives = if quiet {
        // Only show errors
        "error"
    } else {
        match verbose {
            0 => "sitesift=info,warn",
            1 => "sitesift=debug,info",
            2 => "sitesift=trace,debug",
            _ => "trace",
        }
    };

    let file_layer = match log_path {
        Some(path) => {
            let log_file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(log_file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(directives))
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(())
}

/// Loads the optional config file and applies command-line overrides
fn load_configuration(cli: &Cli) -> Result<(Config, Option<String>)> {
    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.request_delay_ms = delay_ms;
    }
    if !cli.keywords.is_empty() {
        config.relevance.keywords = cli.keywords.clone();
    }

    validate(&config).context("Invalid crawl settings")?;
    Ok((config, config_hash))
}

/// Cancels the crawl on Ctrl-C; the current page finishes first
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::warn!("Interrupt received, stopping after the current page");
                cancel.cancel();
            }
            Err(e) => tracing::error!("Failed to listen for Ctrl-C: {}", e),
        }
    });
}

/// Handles the --dry-run mode: shows what would be crawled
fn print_dry_run(config: &Config, seed: &Url, domain: &str, report_path: &Path) {
    println!("=== SiteSift Dry Run ===\n");

    println!("Target:");
    println!("  Start URL: {}", seed);
    println!("  Domain: {}", domain);

    println!("\nCrawler Configuration:");
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!(
        "  Denied paths ({}): {}",
        config.crawler.denied_paths.len(),
        config.crawler.denied_paths.join(", ")
    );

    println!("\nRelevance:");
    if config.relevance.keywords.is_empty() {
        println!("  Keywords: (none, ranking by content length only)");
    } else {
        println!("  Keywords: {}", config.relevance.keywords.join(", "));
    }

    println!("\nUser Agent:");
    println!(
        "  {}/{}",
        config.user_agent.crawler_name, config.user_agent.crawler_version
    );

    println!("\nOutput:");
    println!("  Report: {}", report_path.display());

    println!("\n✓ Configuration is valid");
}

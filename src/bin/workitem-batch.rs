//! # Work Item Batch CLI
//!
//! Creates the configured child tasks under a parent work item and prints a
//! per-task report.
//!
//! Exit status: `0` all tasks created (or dry run finished), `1` startup or
//! configuration error, `2` parent work item not resolved, `3` at least one
//! task failed.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use workitem_batch::constants::exit_codes;
use workitem_batch::logging::init_logging;
use workitem_batch::orchestration::exit_code_for_error;
use workitem_batch::{run_batch, BatchConfig, BatchReport, RestClientConfig, RestWorkItemClient};

#[derive(Parser, Debug)]
#[command(name = "workitem-batch")]
#[command(about = "Create a standard batch of child tasks under a parent work item")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file path (default: ./workitem-batch.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Parent work item id, overrides the config file and environment
    #[arg(short, long)]
    parent_id: Option<i64>,

    /// Build and log every document without creating anything
    #[arg(long)]
    dry_run: bool,

    /// Number of creation requests in flight at once
    #[arg(long)]
    concurrency: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Failed to load configuration: {e:#}");
            return ExitCode::from(exit_codes::STARTUP_ERROR);
        }
    };

    let client = match RestWorkItemClient::new(RestClientConfig::from(&config)) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("✗ Failed to create client: {e}");
            return ExitCode::from(exit_codes::STARTUP_ERROR);
        }
    };

    info!(
        org_url = %config.org_url,
        parent_id = config.parent_id,
        tasks = config.tasks.len(),
        "workitem-batch starting"
    );

    match run_batch(&client, &config).await {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{json}"),
                    Err(e) => eprintln!("✗ Failed to serialize report: {e}"),
                }
            } else {
                print_report(&report);
            }
            ExitCode::from(report.exit_code())
        }
        Err(e) => {
            eprintln!("✗ {e}");
            ExitCode::from(exit_code_for_error(&e))
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<BatchConfig> {
    let mut config = match &cli.config {
        Some(path) => BatchConfig::load_with_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => BatchConfig::load()?,
    };

    if let Some(parent_id) = cli.parent_id {
        config.parent_id = parent_id;
    }
    if cli.dry_run {
        config.dry_run = true;
    }
    if let Some(concurrency) = cli.concurrency {
        config.max_concurrent_submissions = concurrency;
    }

    config.validate()?;
    Ok(config)
}

fn print_report(report: &BatchReport) {
    println!("Parent item id : {}", report.parent.id);
    println!("  Iteration: {}", report.parent.iteration_path);
    println!("  Area: {}", report.parent.area_path);
    println!("  Project: {}", report.parent.team_project);
    println!();

    for outcome in &report.outcomes {
        match (&outcome.work_item_id, &outcome.error) {
            (Some(id), _) => {
                println!("✓ Task #{} - {}", id, outcome.title);
                if let Some(link) = &outcome.html_link {
                    println!("    {}", link);
                }
            }
            (None, Some(error)) => println!("✗ {} - {}", outcome.title, error),
            (None, None) => println!("• {} ({})", outcome.title, outcome.state),
        }
    }

    println!();
    if report.dry_run {
        println!("Dry run: {} task(s) built, nothing submitted", report.pending_count());
    } else {
        println!(
            "{} created, {} failed",
            report.created_count(),
            report.failed_count()
        );
    }
}

//! gitlab-audit - report direct member grants across a GitLab group tree
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use gitlab_audit::audit::{AuditCoordinator, FilterChain};
use gitlab_audit::config::{AuditConfig, CliArgs};
use gitlab_audit::gitlab::GitlabClient;
use gitlab_audit::progress::{print_header, print_summary, ProgressReporter};
use gitlab_audit::report::StdoutSink;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose);

    // Validate and create config
    let config = AuditConfig::from_args(args).context("Invalid configuration")?;

    // Create tokio runtime
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create async runtime")?;

    runtime.block_on(run_audit(config))
}

async fn run_audit(config: AuditConfig) -> Result<()> {
    let client = GitlabClient::new(&config.base_url, &config.token, config.timeout)
        .context("Failed to initialize GitLab client")?;

    // Exclusion filters are assembled once, before any concurrent work
    let filters = FilterChain::with_excluded_users(&config.excluded_users);

    if config.show_progress {
        print_header(&config.group, &config.base_url, config.concurrency);
    }

    let coordinator = AuditCoordinator::new(
        Arc::new(client),
        filters,
        Arc::new(StdoutSink),
        config.clone(),
    );
    let stats = coordinator.stats();

    // Progress ticker; aborted once the walk resolves
    let progress = if config.show_progress {
        Some(ProgressReporter::new())
    } else {
        None
    };

    let ticker = progress.as_ref().map(|reporter| {
        let reporter = reporter.clone();
        let stats = Arc::clone(&stats);
        tokio::spawn(async move {
            loop {
                reporter.update(&stats);
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
        })
    });

    let result = coordinator.run(&config.group).await;

    if let Some(ticker) = ticker {
        ticker.abort();
    }
    if let Some(reporter) = progress {
        reporter.finish_and_clear();
    }

    let result = result.context("Audit failed")?;

    if config.show_progress {
        print_summary(&result);
    } else {
        info!(duration = ?result.duration, "Audit finished");
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("gitlab_audit=debug,warn")
    } else {
        EnvFilter::new("gitlab_audit=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}

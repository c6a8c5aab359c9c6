use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use t2j_cli::commands::upload;
use t2j_cli::{Cli, Commands, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Per-entry sync progress is logged at info, so that is the default.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Upload(args)) => {
            let config =
                Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
            tracing::debug!(?config, "loaded configuration");

            let report = upload::run(args, &config).await?;

            println!(
                "{} uploaded, {} already logged, {} failed",
                report.uploaded,
                report.skipped,
                report.failed()
            );
            for failure in &report.failures {
                eprintln!(
                    "failed: {} {} ({})",
                    failure.issue_key, failure.description, failure.error
                );
            }
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}

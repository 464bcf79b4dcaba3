use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use price_alert::utils::error::exit_code;
use price_alert::{AppConfig, PriceCheck};

/// Checks one product page and emails an alert when the price is in range.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, env = "PRICE_ALERT_CONFIG", default_value = "config.json")]
    config: PathBuf,

    /// Print the whole price log after appending
    #[arg(long)]
    show_log: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("price_alert=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(usage_exit_code(&e));
        }
    };

    match run(&cli).await {
        Ok(()) => ExitCode::from(exit_code::SUCCESS),
        Err(e) => {
            tracing::error!(error = %e, "Price check failed");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> price_alert::Result<()> {
    tracing::info!(config = %cli.config.display(), "Loading config");
    let config = AppConfig::load(&cli.config)?;

    let check = PriceCheck::from_config(&config)?;
    let outcome = check.run().await?;

    if cli.show_log {
        check.log().write_to(std::io::stdout().lock())?;
    }

    tracing::info!(
        article = %outcome.record.description,
        notified = outcome.notified,
        "End of processing"
    );
    Ok(())
}

/// `--help` and `--version` succeed; bad arguments count as a config error.
fn usage_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        exit_code::CONFIG
    } else {
        exit_code::SUCCESS
    }
}

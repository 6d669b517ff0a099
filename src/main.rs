use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use barowatch::{BarowatchConfig, DarkSkyClient, EvaluationResult, Notifier, PressureMonitor, logging};
use clap::Parser;
use tracing::error;

/// Barometric pressure drop detector
#[derive(Parser)]
#[command(name = "barowatch")]
#[command(author, version, about = "Warns about forecasted barometric pressure drops", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (default: ./barowatch.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the evaluation as JSON
    #[arg(long)]
    json: bool,

    /// Evaluate without publishing to the notification topic
    #[arg(long)]
    no_notify: bool,
}

fn print_report(result: &EvaluationResult) {
    println!("Current Pressure: {:.2}", result.current_pressure);
    println!("{}", result.summary());
    if let Some(warning) = result.warning_message() {
        println!("{warning}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = BarowatchConfig::load_from_path(cli.config.clone())?;

    let level = logging::level_from_verbosity(cli.verbose).unwrap_or(config.logging.level.as_str());
    logging::init(&config.logging, level)?;

    let timeout = Duration::from_secs(config.provider.timeout_seconds);
    let source = DarkSkyClient::from_config(&config).context("Failed to create forecast client")?;

    let notifier = Notifier::from_config(&config.notification, !cli.no_notify, timeout)
        .context("Failed to create notification publisher")?;

    let monitor = PressureMonitor::new(Box::new(source), notifier, config.trend.clone());
    let result = match monitor.run().await {
        Ok(result) => result,
        Err(e) => {
            error!("{}", e.user_message());
            return Err(e.into());
        }
    };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialize evaluation")?
        );
    } else {
        print_report(&result);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from(["barowatch", "--json", "--no-notify", "-vv"]).unwrap();
        assert!(cli.json);
        assert!(cli.no_notify);
        assert_eq!(cli.verbose, 2);
        assert!(cli.config.is_none());

        let cli = Cli::try_parse_from(["barowatch", "-c", "alerts.toml"]).unwrap();
        assert!(!cli.json);
        assert!(!cli.no_notify);
        assert_eq!(cli.config, Some(PathBuf::from("alerts.toml")));
    }
}

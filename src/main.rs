//! Anti-Fraud Console - Main Entry Point

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use antifraud_console::api::{self, Command, Flow, ScoringClient};
use antifraud_console::config::Config;
use antifraud_console::constants::{APP_NAME, APP_VERSION};
use antifraud_console::logic::{render, Session};

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "antifraud_console=info".into());

    // Logs go to stderr, rendered output to stdout
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    init_logging(config.json_logs);

    tracing::info!("{} v{} starting...", APP_NAME, APP_VERSION);
    tracing::info!("Scoring service: {}{}", config.api_base_url, config.api_prefix);
    if config.api_key.is_none() {
        tracing::info!("No API key configured, requests go out unauthenticated");
    }

    let client = ScoringClient::new(config).context("failed to initialise scoring client")?;
    let mut session = Session::new();

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let banner = format!(
        "{} - type 'help' for commands\n\n{}",
        APP_NAME,
        render::vector(session.builder.current_vector())
    );
    stdout.write_all(banner.as_bytes()).await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let result = match line.parse::<Command>() {
            Ok(command) => api::execute(&mut session, &client, command).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(Flow::Continue(output)) => stdout.write_all(output.as_bytes()).await?,
            Ok(Flow::Quit) => break,
            Err(e) => {
                tracing::debug!(error = ?e, "command failed");
                stdout.write_all(api::error_line(&e).as_bytes()).await?
            }
        }
    }

    tracing::info!(
        checked = session.ledger.len(),
        "{} shutting down",
        APP_NAME
    );
    Ok(())
}

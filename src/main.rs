use std::io::{self, BufReader, IsTerminal};

mod auth;
mod config;
mod db;
mod state;
mod ui;

use crate::{config::AppConfig, state::AppState, ui::Shell};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "crypto_login=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    // stdout belongs to the shell
    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .init();
    }

    let config = AppConfig::from_env()?;
    let state = AppState::init(config).await?;
    tracing::info!(
        database = %state.config.database_path.display(),
        "starting {}",
        ui::notice::APP_TITLE
    );

    // No lock is held on stdin: the masked prompt reads the terminal itself.
    let masked = io::stdin().is_terminal();
    let mut shell = Shell::new(&state.manager, BufReader::new(io::stdin()), io::stdout())
        .mask_passwords(masked);
    shell.run().await?;

    tracing::info!("bye");
    Ok(())
}

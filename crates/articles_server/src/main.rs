//! Server entry point.
//!
//! # Responsibility
//! - Read configuration, start logging and open the store.
//! - Wire repository, services and router, then serve until shutdown.

mod config;

use articles_core::{init_console_logging, init_logging, open_pool, SqliteRepository};
use articles_http::{router, AppState};
use color_eyre::eyre::{eyre, Result, WrapErr};
use config::ServerConfig;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // A missing .env file is fine; the process environment still applies.
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env()?;
    match config.log_dir.as_deref() {
        Some(dir) => init_logging(&config.log_level, dir),
        None => init_console_logging(&config.log_level),
    }
    .map_err(|err| eyre!(err))?;

    let pool = open_pool(&config.db_path).wrap_err_with(|| {
        format!("failed to open database at {}", config.db_path.display())
    })?;
    let state = AppState::from_repository(SqliteRepository::new(pool));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .wrap_err_with(|| format!("failed to bind {}", config.bind_addr))?;
    info!(
        "event=server_start module=server status=ok bind_addr={} db_path={}",
        config.bind_addr,
        config.db_path.display()
    );

    axum::serve(listener, router(state))
        .await
        .wrap_err("server error")?;

    Ok(())
}

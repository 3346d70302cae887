//! Connection pool bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Build file-backed or in-memory connection pools.
//! - Configure connection pragmas required by core behavior.
//! - Trigger schema migrations before returning a usable pool.
//!
//! # Invariants
//! - Every pooled connection has `foreign_keys=ON`.
//! - Returned pools have migrations fully applied.
//! - The in-memory pool holds exactly one connection that is never recycled,
//!   otherwise the database would vanish with it.

use super::migrations::apply_migrations;
use super::{DbPool, DbResult};
use log::{error, info};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const FILE_POOL_MAX_SIZE: u32 = 8;

/// Opens a pool over a SQLite database file and applies all pending migrations.
///
/// File pools run in WAL mode so concurrent requests can read while one writes.
///
/// # Side effects
/// - Creates the database file when it does not exist yet.
/// - Emits `db_open` logging events with duration and status.
pub fn open_pool(path: impl AsRef<Path>) -> DbResult<DbPool> {
    let manager = SqliteConnectionManager::file(path).with_init(|conn| {
        configure_connection(conn)?;
        conn.query_row("PRAGMA journal_mode = WAL;", [], |_| Ok(()))
    });
    let builder = Pool::builder()
        .max_size(FILE_POOL_MAX_SIZE)
        .min_idle(Some(1));
    build_pool(builder, manager, "file")
}

/// Opens a single-connection pool over an in-memory database with migrations applied.
///
/// Intended for tests and ephemeral runs; data is lost when the pool is dropped.
pub fn open_pool_in_memory() -> DbResult<DbPool> {
    let manager = SqliteConnectionManager::memory().with_init(configure_connection);
    let builder = Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None);
    build_pool(builder, manager, "memory")
}

fn build_pool(
    builder: r2d2::Builder<SqliteConnectionManager>,
    manager: SqliteConnectionManager,
    mode: &str,
) -> DbResult<DbPool> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let pool = match builder.build(manager) {
        Ok(pool) => pool,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match migrate_pool(&pool) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(pool)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn migrate_pool(pool: &DbPool) -> DbResult<()> {
    let mut conn = pool.get()?;
    apply_migrations(&mut conn)
}

fn configure_connection(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")
}

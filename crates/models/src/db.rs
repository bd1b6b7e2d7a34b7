use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

pub use configs::DatabaseConfig;

/// Lifetime used where the pool must never reap its connection.
const NEVER_RECYCLE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect(connect_options(cfg)).await?;
    info!(sqlite = cfg.is_sqlite(), max_connections = cfg.max_connections, "database connected");
    Ok(db)
}

pub fn connect_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    // every pooled connection to sqlite::memory: is its own database,
    // and reaping the single one drops the schema along with the rows
    if is_sqlite_memory(&cfg.url) {
        opts.max_connections(1)
            .min_connections(1)
            .idle_timeout(NEVER_RECYCLE)
            .max_lifetime(NEVER_RECYCLE);
    }
    opts
}

fn is_sqlite_memory(url: &str) -> bool {
    let lower = url.to_lowercase();
    lower.starts_with("sqlite:") && lower.contains(":memory:")
}

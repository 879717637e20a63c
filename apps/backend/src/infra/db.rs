use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{db_url, DbKind, RuntimeEnv};
use crate::error::AppError;

/// Postgres may still be starting when the server boots.
const PG_CONNECT_ATTEMPTS: u32 = 5;
const PG_RETRY_INTERVAL_MS: u64 = 500;

/// Long enough that an in-memory database outlives any test or CLI run.
const MEMORY_CONN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Mask the password in a connection URL for logging.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth, host)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    match auth.rfind(':') {
        Some(colon) if auth[..colon].contains("://") => {
            format!("{}:***@{}", &auth[..colon], host)
        }
        _ => url.to_string(),
    }
}

async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(conn) => {
                if attempt > 1 {
                    info!(attempts = attempt, "connection_retry=success");
                }
                return Ok(conn);
            }
            Err(e) if attempt < max_attempts => {
                warn!(attempt, max_attempts, interval_ms, error = %e, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn connect_options(url: &str, kind: DbKind) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url.to_string());
    opt.sqlx_logging(false);
    match kind {
        DbKind::Postgres => {
            opt.max_connections(10)
                .acquire_timeout(Duration::from_secs(5));
        }
        DbKind::SqliteFile => {
            opt.max_connections(1).min_connections(1);
        }
        DbKind::SqliteMemory => {
            opt.max_connections(1)
                .min_connections(1)
                .idle_timeout(MEMORY_CONN_LIFETIME)
                .max_lifetime(MEMORY_CONN_LIFETIME);
        }
    }
    opt
}

/// Open a connection pool. Does NOT run migrations.
pub async fn connect_db(runtime: RuntimeEnv, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(runtime, kind)?;
    let opt = connect_options(&url, kind);

    let conn = if kind == DbKind::Postgres {
        retry_connection(
            || {
                let opt = opt.clone();
                async move {
                    Database::connect(opt).await.map_err(|e| {
                        AppError::config(format!("failed to connect to Postgres: {e}"))
                    })
                }
            },
            PG_CONNECT_ATTEMPTS,
            PG_RETRY_INTERVAL_MS,
        )
        .await?
    } else {
        Database::connect(opt)
            .await
            .map_err(|e| AppError::config(format!("failed to open SQLite database: {e}")))?
    };

    info!(?runtime, %kind, url = %sanitize_db_url(&url), "database connected");
    Ok(conn)
}

/// Connect and bring the schema up to date. Single entrypoint for the server,
/// the ledger CLI and tests.
pub async fn bootstrap_db(runtime: RuntimeEnv, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(runtime, kind).await?;
    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("migration failed: {e}")))?;
    Ok(conn)
}

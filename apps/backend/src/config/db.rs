use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Which deployment the process belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    /// Enforces test-only database names and file paths.
    Test,
}

/// Storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    /// One private database per connection; the pool is pinned to a single one.
    SqliteMemory,
}

impl FromStr for RuntimeEnv {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Ok(RuntimeEnv::Prod),
            "test" => Ok(RuntimeEnv::Test),
            other => Err(AppError::config(format!(
                "unknown runtime env '{other}' (expected prod or test)"
            ))),
        }
    }
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(DbKind::Postgres),
            "sqlite-file" | "sqlite" => Ok(DbKind::SqliteFile),
            "sqlite-memory" | "memory" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config(format!(
                "unknown database kind '{other}' (expected postgres, sqlite-file or sqlite-memory)"
            ))),
        }
    }
}

impl fmt::Display for DbKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DbKind::Postgres => "postgres",
            DbKind::SqliteFile => "sqlite-file",
            DbKind::SqliteMemory => "sqlite-memory",
        })
    }
}

impl DbKind {
    /// `GOSTOP_DB`, defaulting to a SQLite file.
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("GOSTOP_DB") {
            Ok(raw) if !raw.trim().is_empty() => raw.parse(),
            _ => Ok(DbKind::SqliteFile),
        }
    }
}

/// Connection URL for the given environment and backend.
pub fn db_url(runtime: RuntimeEnv, kind: DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => postgres_url(runtime),
        DbKind::SqliteFile => Ok(format!("sqlite://{}?mode=rwc", sqlite_path(runtime)?)),
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

fn postgres_url(runtime: RuntimeEnv) -> Result<String, AppError> {
    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = db_name(runtime)?;
    let username = must_var("APP_DB_USER")?;
    let password = must_var("APP_DB_PASSWORD")?;
    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

fn db_name(runtime: RuntimeEnv) -> Result<String, AppError> {
    match runtime {
        RuntimeEnv::Prod => must_var("PROD_DB"),
        RuntimeEnv::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

fn sqlite_path(runtime: RuntimeEnv) -> Result<String, AppError> {
    let path = match env::var("GOSTOP_SQLITE_PATH") {
        Ok(p) if !p.trim().is_empty() => p.trim().to_string(),
        _ => match runtime {
            RuntimeEnv::Prod => "./gostop.db".to_string(),
            RuntimeEnv::Test => "./gostop_test.db".to_string(),
        },
    };
    if runtime == RuntimeEnv::Test && !path.contains("test") {
        return Err(AppError::config(format!(
            "Test profile requires the SQLite path to contain 'test', but got: '{path}'"
        )));
    }
    Ok(path)
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}

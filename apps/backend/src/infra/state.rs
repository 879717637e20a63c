use crate::config::db::{DbKind, RuntimeEnv};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for AppState, shared by the server binary and tests.
pub struct StateBuilder {
    security_config: Option<SecurityConfig>,
    runtime: RuntimeEnv,
    db_kind: Option<DbKind>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: None,
            runtime: RuntimeEnv::Test,
            db_kind: None,
        }
    }

    pub fn with_env(mut self, runtime: RuntimeEnv) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = Some(security_config);
        self
    }

    /// Connects and migrates when a database was requested. Without an
    /// explicit security config, one is read from the environment.
    pub async fn build(self) -> Result<AppState, AppError> {
        let security = match self.security_config {
            Some(config) => config,
            None => SecurityConfig::from_env(self.runtime)?,
        };
        match self.db_kind {
            Some(kind) => {
                let conn = bootstrap_db(self.runtime, kind).await?;
                Ok(AppState::new(conn, security))
            }
            None => Ok(AppState::new_without_db(security)),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

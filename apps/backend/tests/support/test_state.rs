use gostop_backend::config::db::{DbKind, RuntimeEnv};
use gostop_backend::infra::state::build_state;
use gostop_backend::state::app_state::AppState;
use gostop_backend::state::security_config::SecurityConfig;
use gostop_backend::AppError;

/// Fresh, migrated in-memory SQLite ledger per call.
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(DbKind::SqliteMemory)
        .with_security(SecurityConfig::for_tests())
        .build()
        .await
}

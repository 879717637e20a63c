use std::env;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::auth::password;
use crate::config::db::RuntimeEnv;
use crate::error::AppError;

pub const DEFAULT_ACCESS_TTL: Duration = Duration::from_secs(15 * 60);
pub const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Shared password accepted outside production when none is configured.
const DEV_ADMIN_PASSWORD: &str = "admin1234";
const DEV_ACCESS_SECRET: &[u8] = b"gostop-dev-access-secret";
const DEV_REFRESH_SECRET: &[u8] = b"gostop-dev-refresh-secret";

/// JWT and login settings.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub access_secret: Vec<u8>,
    pub refresh_secret: Vec<u8>,
    pub algorithm: Algorithm,
    /// Argon2 PHC string of the shared admin password.
    pub admin_password_hash: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl SecurityConfig {
    pub fn new(
        access_secret: impl Into<Vec<u8>>,
        refresh_secret: impl Into<Vec<u8>>,
        admin_password: &str,
    ) -> Result<Self, AppError> {
        let admin_password_hash = password::hash(admin_password)
            .map_err(|e| AppError::config(format!("failed to hash admin password: {e}")))?;
        Ok(Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            algorithm: Algorithm::HS256,
            admin_password_hash,
            access_ttl: DEFAULT_ACCESS_TTL,
            refresh_ttl: DEFAULT_REFRESH_TTL,
        })
    }

    /// Read `GOSTOP_ACCESS_SECRET`, `GOSTOP_REFRESH_SECRET` and
    /// `GOSTOP_ADMIN_PASSWORD`. All three are required in production.
    pub fn from_env(runtime: RuntimeEnv) -> Result<Self, AppError> {
        let var = |name: &str| env::var(name).ok().filter(|v| !v.is_empty());
        let required = |name: &str| {
            AppError::config(format!("Required environment variable '{name}' is not set"))
        };

        let (access, refresh, password) = match runtime {
            RuntimeEnv::Prod => (
                var("GOSTOP_ACCESS_SECRET").ok_or_else(|| required("GOSTOP_ACCESS_SECRET"))?,
                var("GOSTOP_REFRESH_SECRET").ok_or_else(|| required("GOSTOP_REFRESH_SECRET"))?,
                var("GOSTOP_ADMIN_PASSWORD").ok_or_else(|| required("GOSTOP_ADMIN_PASSWORD"))?,
            ),
            RuntimeEnv::Test => (
                var("GOSTOP_ACCESS_SECRET")
                    .unwrap_or_else(|| String::from_utf8_lossy(DEV_ACCESS_SECRET).into_owned()),
                var("GOSTOP_REFRESH_SECRET")
                    .unwrap_or_else(|| String::from_utf8_lossy(DEV_REFRESH_SECRET).into_owned()),
                var("GOSTOP_ADMIN_PASSWORD").unwrap_or_else(|| DEV_ADMIN_PASSWORD.to_string()),
            ),
        };

        if access == refresh {
            return Err(AppError::config(
                "GOSTOP_ACCESS_SECRET and GOSTOP_REFRESH_SECRET must differ",
            ));
        }
        Self::new(access.into_bytes(), refresh.into_bytes(), &password)
    }

    /// Development secrets with the default shared password.
    pub fn for_tests() -> Self {
        Self {
            access_secret: DEV_ACCESS_SECRET.to_vec(),
            refresh_secret: DEV_REFRESH_SECRET.to_vec(),
            algorithm: Algorithm::HS256,
            admin_password_hash: password::hash(DEV_ADMIN_PASSWORD).unwrap_or_default(),
            access_ttl: DEFAULT_ACCESS_TTL,
            refresh_ttl: DEFAULT_REFRESH_TTL,
        }
    }

    pub fn with_ttls(mut self, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        self.access_ttl = access_ttl;
        self.refresh_ttl = refresh_ttl;
        self
    }
}

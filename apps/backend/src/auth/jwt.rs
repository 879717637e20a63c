use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims of backend-issued tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username the admin logged in with.
    pub sub: String,
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

fn secret_for(kind: TokenKind, security: &SecurityConfig) -> &[u8] {
    match kind {
        TokenKind::Access => &security.access_secret,
        TokenKind::Refresh => &security.refresh_secret,
    }
}

fn ttl_for(kind: TokenKind, security: &SecurityConfig) -> Duration {
    match kind {
        TokenKind::Access => security.access_ttl,
        TokenKind::Refresh => security.refresh_ttl,
    }
}

fn mint(
    kind: TokenKind,
    sub: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("System clock is before the Unix epoch"))?
        .as_secs() as i64;
    let exp = iat + ttl_for(kind, security).as_secs() as i64;

    let claims = Claims {
        sub: sub.to_string(),
        kind,
        iat,
        exp,
    };
    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(secret_for(kind, security)),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

fn verify(kind: TokenKind, token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(security.algorithm);
    validation.leeway = 0;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret_for(kind, security)),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })?;

    if claims.kind != kind {
        return Err(AppError::unauthorized_invalid_jwt());
    }
    Ok(claims)
}

pub fn mint_access_token(
    sub: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    mint(TokenKind::Access, sub, now, security)
}

pub fn mint_refresh_token(
    sub: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    mint(TokenKind::Refresh, sub, now, security)
}

/// Expired tokens map to `UNAUTHORIZED_EXPIRED_JWT`; anything else that
/// fails to verify (bad signature, refresh token, garbage) to
/// `UNAUTHORIZED_INVALID_JWT`.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    verify(TokenKind::Access, token, security)
}

pub fn verify_refresh_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    verify(TokenKind::Refresh, token, security)
}

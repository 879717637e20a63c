use std::time::SystemTime;

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::jwt::{mint_access_token, mint_refresh_token, verify_refresh_token};
use crate::auth::password;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::ValidatedJson;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

pub const REFRESH_COOKIE: &str = "refresh_token";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

fn refresh_cookie(token: String, security: &SecurityConfig) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(CookieDuration::seconds(security.refresh_ttl.as_secs() as i64))
        .finish()
}

/// Access token in the body, refresh token in an HttpOnly cookie.
fn issue_tokens(username: &str, security: &SecurityConfig) -> Result<HttpResponse, AppError> {
    let now = SystemTime::now();
    let access_token = mint_access_token(username, now, security)?;
    let refresh_token = mint_refresh_token(username, now, security)?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(refresh_token, security))
        .json(TokenResponse { access_token }))
}

/// Any username may sign in with the shared admin password.
async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { username, password } = body.into_inner();
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "Username must not be empty",
        ));
    }

    if !password::verify(&password, &app_state.security.admin_password_hash) {
        warn!(username, "login rejected");
        return Err(AppError::invalid_credentials());
    }

    info!(username, "admin logged in");
    issue_tokens(username, &app_state.security)
}

/// Exchange the refresh cookie for a new access token; the cookie is rotated.
async fn refresh(req: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let cookie = req
        .cookie(REFRESH_COOKIE)
        .ok_or_else(AppError::unauthorized_missing_refresh)?;

    let claims = verify_refresh_token(cookie.value(), &app_state.security)
        .map_err(|_| AppError::unauthorized_missing_refresh())?;

    issue_tokens(&claims.sub, &app_state.security)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route("/refresh", web::post().to(refresh));
}

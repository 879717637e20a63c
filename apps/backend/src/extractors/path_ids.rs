use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Positive integer from the `{id}` path segment. Existence is checked by
/// the service that uses it.
fn positive_id(req: &HttpRequest, code: ErrorCode, what: &str) -> Result<i64, AppError> {
    let raw = req
        .match_info()
        .get("id")
        .ok_or_else(|| AppError::bad_request(code, format!("Missing {what} id")))?;

    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        Ok(id) => Err(AppError::bad_request(
            code,
            format!("{what} id must be positive, got: {id}"),
        )),
        Err(_) => Err(AppError::bad_request(
            code,
            format!("Invalid {what} id: {raw}"),
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerId(pub i64);

impl FromRequest for PlayerId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(positive_id(req, ErrorCode::InvalidPlayerId, "Player").map(PlayerId))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameId(pub i64);

impl FromRequest for GameId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(positive_id(req, ErrorCode::InvalidGameId, "Game").map(GameId))
    }
}

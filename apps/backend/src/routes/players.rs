use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{AdminSession, PlayerId, ValidatedJson};
use crate::services::{players, stats};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePlayerRequest {
    pub name: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlayerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

async fn list_players(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let players = players::list_players(db).await?;
    Ok(HttpResponse::Ok().json(players))
}

async fn create_player(
    _admin: AdminSession,
    body: ValidatedJson<CreatePlayerRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CreatePlayerRequest { name, username } = body.into_inner();

    let player = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(players::create_player(txn, &name, &username).await?) })
    })
    .await?;

    Ok(HttpResponse::Created().json(player))
}

async fn update_player(
    _admin: AdminSession,
    player_id: PlayerId,
    body: ValidatedJson<UpdatePlayerRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let UpdatePlayerRequest { name, username } = body.into_inner();
    let PlayerId(id) = player_id;

    let player = with_txn(&app_state, |txn| {
        Box::pin(async move {
            Ok(players::update_player(txn, id, name.as_deref(), username.as_deref()).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(player))
}

/// 409 `UNPAID_BALANCE` unless the balance is zero, 409 `PLAYER_HAS_GAMES`
/// while any recorded game still seats the player.
async fn delete_player(
    _admin: AdminSession,
    player_id: PlayerId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let PlayerId(id) = player_id;

    with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(players::delete_player(txn, id).await?) })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Per-player cumulative points, game by game.
async fn history(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let history = stats::player_history(db).await?;
    Ok(HttpResponse::Ok().json(history))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // `/history` before `/{id}` so it is not taken for an id.
    cfg.route("/history", web::get().to(history))
        .service(
            web::resource("")
                .route(web::get().to(list_players))
                .route(web::post().to(create_player)),
        )
        .service(
            web::resource("/{id}")
                .route(web::patch().to(update_player))
                .route(web::delete().to(delete_player)),
        );
}

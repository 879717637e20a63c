use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::domain::settlement::{EventType, RoleName};
use crate::error::AppError;
use crate::extractors::{AdminSession, GameId, ValidatedJson};
use crate::services::games::{self, NewEvent, NewGame, NewGamePlayer};
use crate::services::settlement;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct PointsEventRequest {
    pub event_type: String,
    pub points: i64,
}

#[derive(Debug, Deserialize)]
pub struct GamePlayerRequest {
    pub id: i64,
    pub role: String,
    #[serde(default)]
    pub points_events: Vec<PointsEventRequest>,
}

#[derive(Debug, Deserialize)]
pub struct RecordGameRequest {
    pub winner_id: i64,
    pub players: Vec<GamePlayerRequest>,
}

impl TryFrom<RecordGameRequest> for NewGame {
    type Error = AppError;

    fn try_from(req: RecordGameRequest) -> Result<Self, Self::Error> {
        let players = req
            .players
            .into_iter()
            .map(|p| {
                let events = p
                    .points_events
                    .into_iter()
                    .map(|e| {
                        Ok(NewEvent {
                            event_type: e.event_type.parse::<EventType>()?,
                            points: e.points,
                        })
                    })
                    .collect::<Result<Vec<_>, AppError>>()?;
                Ok(NewGamePlayer {
                    player_id: p.id,
                    role: RoleName::parse(&p.role),
                    events,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(NewGame {
            winner_id: req.winner_id,
            players,
        })
    }
}

async fn list_games(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    Ok(HttpResponse::Ok().json(games::list_games(db).await?))
}

async fn get_game(
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    Ok(HttpResponse::Ok().json(games::game_layout(db, game_id.0).await?))
}

/// Record and settle one game in a single transaction.
async fn record_game(
    _admin: AdminSession,
    body: ValidatedJson<RecordGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let new_game = NewGame::try_from(body.into_inner())?;

    let layout = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(games::record_game(txn, new_game).await?) })
    })
    .await?;

    Ok(HttpResponse::Created().json(layout))
}

async fn delete_game(
    _admin: AdminSession,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let GameId(id) = game_id;

    with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(games::delete_game(txn, id).await?) })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Rebuild every balance from the stored games.
async fn recompute(
    _admin: AdminSession,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let summary = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(settlement::recompute_all(txn).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(summary))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_games))
        .route("/batch", web::post().to(record_game))
        .service(
            web::resource("/{id}")
                .route(web::get().to(get_game))
                .route(web::delete().to(delete_game)),
        );
}

pub fn configure_recompute(cfg: &mut web::ServiceConfig) {
    cfg.route("/update", web::patch().to(recompute));
}

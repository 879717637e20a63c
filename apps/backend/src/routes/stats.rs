use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::db::require_db;
use crate::error::AppError;
use crate::services::stats;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct NumGamesResponse {
    num_games: u64,
}

async fn stats_summary(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    Ok(HttpResponse::Ok().json(stats::stats_summary(db).await?))
}

async fn num_games(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let num_games = stats::num_games(db).await?;
    Ok(HttpResponse::Ok().json(NumGamesResponse { num_games }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/stats", web::get().to(stats_summary))
        .route("/num_games", web::get().to(num_games));
}

use actix_web::http::StatusCode;
use actix_web::test;
use gostop_backend::db::require_db;
use gostop_backend::AppError;
use serde_json::Value;

use crate::support::app_builder::create_test_app;
use crate::support::build_test_state;
use crate::support::factory::{create_four_players, record_standard_game};

#[actix_web::test]
async fn stats_on_empty_ledger() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/stats").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["dealer_win_percentage"].is_null());
    assert_eq!(body["players"], Value::Array(vec![]));
    Ok(())
}

#[actix_web::test]
async fn stats_and_num_games() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let table = create_four_players(db).await?;
    record_standard_game(db, &table).await?;
    record_standard_game(db, &table).await?;
    let app = create_test_app(state).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/stats").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["dealer_win_percentage"], 0.0);
    let p2 = body["players"]
        .as_array()
        .and_then(|rows| rows.iter().find(|r| r["player_id"] == table[3].id))
        .expect("P2 row");
    assert_eq!(p2["games_played"], 2);
    assert_eq!(p2["games_won"], 2);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/num_games").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["num_games"], 2);
    Ok(())
}

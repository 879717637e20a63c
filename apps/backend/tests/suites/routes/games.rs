use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::test;
use gostop_backend::db::require_db;
use gostop_backend::repos::players as players_repo;
use gostop_backend::AppError;
use serde_json::{json, Value};

use crate::common::assert_problem_details;
use crate::support::app_builder::create_test_app;
use crate::support::auth::bearer;
use crate::support::build_test_state;
use crate::support::factory::{create_four_players, record_standard_game};

fn seller_batch(ids: [i64; 4]) -> Value {
    let [dealer, seller, p1, p2] = ids;
    json!({
        "winner_id": dealer,
        "players": [
            {"id": dealer, "role": "DEALER", "points_events": []},
            {"id": seller, "role": "SELLER", "points_events": [{"event_type": "SELL", "points": 10}]},
            {"id": p1, "role": "P1", "points_events": []},
            {"id": p2, "role": "P2"}
        ]
    })
}

#[actix_web::test]
async fn batch_records_and_settles() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?.clone();
    let table = create_four_players(&db).await?;
    let ids = [table[0].id, table[1].id, table[2].id, table[3].id];
    let auth = bearer(&state);
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/games/batch")
        .insert_header((AUTHORIZATION, auth))
        .set_json(seller_batch(ids))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let layout: Value = test::read_body_json(resp).await;
    let deltas: Vec<i64> = layout["players"]
        .as_array()
        .expect("players")
        .iter()
        .filter_map(|e| e["point_delta"].as_i64())
        .collect();
    assert_eq!(deltas, vec![0, 20, -10, -10]);
    assert_eq!(layout["winner_name"], "Dealer");

    assert_eq!(players_repo::require_player(&db, ids[1]).await?.balance, 20);
    Ok(())
}

#[actix_web::test]
async fn batch_validation_errors() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let table = create_four_players(require_db(&state)?).await?;
    let ids = [table[0].id, table[1].id, table[2].id, table[3].id];
    let auth = bearer(&state);
    let app = create_test_app(state).await;

    let post = |body: Value| {
        test::TestRequest::post()
            .uri("/games/batch")
            .insert_header((AUTHORIZATION, auth.clone()))
            .set_json(body)
            .to_request()
    };

    let mut bad_event = seller_batch(ids);
    bad_event["players"][1]["points_events"][0]["event_type"] = json!("BONUS");
    let resp = test::call_service(&app, post(bad_event)).await;
    assert_problem_details(resp, StatusCode::BAD_REQUEST, "INVALID_EVENT_TYPE").await;

    let mut duplicate = seller_batch(ids);
    duplicate["players"][3]["id"] = json!(ids[0]);
    let resp = test::call_service(&app, post(duplicate)).await;
    assert_problem_details(resp, StatusCode::BAD_REQUEST, "DUPLICATE_PLAYER").await;

    let mut stranger = seller_batch(ids);
    stranger["winner_id"] = json!(9999);
    let resp = test::call_service(&app, post(stranger)).await;
    assert_problem_details(resp, StatusCode::BAD_REQUEST, "UNKNOWN_WINNER").await;

    // P1 holds the WIN but the dealer is declared winner.
    let mut mismatch = seller_batch(ids);
    mismatch["players"][2]["points_events"] = json!([{"event_type": "WIN", "points": 10}]);
    let resp = test::call_service(&app, post(mismatch)).await;
    assert_problem_details(resp, StatusCode::BAD_REQUEST, "WINNER_MISMATCH").await;

    let empty = json!({"winner_id": ids[0], "players": []});
    let resp = test::call_service(&app, post(empty)).await;
    assert_problem_details(resp, StatusCode::BAD_REQUEST, "INVALID_PLAYER_COUNT").await;

    let resp = test::call_service(&app, post(json!({"winner_id": "x"}))).await;
    assert_problem_details(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/num_games").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["num_games"], 0);
    Ok(())
}

#[actix_web::test]
async fn get_list_and_delete_game() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?.clone();
    let table = create_four_players(&db).await?;
    let game = record_standard_game(&db, &table).await?;
    let auth = bearer(&state);
    let app = create_test_app(state).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/games/{}", game.game_id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["game_id"], game.game_id);
    assert_eq!(body["players"].as_array().map(Vec::len), Some(4));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/games").to_request()).await;
    let listed: Value = test::read_body_json(resp).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::delete()
        .uri(&format!("/games/{}", game.game_id))
        .insert_header((AUTHORIZATION, auth.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    for player in &table {
        assert_eq!(players_repo::require_player(&db, player.id).await?.balance, 0);
    }

    let req = test::TestRequest::delete()
        .uri(&format!("/games/{}", game.game_id))
        .insert_header((AUTHORIZATION, auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::NOT_FOUND, "GAME_NOT_FOUND").await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/games/0").to_request()).await;
    assert_problem_details(resp, StatusCode::BAD_REQUEST, "INVALID_GAME_ID").await;
    Ok(())
}

#[actix_web::test]
async fn update_recomputes_balances() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?.clone();
    let table = create_four_players(&db).await?;
    record_standard_game(&db, &table).await?;
    players_repo::set_balance(&db, table[0].id, 500).await?;
    let auth = bearer(&state);
    let app = create_test_app(state).await;

    let req = test::TestRequest::patch()
        .uri("/update")
        .insert_header((AUTHORIZATION, auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let summary: Value = test::read_body_json(resp).await;
    assert_eq!(summary["games"], 1);

    assert_eq!(players_repo::require_player(&db, table[0].id).await?.balance, 0);
    assert_eq!(players_repo::require_player(&db, table[3].id).await?.balance, 25);
    Ok(())
}

#[actix_web::test]
async fn update_requires_admin() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let resp = test::call_service(&app, test::TestRequest::patch().uri("/update").to_request()).await;
    assert_problem_details(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_MISSING_BEARER").await;
    Ok(())
}

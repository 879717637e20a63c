use gostop_backend::db::require_db;
use gostop_backend::domain::settlement::EventType;
use gostop_backend::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use gostop_backend::repos::{games as games_repo, players as players_repo};
use gostop_backend::services::games::{self, NewGame};
use gostop_backend::AppError;

use crate::support::build_test_state;
use crate::support::factory::{create_four_players, record_standard_game, seat};

async fn balances<C: sea_orm::ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Vec<i64>, DomainError> {
    let mut out = Vec::with_capacity(ids.len());
    for &id in ids {
        out.push(players_repo::require_player(conn, id).await?.balance);
    }
    Ok(out)
}

#[tokio::test]
async fn seller_scenario_settles_on_record() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let [dealer, seller, p1, p2] = create_four_players(db).await?;

    let layout = games::record_game(
        db,
        NewGame {
            winner_id: dealer.id,
            players: vec![
                seat(&dealer, "DEALER", &[]),
                seat(&seller, "SELLER", &[(EventType::Sell, 10)]),
                seat(&p1, "P1", &[]),
                seat(&p2, "P2", &[]),
            ],
        },
    )
    .await?;

    let deltas: Vec<i64> = layout.players.iter().map(|e| e.point_delta).collect();
    assert_eq!(deltas, vec![0, 20, -10, -10]);
    assert_eq!(layout.winner_name.as_deref(), Some("Dealer"));
    assert_eq!(
        balances(db, &[dealer.id, seller.id, p1.id, p2.id]).await?,
        vec![0, 20, -10, -10]
    );
    Ok(())
}

#[tokio::test]
async fn layout_lists_roles_in_seat_order() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let table = create_four_players(db).await?;

    let recorded = record_standard_game(db, &table).await?;
    let fetched = games::game_layout(db, recorded.game_id).await?;
    assert_eq!(recorded, fetched);

    let roles: Vec<&str> = fetched.players.iter().map(|e| e.role.as_str()).collect();
    assert_eq!(roles, vec!["DEALER", "SELLER", "P1", "P2"]);
    let deltas: Vec<i64> = fetched.players.iter().map(|e| e.point_delta).collect();
    assert_eq!(deltas, vec![0, 10, -35, 25]);
    Ok(())
}

#[tokio::test]
async fn delete_reverses_balances() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let table = create_four_players(db).await?;
    let ids: Vec<i64> = table.iter().map(|p| p.id).collect();

    let first = record_standard_game(db, &table).await?;
    let second = record_standard_game(db, &table).await?;
    assert_eq!(balances(db, &ids).await?, vec![0, 20, -70, 50]);

    games::delete_game(db, first.game_id).await?;
    assert_eq!(balances(db, &ids).await?, vec![0, 10, -35, 25]);

    let err = games::game_layout(db, first.game_id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
    assert!(games_repo::get_roles_for_game(db, first.game_id).await?.is_empty());
    assert!(games_repo::get_events_for_game(db, first.game_id).await?.is_empty());

    games::delete_game(db, second.game_id).await?;
    assert_eq!(balances(db, &ids).await?, vec![0, 0, 0, 0]);
    Ok(())
}

#[tokio::test]
async fn delete_unknown_game_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let err = games::delete_game(db, 999).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
    Ok(())
}

#[tokio::test]
async fn unknown_player_is_rejected_before_writing() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let [dealer, ..] = create_four_players(db).await?;

    let mut ghost = seat(&dealer, "P1", &[]);
    ghost.player_id = 9999;
    let err = games::record_game(
        db,
        NewGame {
            winner_id: dealer.id,
            players: vec![seat(&dealer, "DEALER", &[]), ghost],
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Player, _)));
    assert!(games::list_games(db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn winner_outside_the_table_is_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let [dealer, seller, p1, _] = create_four_players(db).await?;

    let err = games::record_game(
        db,
        NewGame {
            winner_id: p1.id,
            players: vec![seat(&dealer, "DEALER", &[]), seat(&seller, "SELLER", &[])],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::UnknownWinner, _)
    ));
    Ok(())
}

#[tokio::test]
async fn list_is_newest_first() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let table = create_four_players(db).await?;

    let a = record_standard_game(db, &table).await?;
    let b = record_standard_game(db, &table).await?;

    let ids: Vec<i64> = games::list_games(db).await?.iter().map(|g| g.game_id).collect();
    assert_eq!(ids, vec![b.game_id, a.game_id]);
    Ok(())
}

use gostop_backend::db::require_db;
use gostop_backend::domain::settlement::EventType;
use gostop_backend::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use gostop_backend::repos::{games as games_repo, players as players_repo};
use gostop_backend::services::games::{self, NewGame};
use gostop_backend::services::{players, settlement};
use gostop_backend::AppError;

use crate::support::build_test_state;
use crate::support::factory::{
    create_four_players, create_test_player, record_standard_game, seat,
};

#[tokio::test]
async fn create_trims_and_lists_by_name() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let kim = players::create_player(db, "  Kim  ", " kim ").await?;
    assert_eq!(kim.name, "Kim");
    assert_eq!(kim.username, "kim");
    assert_eq!(kim.balance, 0);
    players::create_player(db, "Alex", "alex").await?;

    let names: Vec<String> = players::list_players(db)
        .await?
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Alex", "Kim"]);
    Ok(())
}

#[tokio::test]
async fn blank_name_is_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let err = players::create_player(db, "   ", "someone").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::PlayerName, _)
    ));

    let err = players::create_player(db, "Some One", "some one").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::PlayerName, _)
    ));
    Ok(())
}

#[tokio::test]
async fn duplicate_username_is_taken() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    players::create_player(db, "Kim", "kim").await?;
    let err = players::create_player(db, "Kim Two", "kim").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::UsernameTaken, _)
    ));
    Ok(())
}

#[tokio::test]
async fn update_renames_and_keeps_own_username() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let kim = players::create_player(db, "Kim", "kim").await?;
    players::create_player(db, "Lee", "lee").await?;

    let renamed = players::update_player(db, kim.id, Some("Kimberly"), Some("kim")).await?;
    assert_eq!(renamed.name, "Kimberly");
    assert_eq!(renamed.username, "kim");

    let err = players::update_player(db, kim.id, None, Some("lee"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::UsernameTaken, _)
    ));
    Ok(())
}

#[tokio::test]
async fn update_missing_player_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let err = players::update_player(db, 4242, Some("Ghost"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Player, _)));
    Ok(())
}

#[tokio::test]
async fn delete_requires_zero_balance() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let table = create_four_players(db).await?;
    record_standard_game(db, &table).await?;

    // Seller is owed 10.
    let err = players::delete_player(db, table[1].id).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::UnpaidBalance, _)
    ));
    assert_eq!(players_repo::require_player(db, table[1].id).await?.balance, 10);

    // Dealer broke even but is still seated in the game.
    let err = players::delete_player(db, table[0].id).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::PlayerHasGames, _)
    ));
    assert!(players_repo::find_player(db, table[0].id).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn delete_after_games_are_removed() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let table = create_four_players(db).await?;
    let game = record_standard_game(db, &table).await?;
    games::delete_game(db, game.game_id).await?;

    let removed = players::delete_player(db, table[0].id).await?;
    assert_eq!(removed.id, table[0].id);
    assert!(players_repo::find_player(db, table[0].id).await?.is_none());
    Ok(())
}

/// Bob breaks even across two games. Refusing his removal keeps both games
/// zero-sum, so a recompute reproduces everyone's balance.
#[tokio::test]
async fn break_even_player_with_games_keeps_ledger_consistent() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let ann = create_test_player(db, "Ann").await?;
    let bob = create_test_player(db, "Bob").await?;
    let cat = create_test_player(db, "Cat").await?;

    let lock = games::record_game(
        db,
        NewGame {
            winner_id: ann.id,
            players: vec![
                seat(&ann, "P1", &[]),
                seat(&bob, "P2", &[(EventType::FirstRoundLock, 0)]),
                seat(&cat, "P3", &[]),
            ],
        },
    )
    .await?;
    let win = games::record_game(
        db,
        NewGame {
            winner_id: ann.id,
            players: vec![
                seat(&ann, "P1", &[(EventType::Win, 10)]),
                seat(&bob, "P2", &[(EventType::LossMultiplier, 1)]),
                seat(&cat, "P3", &[]),
            ],
        },
    )
    .await?;

    let balance = |id: i64| async move {
        players_repo::require_player(db, id)
            .await
            .map(|p| p.balance)
    };
    assert_eq!(balance(bob.id).await?, 0);
    let before = [balance(ann.id).await?, balance(cat.id).await?];
    assert_eq!(before, [5, -5]);

    let err = players::delete_player(db, bob.id).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::PlayerHasGames, _)
    ));

    for game_id in [lock.game_id, win.game_id] {
        let sum: i64 = games_repo::stored_roles_for_game(db, game_id)
            .await?
            .iter()
            .map(|r| r.point_delta)
            .sum();
        assert_eq!(sum, 0, "game {game_id}");
    }

    settlement::recompute_all(db).await?;
    assert_eq!([balance(ann.id).await?, balance(cat.id).await?], before);
    assert_eq!(balance(bob.id).await?, 0);
    Ok(())
}

#[tokio::test]
async fn new_player_can_be_deleted() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let player = create_test_player(db, "Brief").await?;
    players::delete_player(db, player.id).await?;

    let err = players::find_player(db, player.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Player, _)));
    Ok(())
}

#[tokio::test]
async fn find_by_username() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let kim = players::create_player(db, "Kim", "kim").await?;
    assert_eq!(players::find_player_by_username(db, " kim ").await?.id, kim.id);
    assert!(players::find_player_by_username(db, "nobody").await.is_err());
    Ok(())
}

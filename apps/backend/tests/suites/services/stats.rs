use gostop_backend::db::require_db;
use gostop_backend::domain::settlement::EventType;
use gostop_backend::services::games::{self, NewGame};
use gostop_backend::services::stats;
use gostop_backend::AppError;

use crate::support::build_test_state;
use crate::support::factory::{create_four_players, create_test_player, record_standard_game, seat};

#[tokio::test]
async fn empty_ledger() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let summary = stats::stats_summary(db).await?;
    assert_eq!(summary.dealer_win_percentage, None);
    assert!(summary.players.is_empty());
    assert_eq!(stats::num_games(db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn dealer_win_percentage_and_games_played() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let table = create_four_players(db).await?;
    let [dealer, seller, p1, p2] = &table;
    let idle = create_test_player(db, "Idle").await?;

    // Won by P2.
    record_standard_game(db, &table).await?;
    // Won by the dealer.
    games::record_game(
        db,
        NewGame {
            winner_id: dealer.id,
            players: vec![
                seat(dealer, "DEALER", &[(EventType::Win, 3)]),
                seat(p1, "P1", &[(EventType::LossMultiplier, 1)]),
            ],
        },
    )
    .await?;
    // No dealer at this table.
    games::record_game(
        db,
        NewGame {
            winner_id: seller.id,
            players: vec![seat(seller, "SELLER", &[]), seat(p2, "P2", &[])],
        },
    )
    .await?;

    let summary = stats::stats_summary(db).await?;
    assert_eq!(summary.dealer_win_percentage, Some(50.0));
    assert_eq!(stats::num_games(db).await?, 3);

    let row = |id: i64| {
        summary
            .players
            .iter()
            .find(|p| p.player_id == id)
            .map(|p| (p.games_played, p.games_won))
    };
    assert_eq!(row(dealer.id), Some((2, 1)));
    assert_eq!(row(seller.id), Some((2, 1)));
    assert_eq!(row(p1.id), Some((2, 0)));
    assert_eq!(row(p2.id), Some((2, 1)));
    assert_eq!(row(idle.id), Some((0, 0)));
    Ok(())
}

#[tokio::test]
async fn dealer_percentage_rounds_to_two_decimals() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let [dealer, _, p1, _] = create_four_players(db).await?;

    for winner in [dealer.id, p1.id, p1.id] {
        games::record_game(
            db,
            NewGame {
                winner_id: winner,
                players: vec![seat(&dealer, "DEALER", &[]), seat(&p1, "P1", &[])],
            },
        )
        .await?;
    }

    let summary = stats::stats_summary(db).await?;
    assert_eq!(summary.dealer_win_percentage, Some(33.33));
    Ok(())
}

#[tokio::test]
async fn history_accumulates_in_game_order() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let table = create_four_players(db).await?;
    let idle = create_test_player(db, "Idle").await?;

    let g1 = record_standard_game(db, &table).await?;
    let g2 = record_standard_game(db, &table).await?;

    let history = stats::player_history(db).await?;
    let p1 = history
        .iter()
        .find(|h| h.player_id == table[2].id)
        .expect("P1 history");
    let series: Vec<(i64, i64, i64)> = p1
        .points
        .iter()
        .map(|p| (p.game_id, p.point_delta, p.cumulative))
        .collect();
    assert_eq!(series, vec![(g1.game_id, -35, -35), (g2.game_id, -35, -70)]);

    let idle_history = history.iter().find(|h| h.player_id == idle.id).expect("idle");
    assert!(idle_history.points.is_empty());
    Ok(())
}

//! Read-only aggregates over the whole ledger.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::{games_sea, players_sea, roles_sea};
use crate::domain::settlement::RoleName;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerGames {
    pub player_id: i64,
    pub name: String,
    pub username: String,
    pub games_played: u64,
    pub games_won: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryPoint {
    pub game_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub point_delta: i64,
    /// Running total after this game.
    pub cumulative: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerHistory {
    pub player_id: i64,
    pub name: String,
    pub points: Vec<HistoryPoint>,
}

/// Share of games with a dealer that the dealer also won, as a percentage
/// rounded to two decimals. `None` when no game has a dealer.
pub async fn dealer_win_percentage<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<f64>, DomainError> {
    let winners: HashMap<i64, Option<i64>> = games_sea::find_all_chronological(conn)
        .await?
        .into_iter()
        .map(|g| (g.id, g.winner_id))
        .collect();

    let (mut dealt, mut won) = (0u64, 0u64);
    for role in roles_sea::find_all(conn).await? {
        if RoleName::parse(&role.role) != RoleName::Dealer {
            continue;
        }
        dealt += 1;
        if winners.get(&role.game_id).copied().flatten() == Some(role.player_id) {
            won += 1;
        }
    }

    if dealt == 0 {
        return Ok(None);
    }
    let pct = won as f64 / dealt as f64 * 100.0;
    Ok(Some((pct * 100.0).round() / 100.0))
}

/// Games played and won per player, in player listing order.
pub async fn players_games_played<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<PlayerGames>, DomainError> {
    let mut played: HashMap<i64, u64> = HashMap::new();
    for role in roles_sea::find_all(conn).await? {
        *played.entry(role.player_id).or_default() += 1;
    }
    let mut won: HashMap<i64, u64> = HashMap::new();
    for game in games_sea::find_all_chronological(conn).await? {
        if let Some(winner) = game.winner_id {
            *won.entry(winner).or_default() += 1;
        }
    }

    Ok(players_sea::find_all(conn)
        .await?
        .into_iter()
        .map(|p| PlayerGames {
            games_played: played.get(&p.id).copied().unwrap_or(0),
            games_won: won.get(&p.id).copied().unwrap_or(0),
            player_id: p.id,
            name: p.name,
            username: p.username,
        })
        .collect())
}

pub async fn num_games<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(games_sea::count_games(conn).await?)
}

/// Per player, the delta of every game they played in settlement order with a
/// running total. Players without games get an empty series.
pub async fn player_history<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<PlayerHistory>, DomainError> {
    let games = games_sea::find_all_chronological(conn).await?;
    let roles = roles_sea::find_all(conn).await?;

    let mut by_game: HashMap<i64, Vec<(i64, i64)>> = HashMap::new();
    for role in roles {
        by_game
            .entry(role.game_id)
            .or_default()
            .push((role.player_id, role.point_delta));
    }

    let mut series: HashMap<i64, Vec<HistoryPoint>> = HashMap::new();
    for game in &games {
        for &(player_id, point_delta) in by_game.get(&game.id).into_iter().flatten() {
            let points = series.entry(player_id).or_default();
            let previous = points.last().map_or(0, |p| p.cumulative);
            points.push(HistoryPoint {
                game_id: game.id,
                created_at: game.created_at,
                point_delta,
                cumulative: previous.saturating_add(point_delta),
            });
        }
    }

    Ok(players_sea::find_all(conn)
        .await?
        .into_iter()
        .map(|p| PlayerHistory {
            points: series.remove(&p.id).unwrap_or_default(),
            player_id: p.id,
            name: p.name,
        })
        .collect())
}

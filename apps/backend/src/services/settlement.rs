//! Settlement use-cases: load a game's read model, run the engine, persist.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use tracing::{debug, error, info};

use crate::domain::settlement::{self, RoleSettlement, SettlementError};
use crate::errors::domain::DomainError;
use crate::repos::{games as games_repo, players as players_repo};

/// Settle one game and write the new deltas and balances.
///
/// Any delta already stored for the game is backed out of the balances first,
/// so settling the same game twice leaves the ledger unchanged.
pub async fn settle_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<RoleSettlement>, DomainError> {
    let previous: HashMap<i64, i64> = games_repo::stored_roles_for_game(conn, game_id)
        .await?
        .into_iter()
        .map(|r| (r.role_id, r.point_delta))
        .collect();

    let mut roles = games_repo::get_roles_for_game(conn, game_id).await?;
    for role in &mut roles {
        let old = previous.get(&role.role_id).copied().unwrap_or(0);
        role.current_balance = role
            .current_balance
            .checked_sub(old)
            .ok_or(SettlementError::Overflow { stage: "balance" })?;
    }
    let events = games_repo::get_events_for_game(conn, game_id).await?;

    let settled = settlement::settle(&roles, &events).map_err(|e| {
        error!(game_id, roles = roles.len(), events = events.len(), error = %e, "settlement rejected");
        DomainError::from(e)
    })?;

    for s in &settled {
        games_repo::set_point_delta(conn, s.role_id, s.new_point_delta).await?;
        players_repo::set_balance(conn, s.player_id, s.new_balance).await?;
    }

    debug!(
        game_id,
        roles = settled.len(),
        events = events.len(),
        "game settled"
    );
    Ok(settled)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct RecomputeSummary {
    pub games: usize,
    pub players_reset: u64,
}

/// Zero every delta and balance, then replay all games oldest first.
pub async fn recompute_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<RecomputeSummary, DomainError> {
    games_repo::zero_all_point_deltas(conn).await?;
    let players_reset = players_repo::zero_all_balances(conn).await?;

    let games = games_repo::all_games_chronological(conn).await?;
    for game in &games {
        settle_game(conn, game.id).await?;
    }

    let summary = RecomputeSummary {
        games: games.len(),
        players_reset,
    };
    info!(games = summary.games, players = summary.players_reset, "recompute finished");
    Ok(summary)
}

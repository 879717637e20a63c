//! Game use-cases: record, inspect and remove games.

use std::collections::HashSet;

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::domain::settlement::{self, EventType, ReversalInput, RoleName, MAX_PLAYERS_PER_GAME};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::games::{self as games_repo, GameLayout};
use crate::repos::players as players_repo;
use crate::services::settlement::settle_game;

/// How many games the listing returns.
pub const GAME_LIST_LIMIT: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub event_type: EventType,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGamePlayer {
    pub player_id: i64,
    pub role: RoleName,
    pub events: Vec<NewEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub winner_id: i64,
    pub players: Vec<NewGamePlayer>,
}

fn validate_shape(game: &NewGame) -> Result<(), DomainError> {
    let count = game.players.len();
    if count == 0 || count > MAX_PLAYERS_PER_GAME {
        return Err(DomainError::validation(
            ValidationKind::PlayerCount,
            format!("A game needs 1 to {MAX_PLAYERS_PER_GAME} players, got {count}"),
        ));
    }

    let mut seen = HashSet::with_capacity(count);
    for p in &game.players {
        if !seen.insert(p.player_id) {
            return Err(DomainError::validation(
                ValidationKind::DuplicatePlayer,
                format!("Player {} is listed more than once", p.player_id),
            ));
        }
    }

    if !seen.contains(&game.winner_id) {
        return Err(DomainError::validation(
            ValidationKind::UnknownWinner,
            format!("Winner {} is not one of the game's players", game.winner_id),
        ));
    }

    // Stats read `winner_id` while settlement pays the WIN owner; keep them equal.
    let win_owners: Vec<i64> = game
        .players
        .iter()
        .flat_map(|p| {
            p.events
                .iter()
                .filter(|e| e.event_type == EventType::Win)
                .map(move |_| p.player_id)
        })
        .collect();
    match win_owners.as_slice() {
        [] => {}
        [owner] if *owner == game.winner_id => {}
        [owner] => {
            return Err(DomainError::validation(
                ValidationKind::WinnerMismatch,
                format!(
                    "WIN event belongs to player {owner}, but the winner is {}",
                    game.winner_id
                ),
            ));
        }
        _ => {
            return Err(DomainError::validation(
                ValidationKind::WinnerMismatch,
                format!("A game has at most one WIN event, got {}", win_owners.len()),
            ));
        }
    }
    Ok(())
}

/// Record a finished game with its roles and events, then settle it.
pub async fn record_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: NewGame,
) -> Result<GameLayout, DomainError> {
    validate_shape(&game)?;
    for p in &game.players {
        players_repo::require_player(conn, p.player_id).await?;
    }

    let stored = games_repo::create_game(conn, game.winner_id).await?;
    let mut events = 0usize;
    for p in &game.players {
        let role = games_repo::add_role(conn, stored.id, p.player_id, &p.role).await?;
        for e in &p.events {
            games_repo::add_event(conn, role.role_id, e.event_type, e.points).await?;
            events += 1;
        }
    }

    settle_game(conn, stored.id).await?;
    info!(
        game_id = stored.id,
        winner_id = game.winner_id,
        players = game.players.len(),
        events,
        "game recorded"
    );
    games_repo::game_layout(conn, stored.id).await
}

/// Undo a game's effect on balances, then delete it.
pub async fn delete_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<(), DomainError> {
    games_repo::require_game(conn, game_id).await?;

    let roles = games_repo::stored_roles_for_game(conn, game_id).await?;
    let mut entries = Vec::with_capacity(roles.len());
    for role in &roles {
        let player = players_repo::require_player(conn, role.player_id).await?;
        entries.push(ReversalInput {
            player_id: role.player_id,
            point_delta: role.point_delta,
            current_balance: player.balance,
        });
    }

    for reversal in settlement::reverse(&entries)? {
        players_repo::set_balance(conn, reversal.player_id, reversal.new_balance).await?;
    }
    games_repo::delete_game_rows(conn, game_id).await?;

    info!(game_id, roles = roles.len(), "game deleted");
    Ok(())
}

/// Latest games, newest first.
pub async fn list_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<GameLayout>, DomainError> {
    games_repo::recent_layouts(conn, GAME_LIST_LIMIT).await
}

pub async fn game_layout<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<GameLayout, DomainError> {
    games_repo::game_layout(conn, game_id).await
}

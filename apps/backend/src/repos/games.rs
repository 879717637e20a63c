//! Games repository: recorded games, their roles and scoring events.
//!
//! `get_roles_for_game` and `get_events_for_game` form the read model the
//! settlement engine consumes; everything else persists or presents games.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::{events_sea, games_sea, players_sea, roles_sea};
use crate::domain::settlement::{EventInput, EventType, RoleInput, RoleName};
use crate::entities::points_events::PointsEventType;
use crate::entities::{games, roles};
use crate::errors::domain::DomainError;

impl From<PointsEventType> for EventType {
    fn from(value: PointsEventType) -> Self {
        match value {
            PointsEventType::Win => EventType::Win,
            PointsEventType::Sell => EventType::Sell,
            PointsEventType::LossMultiplier => EventType::LossMultiplier,
            PointsEventType::FirstRoundLock => EventType::FirstRoundLock,
            PointsEventType::Points => EventType::Points,
        }
    }
}

impl From<EventType> for PointsEventType {
    fn from(value: EventType) -> Self {
        match value {
            EventType::Win => PointsEventType::Win,
            EventType::Sell => PointsEventType::Sell,
            EventType::LossMultiplier => PointsEventType::LossMultiplier,
            EventType::FirstRoundLock => PointsEventType::FirstRoundLock,
            EventType::Points => PointsEventType::Points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameLayout {
    pub game_id: i64,
    pub winner_id: Option<i64>,
    pub winner_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub players: Vec<LayoutEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutEntry {
    pub player_id: i64,
    pub player_name: String,
    pub role: String,
    pub point_delta: i64,
}

/// One role row as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRole {
    pub role_id: i64,
    pub game_id: i64,
    pub player_id: i64,
    pub role: String,
    pub point_delta: i64,
}

impl From<roles::Model> for StoredRole {
    fn from(model: roles::Model) -> Self {
        Self {
            role_id: model.id,
            game_id: model.game_id,
            player_id: model.player_id,
            role: model.role,
            point_delta: model.point_delta,
        }
    }
}

/// Roles of a game with each player's current balance; empty if none.
pub async fn get_roles_for_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<RoleInput>, DomainError> {
    let roles = roles_sea::find_by_game(conn, game_id).await?;
    let player_ids: Vec<i64> = roles.iter().map(|r| r.player_id).collect();
    let balances: HashMap<i64, i64> = players_sea::find_by_ids(conn, &player_ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p.balance))
        .collect();

    roles
        .into_iter()
        .map(|r| {
            let current_balance = balances
                .get(&r.player_id)
                .copied()
                .ok_or_else(|| DomainError::player_not_found(r.player_id))?;
            Ok(RoleInput {
                role_id: r.id,
                player_id: r.player_id,
                role_name: RoleName::parse(&r.role),
                current_balance,
            })
        })
        .collect()
}

/// Scoring events of a game in recorded order; empty if none.
pub async fn get_events_for_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<EventInput>, DomainError> {
    let roles = roles_sea::find_by_game(conn, game_id).await?;
    let owner: HashMap<i64, i64> = roles.iter().map(|r| (r.id, r.player_id)).collect();
    let role_ids: Vec<i64> = roles.iter().map(|r| r.id).collect();

    let events = events_sea::find_by_roles(conn, &role_ids).await?;
    Ok(events
        .into_iter()
        .filter_map(|e| {
            owner.get(&e.role_id).map(|&player_id| EventInput {
                player_id,
                event_type: e.event_type.into(),
                points: e.points,
            })
        })
        .collect())
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    winner_id: i64,
) -> Result<games::Model, DomainError> {
    let dto = games_sea::GameCreate {
        winner_id: Some(winner_id),
        created_at: OffsetDateTime::now_utc(),
    };
    Ok(games_sea::create_game(conn, dto).await?)
}

pub async fn add_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    player_id: i64,
    role: &RoleName,
) -> Result<StoredRole, DomainError> {
    let dto = roles_sea::RoleCreate {
        game_id,
        player_id,
        role: role.as_str().to_string(),
    };
    Ok(roles_sea::create_role(conn, dto).await?.into())
}

pub async fn add_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role_id: i64,
    event_type: EventType,
    points: i64,
) -> Result<(), DomainError> {
    let dto = events_sea::EventCreate {
        role_id,
        event_type: event_type.into(),
        points,
    };
    events_sea::create_event(conn, dto).await?;
    Ok(())
}

pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, DomainError> {
    Ok(games_sea::require_game(conn, game_id).await?)
}

pub async fn stored_roles_for_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<StoredRole>, DomainError> {
    let rows = roles_sea::find_by_game(conn, game_id).await?;
    Ok(rows.into_iter().map(StoredRole::from).collect())
}

pub async fn set_point_delta<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role_id: i64,
    point_delta: i64,
) -> Result<(), DomainError> {
    roles_sea::set_point_delta(conn, role_id, point_delta).await?;
    Ok(())
}

pub async fn zero_all_point_deltas<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, DomainError> {
    Ok(roles_sea::zero_all_point_deltas(conn).await?)
}

/// Games in settlement order, oldest first.
pub async fn all_games_chronological<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<games::Model>, DomainError> {
    Ok(games_sea::find_all_chronological(conn).await?)
}

/// Remove a game with its roles and events. Balances are the caller's concern.
pub async fn delete_game_rows<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<(), DomainError> {
    let role_ids: Vec<i64> = roles_sea::find_by_game(conn, game_id)
        .await?
        .into_iter()
        .map(|r| r.id)
        .collect();
    events_sea::delete_by_roles(conn, &role_ids).await?;
    roles_sea::delete_by_game(conn, game_id).await?;
    if games_sea::delete_game(conn, game_id).await? == 0 {
        return Err(DomainError::game_not_found(game_id));
    }
    Ok(())
}

/// Number of recorded games the player holds a role in.
pub async fn games_played_by<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<u64, DomainError> {
    Ok(roles_sea::count_by_player(conn, player_id).await?)
}

pub async fn game_layout<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<GameLayout, DomainError> {
    let game = require_game(conn, game_id).await?;
    let mut layouts = layouts_for(conn, vec![game]).await?;
    layouts
        .pop()
        .ok_or_else(|| DomainError::game_not_found(game_id))
}

/// Newest `limit` games, newest first.
pub async fn recent_layouts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<GameLayout>, DomainError> {
    let games = games_sea::find_recent(conn, limit).await?;
    layouts_for(conn, games).await
}

async fn layouts_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    games: Vec<games::Model>,
) -> Result<Vec<GameLayout>, DomainError> {
    let game_ids: Vec<i64> = games.iter().map(|g| g.id).collect();
    let roles = roles_sea::find_by_games(conn, &game_ids).await?;

    let mut player_ids: Vec<i64> = roles.iter().map(|r| r.player_id).collect();
    player_ids.extend(games.iter().filter_map(|g| g.winner_id));
    player_ids.sort_unstable();
    player_ids.dedup();
    let names: HashMap<i64, String> = players_sea::find_by_ids(conn, &player_ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();

    let mut by_game: HashMap<i64, Vec<LayoutEntry>> = HashMap::new();
    for role in roles {
        by_game.entry(role.game_id).or_default().push(LayoutEntry {
            player_id: role.player_id,
            player_name: names.get(&role.player_id).cloned().unwrap_or_default(),
            role: role.role,
            point_delta: role.point_delta,
        });
    }

    Ok(games
        .into_iter()
        .map(|g| GameLayout {
            game_id: g.id,
            winner_id: g.winner_id,
            winner_name: g.winner_id.and_then(|id| names.get(&id).cloned()),
            created_at: g.created_at,
            players: by_game.remove(&g.id).unwrap_or_default(),
        })
        .collect())
}

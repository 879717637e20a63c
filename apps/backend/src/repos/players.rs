//! Player repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::players_sea as players_adapter;
use crate::entities::players;
use crate::errors::domain::DomainError;

/// Player domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub balance: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<players::Model> for Player {
    fn from(model: players::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            username: model.username,
            balance: model.balance,
            created_at: model.created_at,
        }
    }
}

pub async fn list_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Player>, DomainError> {
    let rows = players_adapter::find_all(conn).await?;
    Ok(rows.into_iter().map(Player::from).collect())
}

pub async fn find_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<Player>, DomainError> {
    Ok(players_adapter::find_by_id(conn, player_id)
        .await?
        .map(Player::from))
}

pub async fn require_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Player, DomainError> {
    find_player(conn, player_id)
        .await?
        .ok_or_else(|| DomainError::player_not_found(player_id))
}

pub async fn find_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<Player>, DomainError> {
    Ok(players_adapter::find_by_username(conn, username)
        .await?
        .map(Player::from))
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_ids: &[i64],
) -> Result<Vec<Player>, DomainError> {
    let rows = players_adapter::find_by_ids(conn, player_ids).await?;
    Ok(rows.into_iter().map(Player::from).collect())
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: String,
    username: String,
) -> Result<Player, DomainError> {
    let dto = players_adapter::PlayerCreate { name, username };
    Ok(players_adapter::create_player(conn, dto).await?.into())
}

pub async fn update_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    name: Option<String>,
    username: Option<String>,
) -> Result<Player, DomainError> {
    let dto = players_adapter::PlayerUpdate {
        id: player_id,
        name,
        username,
    };
    Ok(players_adapter::update_player(conn, dto).await?.into())
}

pub async fn set_balance<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    balance: i64,
) -> Result<(), DomainError> {
    players_adapter::set_balance(conn, player_id, balance).await?;
    Ok(())
}

pub async fn zero_all_balances<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, DomainError> {
    Ok(players_adapter::zero_all_balances(conn).await?)
}

/// Delete the player row only; callers remove dependent rows first.
pub async fn delete_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<(), DomainError> {
    let rows = players_adapter::delete_player(conn, player_id).await?;
    if rows == 0 {
        return Err(DomainError::player_not_found(player_id));
    }
    Ok(())
}

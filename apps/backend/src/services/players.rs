//! Player use-cases.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::players::{self as players_repo, Player};
use crate::repos::games as games_repo;

const MAX_NAME_LEN: usize = 64;

fn clean_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::PlayerName,
            "Name must not be empty",
        ));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation(
            ValidationKind::PlayerName,
            format!("Name must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(name.to_string())
}

fn clean_username(raw: &str) -> Result<String, DomainError> {
    let username = clean_name(raw)?;
    if username.chars().any(char::is_whitespace) {
        return Err(DomainError::validation(
            ValidationKind::PlayerName,
            "Username must not contain whitespace",
        ));
    }
    Ok(username)
}

async fn ensure_username_free<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
    except: Option<i64>,
) -> Result<(), DomainError> {
    match players_repo::find_by_username(conn, username).await? {
        Some(existing) if Some(existing.id) != except => Err(DomainError::conflict(
            ConflictKind::UsernameTaken,
            format!("Username '{username}' is already taken"),
        )),
        _ => Ok(()),
    }
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    username: &str,
) -> Result<Player, DomainError> {
    let name = clean_name(name)?;
    let username = clean_username(username)?;
    ensure_username_free(conn, &username, None).await?;

    let player = players_repo::create_player(conn, name, username).await?;
    info!(player_id = player.id, username = %player.username, "player created");
    Ok(player)
}

pub async fn list_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Player>, DomainError> {
    players_repo::list_players(conn).await
}

pub async fn find_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Player, DomainError> {
    players_repo::require_player(conn, player_id).await
}

pub async fn find_player_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Player, DomainError> {
    players_repo::find_by_username(conn, username.trim())
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                crate::errors::domain::NotFoundKind::Player,
                format!("Player '{}' not found", username.trim()),
            )
        })
}

pub async fn update_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    name: Option<&str>,
    username: Option<&str>,
) -> Result<Player, DomainError> {
    let name = name.map(clean_name).transpose()?;
    let username = username.map(clean_username).transpose()?;
    if let Some(username) = &username {
        ensure_username_free(conn, username, Some(player_id)).await?;
    }

    let player = players_repo::update_player(conn, player_id, name, username).await?;
    info!(player_id, username = %player.username, "player updated");
    Ok(player)
}

/// Remove a player whose balance is exactly zero and who holds no role in any
/// recorded game. Deleting their games first keeps every game's deltas summing
/// to zero.
pub async fn delete_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Player, DomainError> {
    let player = players_repo::require_player(conn, player_id).await?;
    if player.balance != 0 {
        return Err(DomainError::conflict(
            ConflictKind::UnpaidBalance,
            format!(
                "Player '{}' still has a balance of {}",
                player.username, player.balance
            ),
        ));
    }

    let games = games_repo::games_played_by(conn, player_id).await?;
    if games > 0 {
        return Err(DomainError::conflict(
            ConflictKind::PlayerHasGames,
            format!(
                "Player '{}' appears in {games} recorded game(s); delete those games first",
                player.username
            ),
        ));
    }

    players_repo::delete_player(conn, player_id).await?;
    info!(player_id, username = %player.username, "player deleted");
    Ok(player)
}

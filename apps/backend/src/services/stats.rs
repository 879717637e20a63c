//! Statistics use-cases.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::errors::domain::DomainError;
use crate::repos::stats::{self as stats_repo, PlayerGames, PlayerHistory};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    /// `None` until some game has a dealer.
    pub dealer_win_percentage: Option<f64>,
    pub players: Vec<PlayerGames>,
}

pub async fn stats_summary<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<StatsSummary, DomainError> {
    Ok(StatsSummary {
        dealer_win_percentage: stats_repo::dealer_win_percentage(conn).await?,
        players: stats_repo::players_games_played(conn).await?,
    })
}

pub async fn num_games<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    stats_repo::num_games(conn).await
}

pub async fn player_history<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<PlayerHistory>, DomainError> {
    stats_repo::player_history(conn).await
}

//! SeaORM adapter for the players table.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::players;

pub mod dto;

pub use dto::{PlayerCreate, PlayerUpdate};

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .order_by(players::Column::Name, Order::Asc)
        .order_by(players::Column::Id, Order::Asc)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id).one(conn).await
}

pub async fn find_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::Username.eq(username))
        .one(conn)
        .await
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_ids: &[i64],
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    if player_ids.is_empty() {
        return Ok(Vec::new());
    }
    players::Entity::find()
        .filter(players::Column::Id.is_in(player_ids.iter().copied()))
        .all(conn)
        .await
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerCreate,
) -> Result<players::Model, sea_orm::DbErr> {
    let player = players::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        username: Set(dto.username),
        balance: Set(0),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };
    player.insert(conn).await
}

pub async fn update_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerUpdate,
) -> Result<players::Model, sea_orm::DbErr> {
    let existing = players::Entity::find_by_id(dto.id)
        .one(conn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::Custom(format!("PLAYER_NOT_FOUND:{}", dto.id)))?;

    let mut active: players::ActiveModel = existing.into();
    if let Some(name) = dto.name {
        active.name = Set(name);
    }
    if let Some(username) = dto.username {
        active.username = Set(username);
    }
    active.update(conn).await
}

pub async fn set_balance<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    balance: i64,
) -> Result<(), sea_orm::DbErr> {
    let result = players::Entity::update_many()
        .col_expr(players::Column::Balance, Expr::value(balance))
        .filter(players::Column::Id.eq(player_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::Custom(format!(
            "PLAYER_NOT_FOUND:{player_id}"
        )));
    }
    Ok(())
}

/// Zero every balance; first step of a full recompute.
pub async fn zero_all_balances<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, sea_orm::DbErr> {
    let result = players::Entity::update_many()
        .col_expr(players::Column::Balance, Expr::value(0i64))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = players::Entity::delete_by_id(player_id).exec(conn).await?;
    Ok(result.rows_affected)
}

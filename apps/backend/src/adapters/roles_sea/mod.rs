//! SeaORM adapter for the roles table.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::roles;

pub mod dto;

pub use dto::RoleCreate;

pub async fn create_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoleCreate,
) -> Result<roles::Model, sea_orm::DbErr> {
    let role = roles::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        player_id: Set(dto.player_id),
        role: Set(dto.role),
        point_delta: Set(0),
    };
    role.insert(conn).await
}

/// Roles of one game in insertion order.
pub async fn find_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<roles::Model>, sea_orm::DbErr> {
    roles::Entity::find()
        .filter(roles::Column::GameId.eq(game_id))
        .order_by(roles::Column::Id, Order::Asc)
        .all(conn)
        .await
}

pub async fn find_by_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_ids: &[i64],
) -> Result<Vec<roles::Model>, sea_orm::DbErr> {
    if game_ids.is_empty() {
        return Ok(Vec::new());
    }
    roles::Entity::find()
        .filter(roles::Column::GameId.is_in(game_ids.iter().copied()))
        .order_by(roles::Column::Id, Order::Asc)
        .all(conn)
        .await
}

pub async fn count_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    roles::Entity::find()
        .filter(roles::Column::PlayerId.eq(player_id))
        .count(conn)
        .await
}

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<roles::Model>, sea_orm::DbErr> {
    roles::Entity::find()
        .order_by(roles::Column::Id, Order::Asc)
        .all(conn)
        .await
}

pub async fn set_point_delta<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role_id: i64,
    point_delta: i64,
) -> Result<(), sea_orm::DbErr> {
    roles::Entity::update_many()
        .col_expr(roles::Column::PointDelta, Expr::value(point_delta))
        .filter(roles::Column::Id.eq(role_id))
        .exec(conn)
        .await?;
    Ok(())
}

pub async fn zero_all_point_deltas<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, sea_orm::DbErr> {
    let result = roles::Entity::update_many()
        .col_expr(roles::Column::PointDelta, Expr::value(0i64))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = roles::Entity::delete_many()
        .filter(roles::Column::GameId.eq(game_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

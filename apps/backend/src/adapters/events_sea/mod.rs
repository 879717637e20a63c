//! SeaORM adapter for the points_events table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::points_events;

pub mod dto;

pub use dto::EventCreate;

pub async fn create_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: EventCreate,
) -> Result<points_events::Model, sea_orm::DbErr> {
    let event = points_events::ActiveModel {
        id: NotSet,
        role_id: Set(dto.role_id),
        event_type: Set(dto.event_type),
        points: Set(dto.points),
    };
    event.insert(conn).await
}

/// Events for the given roles in the order they were recorded.
pub async fn find_by_roles<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role_ids: &[i64],
) -> Result<Vec<points_events::Model>, sea_orm::DbErr> {
    if role_ids.is_empty() {
        return Ok(Vec::new());
    }
    points_events::Entity::find()
        .filter(points_events::Column::RoleId.is_in(role_ids.iter().copied()))
        .order_by(points_events::Column::Id, Order::Asc)
        .all(conn)
        .await
}

pub async fn delete_by_roles<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role_ids: &[i64],
) -> Result<u64, sea_orm::DbErr> {
    if role_ids.is_empty() {
        return Ok(0);
    }
    let result = points_events::Entity::delete_many()
        .filter(points_events::Column::RoleId.is_in(role_ids.iter().copied()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum PointsEventType {
    #[sea_orm(string_value = "WIN")]
    Win,
    #[sea_orm(string_value = "SELL")]
    Sell,
    #[sea_orm(string_value = "LOSS_MULTIPLIER")]
    LossMultiplier,
    #[sea_orm(string_value = "FIRST_ROUND_LOCK")]
    FirstRoundLock,
    #[sea_orm(string_value = "POINTS")]
    Points,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "points_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "role_id")]
    pub role_id: i64,
    #[sea_orm(column_name = "event_type")]
    pub event_type: PointsEventType,
    pub points: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::roles::Entity",
        from = "Column::RoleId",
        to = "super::roles::Column::Id",
        on_delete = "Cascade"
    )]
    Role,
}

impl Related<super::roles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! SeaORM adapters. Functions here return `DbErr`; the repos map it to `DomainError`.

pub mod events_sea;
pub mod games_sea;
pub mod players_sea;
pub mod roles_sea;

//! Repositories: domain-facing free functions over the SeaORM adapters.

pub mod games;
pub mod players;
pub mod stats;

//! Use-cases shared by the HTTP routes and the ledger CLI.

pub mod games;
pub mod players;
pub mod settlement;
pub mod stats;

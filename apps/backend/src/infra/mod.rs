//! Infrastructure layer: database connection, state building, DB error mapping.

pub mod db;
pub mod db_errors;
pub mod state;

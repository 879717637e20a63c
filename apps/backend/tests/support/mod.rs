#![allow(dead_code)]

pub mod app_builder;
pub mod auth;
pub mod factory;
pub mod test_state;

pub use test_state::build_test_state;

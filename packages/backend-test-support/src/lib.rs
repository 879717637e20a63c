//! Test helpers shared by the backend unit and integration tests.
//!
//! Nothing here depends on backend types, so the ledger CLI tests can use it too.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;

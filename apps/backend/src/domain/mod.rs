//! Domain layer: pure settlement logic with no I/O.

pub mod settlement;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_settlement;

pub use settlement::{
    EventInput, EventType, RoleInput, RoleName, RoleSettlement, SettlementError,
};

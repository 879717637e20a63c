//! DTOs for players_sea adapter.

#[derive(Debug, Clone)]
pub struct PlayerCreate {
    pub name: String,
    pub username: String,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct PlayerUpdate {
    pub id: i64,
    pub name: Option<String>,
    pub username: Option<String>,
}

//! DTOs for roles_sea adapter.

#[derive(Debug, Clone)]
pub struct RoleCreate {
    pub game_id: i64,
    pub player_id: i64,
    pub role: String,
}

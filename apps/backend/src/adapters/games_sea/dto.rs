//! DTOs for games_sea adapter.

use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct GameCreate {
    pub winner_id: Option<i64>,
    pub created_at: OffsetDateTime,
}

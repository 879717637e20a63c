//! DTOs for events_sea adapter.

use crate::entities::points_events::PointsEventType;

#[derive(Debug, Clone)]
pub struct EventCreate {
    pub role_id: i64,
    pub event_type: PointsEventType,
    pub points: i64,
}

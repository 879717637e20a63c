pub mod admin_session;
pub mod path_ids;
pub mod validated_json;

pub use admin_session::AdminSession;
pub use path_ids::{GameId, PlayerId};
pub use validated_json::ValidatedJson;

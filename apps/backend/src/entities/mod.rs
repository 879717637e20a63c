pub mod games;
pub mod players;
pub mod points_events;
pub mod roles;

pub use games::Entity as Games;
pub use games::Model as Game;
pub use players::Entity as Players;
pub use players::Model as Player;
pub use points_events::Entity as PointsEvents;
pub use points_events::Model as PointsEvent;
pub use points_events::PointsEventType;
pub use roles::Entity as Roles;
pub use roles::Model as Role;

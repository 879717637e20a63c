use backend_test_support::unique_helpers::unique_username;
use gostop_backend::domain::settlement::{EventType, RoleName};
use gostop_backend::errors::DomainError;
use gostop_backend::repos::games::GameLayout;
use gostop_backend::repos::players::Player;
use gostop_backend::services::games::{self, NewEvent, NewGame, NewGamePlayer};
use gostop_backend::services::players;
use sea_orm::ConnectionTrait;

/// Player with a unique username derived from `name`.
pub async fn create_test_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Player, DomainError> {
    players::create_player(conn, name, &unique_username(name)).await
}

/// DEALER, SELLER, P1, P2 in that order.
pub async fn create_four_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<[Player; 4], DomainError> {
    Ok([
        create_test_player(conn, "Dealer").await?,
        create_test_player(conn, "Seller").await?,
        create_test_player(conn, "Pat").await?,
        create_test_player(conn, "Quinn").await?,
    ])
}

pub fn seat(player: &Player, role: &str, events: &[(EventType, i64)]) -> NewGamePlayer {
    NewGamePlayer {
        player_id: player.id,
        role: RoleName::parse(role),
        events: events
            .iter()
            .map(|&(event_type, points)| NewEvent { event_type, points })
            .collect(),
    }
}

/// Four-seat game: WIN 10 by P2, SELL 5 by the seller, LOSS_MULTIPLIER 2 on P1.
/// Settles to [0, +10, -35, +25].
pub async fn record_standard_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    table: &[Player; 4],
) -> Result<GameLayout, DomainError> {
    let [dealer, seller, p1, p2] = table;
    games::record_game(
        conn,
        NewGame {
            winner_id: p2.id,
            players: vec![
                seat(dealer, "DEALER", &[]),
                seat(seller, "SELLER", &[(EventType::Sell, 5)]),
                seat(p1, "P1", &[(EventType::LossMultiplier, 2)]),
                seat(p2, "P2", &[(EventType::Win, 10)]),
            ],
        },
    )
    .await
}

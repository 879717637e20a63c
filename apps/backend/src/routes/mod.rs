use actix_web::web;

pub mod auth;
pub mod games;
pub mod health;
pub mod players;
pub mod stats;

/// Every route of the ledger API. Used by the server and by tests, which
/// wrap it in the same middleware as `main.rs`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::configure_routes))
        .service(web::scope("/players").configure(players::configure_routes))
        .service(web::scope("/games").configure(games::configure_routes))
        .configure(auth::configure_routes)
        .configure(games::configure_recompute)
        .configure(stats::configure_routes);
}

use std::process;

use actix_web::{web, App, HttpServer};
use gostop_backend::config::db::{DbKind, RuntimeEnv};
use gostop_backend::infra::state::build_state;
use gostop_backend::middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
use gostop_backend::routes;
use gostop_backend::state::security_config::SecurityConfig;
use gostop_backend::telemetry;
use tracing::{error, info};

fn fail(message: impl std::fmt::Display) -> ! {
    error!("{message}");
    eprintln!("❌ {message}");
    process::exit(1);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_json_tracing();

    // Configuration comes from the environment only.
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| fail("BACKEND_PORT must be a valid port number"));

    let db_kind = DbKind::from_env().unwrap_or_else(|e| fail(e));
    let security = SecurityConfig::from_env(RuntimeEnv::Prod).unwrap_or_else(|e| fail(e));

    let app_state = build_state()
        .with_env(RuntimeEnv::Prod)
        .with_db(db_kind)
        .with_security(security)
        .build()
        .await
        .unwrap_or_else(|e| fail(format!("Failed to build application state: {e}")));

    info!(%host, port, db = %db_kind, "Starting Gostop ledger backend");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

use actix_web::http::StatusCode;
use actix_web::test;
use gostop_backend::state::app_state::AppState;
use gostop_backend::state::security_config::SecurityConfig;
use gostop_backend::AppError;
use serde_json::Value;

use crate::support::app_builder::create_test_app;
use crate::support::build_test_state;

#[actix_web::test]
async fn health_reports_db_and_migration() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-trace-id"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["migration"], "m20250301_000001_init");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[actix_web::test]
async fn health_without_db_reports_error_but_stays_up() {
    let app = create_test_app(AppState::new_without_db(SecurityConfig::for_tests())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["db"], "error");
    assert_eq!(body["migration"], "unknown");
}

use std::time::{Duration, SystemTime};

use actix_web::http::header::{AUTHORIZATION, SET_COOKIE};
use actix_web::http::StatusCode;
use actix_web::test;
use gostop_backend::auth::jwt::{mint_access_token, mint_refresh_token, verify_access_token};
use gostop_backend::AppError;
use serde_json::{json, Value};

use crate::common::assert_problem_details;
use crate::support::app_builder::create_test_app;
use crate::support::build_test_state;

fn refresh_cookie_value(resp: &actix_web::dev::ServiceResponse) -> String {
    resp.response()
        .cookies()
        .find(|c| c.name() == "refresh_token")
        .map(|c| c.value().to_string())
        .expect("refresh_token cookie")
}

#[actix_web::test]
async fn login_issues_access_token_and_refresh_cookie() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let security = state.security.clone();
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"username": "host", "password": "admin1234"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let set_cookie = resp
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(set_cookie.contains("HttpOnly"), "cookie: {set_cookie}");
    assert!(!refresh_cookie_value(&resp).is_empty());

    let body: Value = test::read_body_json(resp).await;
    let token = body["access_token"].as_str().expect("access_token");
    assert_eq!(verify_access_token(token, &security)?.sub, "host");
    Ok(())
}

#[actix_web::test]
async fn login_with_wrong_password_is_rejected() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"username": "host", "password": "nope"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS").await;
    Ok(())
}

#[actix_web::test]
async fn refresh_rotates_tokens() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let security = state.security.clone();
    let refresh = mint_refresh_token("host", SystemTime::now(), &security)?;
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/refresh")
        .cookie(actix_web::cookie::Cookie::new("refresh_token", refresh))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!refresh_cookie_value(&resp).is_empty());

    let body: Value = test::read_body_json(resp).await;
    let token = body["access_token"].as_str().expect("access_token");
    assert_eq!(verify_access_token(token, &security)?.sub, "host");
    Ok(())
}

#[actix_web::test]
async fn refresh_without_cookie_is_unauthorized() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).await;

    let resp = test::call_service(&app, test::TestRequest::post().uri("/refresh").to_request()).await;
    assert_problem_details(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_MISSING_REFRESH").await;
    Ok(())
}

#[actix_web::test]
async fn access_token_is_not_accepted_as_refresh() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let access = mint_access_token("host", SystemTime::now(), &state.security)?;
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/refresh")
        .cookie(actix_web::cookie::Cookie::new("refresh_token", access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_MISSING_REFRESH").await;
    Ok(())
}

#[actix_web::test]
async fn protected_route_401_codes() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let security = state.security.clone();
    let app = create_test_app(state).await;
    let body = json!({"name": "Kim", "username": "kim"});

    let resp = test::call_service(
        &app,
        test::TestRequest::post().uri("/players").set_json(&body).to_request(),
    )
    .await;
    assert_problem_details(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_MISSING_BEARER").await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/players")
            .insert_header((AUTHORIZATION, "Bearer garbage"))
            .set_json(&body)
            .to_request(),
    )
    .await;
    assert_problem_details(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_INVALID_JWT").await;

    let stale = mint_access_token(
        "host",
        SystemTime::now() - Duration::from_secs(60 * 60),
        &security,
    )?;
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/players")
            .insert_header((AUTHORIZATION, format!("Bearer {stale}")))
            .set_json(&body)
            .to_request(),
    )
    .await;
    assert_problem_details(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_EXPIRED_JWT").await;

    let refresh = mint_refresh_token("host", SystemTime::now(), &security)?;
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/players")
            .insert_header((AUTHORIZATION, format!("Bearer {refresh}")))
            .set_json(&body)
            .to_request(),
    )
    .await;
    assert_problem_details(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_INVALID_JWT").await;
    Ok(())
}

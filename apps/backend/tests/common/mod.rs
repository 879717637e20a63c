#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use backend_test_support::problem_details::{assert_problem, ExpectedProblem, ProblemBody};

// Logging is auto-installed for every test binary that includes `common`.
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Assert an `application/problem+json` response with the given status and code.
pub async fn assert_problem_details(
    resp: ServiceResponse<BoxBody>,
    status: StatusCode,
    code: &str,
) -> ProblemBody {
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    let problem = assert_problem(resp, ExpectedProblem::new(code, status)).await;
    assert!(!problem.trace_id.is_empty());
    assert_ne!(problem.trace_id, "unknown", "trace id should come from the request");
    problem
}

//! Assertions for `application/problem+json` error responses.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Mirror of the backend's problem body; kept local so tests never import it.
#[derive(Debug, Deserialize)]
pub struct ProblemBody {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// What a test expects from an error response.
#[derive(Debug, Clone, Copy)]
pub struct ExpectedProblem<'a> {
    pub code: &'a str,
    pub status: StatusCode,
    pub detail_contains: Option<&'a str>,
}

impl<'a> ExpectedProblem<'a> {
    pub fn new(code: &'a str, status: StatusCode) -> Self {
        Self {
            code,
            status,
            detail_contains: None,
        }
    }

    pub fn with_detail(mut self, fragment: &'a str) -> Self {
        self.detail_contains = Some(fragment);
        self
    }
}

/// Check status, code, optional detail fragment, and `x-trace-id` parity.
pub fn assert_problem_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected: ExpectedProblem<'_>,
) -> ProblemBody {
    assert_eq!(status, expected.status, "unexpected HTTP status");

    let problem: ProblemBody = serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "body is not problem+json ({e}): {}",
            String::from_utf8_lossy(body)
        )
    });

    let header_trace = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be ASCII");
    assert_eq!(
        problem.trace_id, header_trace,
        "trace_id in body should match x-trace-id header"
    );

    assert_eq!(problem.code, expected.code);
    assert_eq!(problem.status, expected.status.as_u16());
    assert!(problem.type_.ends_with(&problem.code));

    if let Some(fragment) = expected.detail_contains {
        assert!(
            problem.detail.contains(fragment),
            "expected detail to contain '{}', got '{}'",
            fragment,
            problem.detail
        );
    }

    problem
}

/// Consume a test `ServiceResponse` and assert it is the expected problem.
pub async fn assert_problem(
    resp: ServiceResponse<BoxBody>,
    expected: ExpectedProblem<'_>,
) -> ProblemBody {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;
    assert_problem_parts(status, &headers, &body, expected)
}

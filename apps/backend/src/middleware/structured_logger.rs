//! Access log: one `request_completed` event per request.
//!
//! 5xx log at error, 4xx at warn, everything else at info. Fields follow the
//! OpenTelemetry HTTP names so the JSON lines index without remapping.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;

use super::request_trace::TraceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Error,
    Warn,
    Info,
}

fn severity(status: StatusCode) -> Severity {
    if status.is_server_error() {
        Severity::Error
    } else if status.is_client_error() {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// What the access log records about one finished request.
struct Completed {
    method: String,
    path: String,
    trace_id: String,
    status: StatusCode,
    duration_ms: u64,
}

macro_rules! completed_event {
    ($level:ident, $c:expr) => {
        tracing::$level!(
            http.method = %$c.method,
            url.path = %$c.path,
            http.status_code = $c.status.as_u16(),
            duration_ms = $c.duration_ms,
            trace_id = %$c.trace_id,
            "request_completed"
        )
    };
}

impl Completed {
    fn emit(&self) {
        match severity(self.status) {
            Severity::Error => completed_event!(error, self),
            Severity::Warn => completed_event!(warn, self),
            Severity::Info => completed_event!(info, self),
        }
    }
}

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let trace_id = TraceId::of(&req);
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            Completed {
                method,
                path,
                trace_id,
                status,
                duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            }
            .emit();
            result
        })
    }
}

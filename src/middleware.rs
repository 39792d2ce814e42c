use std::any::Any;
use std::backtrace::Backtrace;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, Method, StatusCode, Uri},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{error, info, warn};

use crate::error::{message_body, AppError, INTERNAL_SERVER_ERROR};
use crate::AppState;

/// `[2026-10-16T12:00:00.000Z] GET /api/products?x=1`
pub fn request_line(at: DateTime<Utc>, method: &Method, uri: &Uri) -> String {
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    format!(
        "[{}] {} {}",
        at.to_rfc3339_opts(SecondsFormat::Millis, true),
        method,
        path
    )
}

/// Logs one request line for every incoming request.
pub async fn log_requests(request: Request, next: Next) -> Response {
    info!("{}", request_line(Utc::now(), request.method(), request.uri()));

    next.run(request).await
}

/// Lets the request through only with `Authorization: Bearer <configured token>`.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let expected = format!("Bearer {}", state.config.auth_token);
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|h| h == expected);

    if !authorized {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "Rejected request without valid bearer token"
        );
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// Turns a handler panic into a bare 500; the payload and a backtrace are logged.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail: &str = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else {
        "non-string panic payload"
    };
    error!(
        panic = detail,
        backtrace = %Backtrace::force_capture(),
        "Handler panicked"
    );

    message_body(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
}

use axum::{
    middleware::Next,
    response::{IntoResponse, Response},
    extract::Request,
    body::Body,
    http::{header, Method},
};
use crate::errors::AppError;

// Rejects state-changing requests whose Origin names a different host.
// Requests without an Origin header (curl, same-origin form posts in older
// browsers) are let through.
pub async fn require_same_origin(
    req: Request<Body>,
    next: Next,
) -> Response {
    if !is_state_changing(req.method()) {
        return next.run(req).await;
    }

    if let Some(origin) = foreign_origin(&req) {
        tracing::warn!("Rejected {} {} from origin {}", req.method(), req.uri().path(), origin);
        return AppError::Forbidden.into_response();
    }
    next.run(req).await
}

// The Origin header value when it is present and does not match Host.
fn foreign_origin(req: &Request<Body>) -> Option<String> {
    let origin = req.headers().get(header::ORIGIN)?;
    let origin = String::from_utf8_lossy(origin.as_bytes()).into_owned();
    let host = req.headers().get(header::HOST).and_then(|v| v.to_str().ok());

    match host {
        Some(host) if origin_matches_host(&origin, host) => None,
        _ => Some(origin),
    }
}

fn is_state_changing(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH | Method::DELETE)
}

fn origin_matches_host(origin: &str, host: &str) -> bool {
    let authority = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"));
    authority.is_some_and(|a| a.trim_end_matches('/').eq_ignore_ascii_case(host))
}

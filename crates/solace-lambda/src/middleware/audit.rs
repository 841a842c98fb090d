use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::middleware::auth::AuthUser;

/// Logs every API request as a structured `api_request` event.
///
/// The user is only known once `require_auth` has run, so it is read from
/// the response side.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = std::time::Instant::now();

    let response = next.run(req).await;

    let user = response
        .extensions()
        .get::<AuthUser>()
        .map(|u| u.sub.to_string());
    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        user = user.as_deref().unwrap_or("-"),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "api_request"
    );

    response
}

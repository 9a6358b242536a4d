use axum::{
    extract::{Request, State},
    http::{Method, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use super::ApiState;
use super::response::error_response;

fn is_read_only(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

/// Mutating requests need `Authorization: Bearer <ADMIN_TOKEN>` when a token is configured
pub async fn require_admin(State(state): State<ApiState>, request: Request, next: Next) -> Response {
    if is_read_only(request.method()) {
        return next.run(request).await;
    }

    let Some(expected) = state.admin_token() else {
        debug!("No admin token configured, allowing {} {}", request.method(), request.uri().path());
        return next.run(request).await;
    };

    if bearer_token(&request) == Some(expected) {
        return next.run(request).await;
    }

    warn!(
        "Rejected {} {}: missing or invalid admin token",
        request.method(),
        request.uri().path()
    );
    error_response(StatusCode::UNAUTHORIZED, "Admin token required")
}

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{adapters::http::app_state::AppState, app_error::AppError};

/// Rejects the request unless it carries the admin secret as
/// `Authorization: Bearer <secret>`.
pub async fn admin_auth(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let secret = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(extract_bearer);

    app_state.admin_use_cases.authorize(secret)?;

    Ok(next.run(request).await)
}

/// Extract the credential from an Authorization Bearer header. The credential
/// is passed on as sent.
pub fn extract_bearer(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
    routing::post,
};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
};

#[derive(Deserialize)]
struct LoginPayload {
    password: Option<String>,
}

#[derive(Serialize)]
struct LoginResponse {
    success: bool,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

async fn login(
    State(app_state): State<AppState>,
    payload: Result<Json<LoginPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(|_| AppError::InvalidInput("Password required".into()))?;

    app_state
        .admin_use_cases
        .login(payload.password.as_deref())?;

    Ok(Json(LoginResponse { success: true }))
}

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::{WaitlistEntry, WaitlistStats},
    use_cases::waitlist::RegistrationRequest,
};

#[derive(Serialize)]
struct RegisteredResponse {
    message: &'static str,
    id: Uuid,
}

#[derive(Deserialize)]
struct ListQuery {
    role: Option<String>,
    status: Option<String>,
}

#[derive(Deserialize)]
struct StatusPayload {
    status: Option<String>,
}

/// Public signup.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(register))
}

/// Review endpoints. The admin_auth middleware is applied in mod.rs when
/// merging this router.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/all", get(list_entries))
        .route("/stats", get(stats))
        .route("/{id}", get(get_entry))
        .route("/{id}/status", patch(update_status))
}

async fn register(
    State(app_state): State<AppState>,
    payload: Result<Json<RegistrationRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::InvalidInput(format!("Malformed registration: {}", rejection.body_text()))
    })?;

    let entry = app_state.waitlist_use_cases.register(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisteredResponse {
            message: "Successfully saved to waitlist!",
            id: entry.id,
        }),
    ))
}

async fn list_entries(
    State(app_state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let entries: Vec<WaitlistEntry> = app_state
        .waitlist_use_cases
        .list(query.role.as_deref(), query.status.as_deref())
        .await?;
    Ok(Json(entries))
}

async fn stats(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stats: WaitlistStats = app_state.waitlist_use_cases.stats().await?;
    Ok(Json(stats))
}

async fn get_entry(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let entry = app_state.waitlist_use_cases.get(&id).await?;
    Ok(Json(entry))
}

async fn update_status(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(|_| AppError::InvalidInput("Status is required".into()))?;
    let status = payload
        .status
        .ok_or_else(|| AppError::InvalidInput("Status is required".into()))?;

    let entry = app_state
        .waitlist_use_cases
        .update_status(&id, &status)
        .await?;
    Ok(Json(entry))
}

pub mod admin;
pub mod early_access;

use axum::{Router, middleware};

use crate::adapters::http::{app_state::AppState, middleware::admin_auth};

pub fn router(app_state: AppState) -> Router<AppState> {
    let early_access = early_access::router().merge(
        early_access::admin_router()
            .route_layer(middleware::from_fn_with_state(app_state, admin_auth)),
    );

    Router::new()
        .nest("/early-access", early_access)
        .nest("/admin", admin::router())
}

use crate::{
    adapters::http::app_state::AppState,
    application::ports::admin_auth::AdminAuth,
    infra::{
        admin_auth::StaticPasswordAdminAuth, config::AppConfig, error::InfraError,
        postgres_persistence,
    },
    use_cases::{
        admin::AdminUseCases,
        waitlist::{EntryStore, WaitlistUseCases},
    },
};
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state() -> Result<AppState, InfraError> {
    let config = AppConfig::from_env();

    let postgres_arc =
        Arc::new(postgres_persistence(&config.database_url, config.database_max_connections).await?);

    let entry_store = postgres_arc.clone() as Arc<dyn EntryStore>;
    let admin_auth =
        Arc::new(StaticPasswordAdminAuth::new(&config.admin_password)) as Arc<dyn AdminAuth>;

    let waitlist_use_cases = WaitlistUseCases::new(entry_store);
    let admin_use_cases = AdminUseCases::new(admin_auth);

    Ok(AppState {
        config: Arc::new(config),
        waitlist_use_cases: Arc::new(waitlist_use_cases),
        admin_use_cases: Arc::new(admin_use_cases),
    })
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "waitlist=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs), skipped when the file cannot be created
    let json_layer = File::create("app.log").ok().map(|file| {
        fmt::layer()
            .json()
            .with_writer(file)
            .with_current_span(true)
            .with_span_list(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}

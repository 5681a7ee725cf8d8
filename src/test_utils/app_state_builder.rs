//! Test app state builder for HTTP-level integration testing.
//!
//! This module provides `TestAppStateBuilder` which creates a minimal `AppState`
//! with in-memory mocks for testing HTTP endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::SecretString;

use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::{
        admin::AdminUseCases,
        waitlist::{EntryStore, WaitlistUseCases},
    },
    domain::entities::waitlist_entry::WaitlistEntry,
    infra::config::AppConfig,
    test_utils::{FailingEntryStore, FixedSecretAdminAuth, InMemoryEntryStore, TEST_ADMIN_SECRET},
};

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let entry = create_test_entry(|e| e.email = "jane@example.com".to_string());
///
/// let (app_state, store) = TestAppStateBuilder::new()
///     .with_entry(entry)
///     .build_with_store();
/// ```
pub struct TestAppStateBuilder {
    entries: Vec<WaitlistEntry>,
    failing_store: bool,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            entries: vec![],
            failing_store: false,
        }
    }

    /// Add an entry to the test store.
    pub fn with_entry(mut self, entry: WaitlistEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Use a store whose every operation fails with a database error.
    pub fn with_failing_store(mut self) -> Self {
        self.failing_store = true;
        self
    }

    /// Build the AppState and return the in-memory store for test assertions.
    ///
    /// # Panics
    ///
    /// When combined with `with_failing_store`, which has no store to return.
    pub fn build_with_store(self) -> (AppState, Arc<InMemoryEntryStore>) {
        assert!(
            !self.failing_store,
            "build_with_store cannot return a failing store; use build()"
        );
        let store = Arc::new(InMemoryEntryStore::with_entries(self.entries));
        let app_state = build_state(store.clone());
        (app_state, store)
    }

    /// Build the AppState with all configured mocks.
    pub fn build(self) -> AppState {
        if self.failing_store {
            return build_state(Arc::new(FailingEntryStore));
        }
        let store = Arc::new(InMemoryEntryStore::with_entries(self.entries));
        build_state(store)
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn build_state(store: Arc<dyn EntryStore>) -> AppState {
    let config = Arc::new(AppConfig {
        bind_addr: "127.0.0.1:5000".parse::<SocketAddr>().unwrap(),
        database_url: String::new(),
        database_max_connections: 1,
        cors_origin: HeaderValue::from_static("http://localhost:5173"),
        admin_password: SecretString::from(TEST_ADMIN_SECRET.to_string()),
    });

    AppState {
        config,
        waitlist_use_cases: Arc::new(WaitlistUseCases::new(store)),
        admin_use_cases: Arc::new(AdminUseCases::new(Arc::new(
            FixedSecretAdminAuth::default(),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_entry;

    #[tokio::test]
    async fn build_with_store_shares_the_seeded_store() {
        let entry = create_test_entry(|_| {});
        let (app_state, store) = TestAppStateBuilder::new()
            .with_entry(entry.clone())
            .build_with_store();

        assert_eq!(store.get_all(), vec![entry.clone()]);
        let listed = app_state.waitlist_use_cases.list(None, None).await.unwrap();
        assert_eq!(listed, vec![entry]);
    }

    #[tokio::test]
    async fn build_with_failing_store_fails_operations() {
        let app_state = TestAppStateBuilder::new().with_failing_store().build();
        assert!(app_state.waitlist_use_cases.stats().await.is_err());
    }

    #[test]
    #[should_panic(expected = "build_with_store cannot return a failing store")]
    fn build_with_store_rejects_failing_store() {
        let _ = TestAppStateBuilder::new()
            .with_failing_store()
            .build_with_store();
    }
}

//! In-memory mock implementations for the waitlist store and admin gate.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::{ports::admin_auth::AdminAuth, use_cases::waitlist::EntryStore},
    domain::entities::{
        entry_status::EntryStatus,
        waitlist_entry::{EntryFilter, WaitlistEntry},
    },
};

pub const TEST_ADMIN_SECRET: &str = "test-admin-secret";

/// In-memory implementation of EntryStore for testing.
///
/// Enforces email uniqueness on insert like the database's unique index.
#[derive(Default)]
pub struct InMemoryEntryStore {
    pub entries: Mutex<Vec<WaitlistEntry>>,
    calls: AtomicUsize,
    blind_lookups: bool,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with initial entries for testing.
    pub fn with_entries(entries: Vec<WaitlistEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    /// Make `find_by_email` always miss, so duplicates are only caught by
    /// `insert`. Simulates two registrations racing past the lookup.
    pub fn with_blind_lookups(mut self) -> Self {
        self.blind_lookups = true;
        self
    }

    /// Get all entries in insertion order (for test assertions).
    pub fn get_all(&self) -> Vec<WaitlistEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Number of store operations performed so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn insert(&self, entry: &WaitlistEntry) -> AppResult<WaitlistEntry> {
        self.record_call();
        let mut entries = self.entries.lock().unwrap();

        if entries
            .iter()
            .any(|e| e.email == entry.email || e.id == entry.id)
        {
            return Err(AppError::Conflict(
                "A record with this value already exists".into(),
            ));
        }

        entries.push(entry.clone());
        Ok(entry.clone())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<WaitlistEntry>> {
        self.record_call();
        if self.blind_lookups {
            return Ok(None);
        }
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<WaitlistEntry>> {
        self.record_call();
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn update_status_by_id(
        &self,
        id: Uuid,
        status: EntryStatus,
    ) -> AppResult<Option<WaitlistEntry>> {
        self.record_call();
        let mut entries = self.entries.lock().unwrap();
        let Some(entry) = entries.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };

        entry.status = status;
        Ok(Some(entry.clone()))
    }

    async fn query_by_filter(&self, filter: EntryFilter) -> AppResult<Vec<WaitlistEntry>> {
        self.record_call();
        let mut matching: Vec<WaitlistEntry> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();

        matching.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(matching)
    }

    async fn count_by_filter(&self, filter: EntryFilter) -> AppResult<i64> {
        self.record_call();
        let count = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| filter.matches(e))
            .count();
        Ok(count as i64)
    }
}

/// Store whose every operation fails like an unreachable database.
#[derive(Default)]
pub struct FailingEntryStore;

impl FailingEntryStore {
    fn fail<T>() -> AppResult<T> {
        Err(AppError::Database("Database operation failed".into()))
    }
}

#[async_trait]
impl EntryStore for FailingEntryStore {
    async fn insert(&self, _entry: &WaitlistEntry) -> AppResult<WaitlistEntry> {
        Self::fail()
    }

    async fn find_by_email(&self, _email: &str) -> AppResult<Option<WaitlistEntry>> {
        Self::fail()
    }

    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<WaitlistEntry>> {
        Self::fail()
    }

    async fn update_status_by_id(
        &self,
        _id: Uuid,
        _status: EntryStatus,
    ) -> AppResult<Option<WaitlistEntry>> {
        Self::fail()
    }

    async fn query_by_filter(&self, _filter: EntryFilter) -> AppResult<Vec<WaitlistEntry>> {
        Self::fail()
    }

    async fn count_by_filter(&self, _filter: EntryFilter) -> AppResult<i64> {
        Self::fail()
    }
}

/// Admin gate that accepts exactly one plain-text secret.
pub struct FixedSecretAdminAuth {
    secret: String,
}

impl FixedSecretAdminAuth {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.to_string(),
        }
    }
}

impl Default for FixedSecretAdminAuth {
    fn default() -> Self {
        Self::new(TEST_ADMIN_SECRET)
    }
}

impl AdminAuth for FixedSecretAdminAuth {
    fn verify(&self, secret: &str) -> bool {
        self.secret == secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::entry_role::EntryRole;
    use crate::test_utils::{
        create_test_entry, create_test_tasker_entry, test_datetime_offset_minutes,
    };

    #[tokio::test]
    async fn test_insert_rejects_duplicate_email() {
        let store = InMemoryEntryStore::new();
        let entry = create_test_entry(|_| {});

        store.insert(&entry).await.unwrap();
        let duplicate = create_test_tasker_entry(|e| e.email = entry.email.clone());
        let result = store.insert(&duplicate).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(store.get_all().len(), 1);
    }

    #[tokio::test]
    async fn test_query_orders_newest_first() {
        let a = create_test_entry(|e| e.created_at = test_datetime_offset_minutes(1));
        let b = create_test_tasker_entry(|e| e.created_at = test_datetime_offset_minutes(3));
        let c = create_test_entry(|e| {
            e.email = "c@example.com".into();
            e.created_at = test_datetime_offset_minutes(2);
        });
        let store = InMemoryEntryStore::with_entries(vec![a.clone(), b.clone(), c.clone()]);

        let all = store.query_by_filter(EntryFilter::all()).await.unwrap();
        assert_eq!(all, vec![b, c.clone(), a.clone()]);

        let clients = store
            .query_by_filter(EntryFilter::by_role(EntryRole::Client))
            .await
            .unwrap();
        assert_eq!(clients, vec![c, a]);
    }

    #[tokio::test]
    async fn test_update_status_unknown_id_returns_none() {
        let store = InMemoryEntryStore::new();
        let result = store
            .update_status_by_id(Uuid::new_v4(), EntryStatus::Accepted)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_blind_lookups_miss_existing_entries() {
        let entry = create_test_entry(|_| {});
        let store = InMemoryEntryStore::with_entries(vec![entry.clone()]).with_blind_lookups();

        assert!(store.find_by_email(&entry.email).await.unwrap().is_none());
        assert!(store.find_by_id(entry.id).await.unwrap().is_some());
        assert_eq!(store.call_count(), 2);
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::validators::{
        is_valid_email, non_blank, normalize_email, parse_age, parse_answers,
    },
    domain::entities::{
        entry_role::EntryRole,
        entry_status::EntryStatus,
        waitlist_entry::{
            ClientAnswers, EntryFilter, RoleAnswers, StatusCounts, TaskerAnswers, WaitlistEntry,
            WaitlistStats,
        },
    },
};

const EMAIL_TAKEN: &str = "Email already registered";

// ============================================================================
// Store Contract
// ============================================================================

/// Persistence boundary for waitlist entries.
///
/// `insert` must reject a second entry with an email that is already stored
/// with `AppError::Conflict`. Listing is ordered by `created_at` descending.
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn insert(&self, entry: &WaitlistEntry) -> AppResult<WaitlistEntry>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<WaitlistEntry>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<WaitlistEntry>>;
    async fn update_status_by_id(
        &self,
        id: Uuid,
        status: EntryStatus,
    ) -> AppResult<Option<WaitlistEntry>>;
    async fn query_by_filter(&self, filter: EntryFilter) -> AppResult<Vec<WaitlistEntry>>;
    async fn count_by_filter(&self, filter: EntryFilter) -> AppResult<i64>;
}

// ============================================================================
// Input Types
// ============================================================================

/// Raw signup form as submitted by the public page. Every field is optional
/// here so that missing values surface as validation errors. Answer bundles
/// stay untyped until the role decides which one is read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<serde_json::Value>,
    pub role: Option<String>,
    pub client_answers: Option<serde_json::Value>,
    pub tasker_answers: Option<serde_json::Value>,
}

struct ValidRegistration {
    name: String,
    email: String,
    age: i32,
    answers: RoleAnswers,
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct WaitlistUseCases {
    store: Arc<dyn EntryStore>,
}

impl WaitlistUseCases {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }

    /// Register a new applicant. The entry starts out `pending`.
    #[instrument(skip(self, request))]
    pub async fn register(&self, request: RegistrationRequest) -> AppResult<WaitlistEntry> {
        let registration = validate_registration(request)?;

        if self
            .store
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            debug!("Rejecting registration for an email that is already on the waitlist");
            return Err(AppError::Conflict(EMAIL_TAKEN.into()));
        }

        let entry = WaitlistEntry {
            id: Uuid::new_v4(),
            name: registration.name,
            email: registration.email,
            age: registration.age,
            answers: registration.answers,
            status: EntryStatus::Pending,
            created_at: Utc::now(),
        };

        // Concurrent signups can both pass the lookup; the unique index rejects one.
        let stored = self.store.insert(&entry).await.map_err(|err| match err {
            AppError::Conflict(_) => AppError::Conflict(EMAIL_TAKEN.into()),
            other => other,
        })?;

        info!(entry_id = %stored.id, role = %stored.role(), "Waitlist entry registered");
        Ok(stored)
    }

    /// List entries, newest first. Unknown filter values match nothing.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        role: Option<&str>,
        status: Option<&str>,
    ) -> AppResult<Vec<WaitlistEntry>> {
        let (Ok(role), Ok(status)) = (
            parse_filter::<EntryRole>(role),
            parse_filter::<EntryStatus>(status),
        ) else {
            debug!("Unknown filter value, returning no entries");
            return Ok(Vec::new());
        };

        self.store.query_by_filter(EntryFilter { role, status }).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> AppResult<WaitlistEntry> {
        let id = parse_entry_id(id)?;
        self.store.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    /// Move an entry to `new_status`. Any status may follow any other,
    /// including itself.
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: &str, new_status: &str) -> AppResult<WaitlistEntry> {
        let status: EntryStatus = new_status.parse().map_err(|_| {
            AppError::InvalidInput("Status must be one of: pending, accepted, rejected".into())
        })?;
        let id = parse_entry_id(id)?;

        let updated = self
            .store
            .update_status_by_id(id, status)
            .await?
            .ok_or(AppError::NotFound)?;

        info!(entry_id = %updated.id, status = %updated.status, "Waitlist entry status updated");
        Ok(updated)
    }

    /// Dashboard counts, computed from the store on every call.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> AppResult<WaitlistStats> {
        let store = &self.store;
        let (total_users, total_clients, total_taskers, pending, accepted, rejected) = tokio::try_join!(
            store.count_by_filter(EntryFilter::all()),
            store.count_by_filter(EntryFilter::by_role(EntryRole::Client)),
            store.count_by_filter(EntryFilter::by_role(EntryRole::Tasker)),
            store.count_by_filter(EntryFilter::by_status(EntryStatus::Pending)),
            store.count_by_filter(EntryFilter::by_status(EntryStatus::Accepted)),
            store.count_by_filter(EntryFilter::by_status(EntryStatus::Rejected)),
        )?;

        Ok(WaitlistStats {
            total_users,
            total_clients,
            total_taskers,
            status_counts: StatusCounts {
                pending,
                accepted,
                rejected,
            },
        })
    }
}

// ============================================================================
// Validation
// ============================================================================

fn validate_registration(request: RegistrationRequest) -> AppResult<ValidRegistration> {
    let name = non_blank(request.name.as_deref());
    let email = non_blank(request.email.as_deref());
    let role = request.role.as_deref().filter(|r| !r.trim().is_empty());
    let age = request.age.as_ref().filter(|v| !v.is_null());

    let (Some(name), Some(email), Some(role), Some(age)) = (name, email, role, age) else {
        return Err(AppError::InvalidInput("All fields are required".into()));
    };

    let role: EntryRole = role.parse().map_err(|_| {
        AppError::InvalidInput("Role must be either client or tasker".into())
    })?;

    if !is_valid_email(email) {
        return Err(AppError::InvalidInput("Enter a valid email address".into()));
    }

    let age = parse_age(age)
        .ok_or_else(|| AppError::InvalidInput("Age must be a positive whole number".into()))?;

    // Only the bundle matching the role is read; the other one is dropped unseen.
    let answers = match role {
        EntryRole::Client => RoleAnswers::Client {
            client_answers: validate_client_answers(parse_answers(request.client_answers))?,
        },
        EntryRole::Tasker => RoleAnswers::Tasker {
            tasker_answers: validate_tasker_answers(parse_answers(request.tasker_answers))?,
        },
    };

    Ok(ValidRegistration {
        name: name.to_string(),
        email: normalize_email(email),
        age,
        answers,
    })
}

fn validate_client_answers(answers: ClientAnswers) -> AppResult<ClientAnswers> {
    let (Some(task_type), Some(usage_frequency), Some(contact_method)) = (
        non_blank(Some(&answers.task_type)),
        non_blank(Some(&answers.usage_frequency)),
        non_blank(Some(&answers.contact_method)),
    ) else {
        return Err(AppError::InvalidInput(
            "Please answer all client questions".into(),
        ));
    };

    Ok(ClientAnswers {
        task_type: task_type.to_string(),
        usage_frequency: usage_frequency.to_string(),
        contact_method: contact_method.to_string(),
    })
}

fn validate_tasker_answers(answers: TaskerAnswers) -> AppResult<TaskerAnswers> {
    let (Some(services_offered), Some(experience_level), Some(weekly_availability)) = (
        non_blank(Some(&answers.services_offered)),
        non_blank(Some(&answers.experience_level)),
        non_blank(Some(&answers.weekly_availability)),
    ) else {
        return Err(AppError::InvalidInput(
            "Please answer all tasker questions".into(),
        ));
    };

    Ok(TaskerAnswers {
        services_offered: services_offered.to_string(),
        experience_level: experience_level.to_string(),
        weekly_availability: weekly_availability.to_string(),
    })
}

/// `Ok(None)` for an absent or empty filter, `Err` for an unknown value.
fn parse_filter<T: std::str::FromStr>(raw: Option<&str>) -> Result<Option<T>, ()> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| ()),
    }
}

/// A malformed id cannot name an existing entry.
fn parse_entry_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id.trim()).map_err(|_| AppError::NotFound)
}

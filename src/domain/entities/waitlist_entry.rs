use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{entry_role::EntryRole, entry_status::EntryStatus};

/// Answers collected from applicants registering as clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientAnswers {
    pub task_type: String,
    pub usage_frequency: String,
    pub contact_method: String,
}

/// Answers collected from applicants registering as taskers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskerAnswers {
    pub services_offered: String,
    pub experience_level: String,
    pub weekly_availability: String,
}

/// Role of an entry together with the answer set that belongs to it.
///
/// Serializes as `{"role": "client", "clientAnswers": {..}}` or
/// `{"role": "tasker", "taskerAnswers": {..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleAnswers {
    Client {
        #[serde(rename = "clientAnswers")]
        client_answers: ClientAnswers,
    },
    Tasker {
        #[serde(rename = "taskerAnswers")]
        tasker_answers: TaskerAnswers,
    },
}

impl RoleAnswers {
    pub fn role(&self) -> EntryRole {
        match self {
            RoleAnswers::Client { .. } => EntryRole::Client,
            RoleAnswers::Tasker { .. } => EntryRole::Tasker,
        }
    }

    pub fn client_answers(&self) -> Option<&ClientAnswers> {
        match self {
            RoleAnswers::Client { client_answers } => Some(client_answers),
            RoleAnswers::Tasker { .. } => None,
        }
    }

    pub fn tasker_answers(&self) -> Option<&TaskerAnswers> {
        match self {
            RoleAnswers::Tasker { tasker_answers } => Some(tasker_answers),
            RoleAnswers::Client { .. } => None,
        }
    }

    /// The answer set as a JSON document, for storage.
    pub fn answers_json(&self) -> serde_json::Value {
        let value = match self {
            RoleAnswers::Client { client_answers } => serde_json::to_value(client_answers),
            RoleAnswers::Tasker { tasker_answers } => serde_json::to_value(tasker_answers),
        };
        value.unwrap_or(serde_json::Value::Null)
    }
}

/// One waitlist registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i32,
    #[serde(flatten)]
    pub answers: RoleAnswers,
    pub status: EntryStatus,
    pub created_at: DateTime<Utc>,
}

impl WaitlistEntry {
    pub fn role(&self) -> EntryRole {
        self.answers.role()
    }
}

/// Optional role/status constraints for listing and counting entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub role: Option<EntryRole>,
    pub status: Option<EntryStatus>,
}

impl EntryFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_role(role: EntryRole) -> Self {
        Self {
            role: Some(role),
            status: None,
        }
    }

    pub fn by_status(status: EntryStatus) -> Self {
        Self {
            role: None,
            status: Some(status),
        }
    }

    pub fn matches(&self, entry: &WaitlistEntry) -> bool {
        self.role.is_none_or(|role| entry.role() == role)
            && self.status.is_none_or(|status| entry.status == status)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: i64,
    pub accepted: i64,
    pub rejected: i64,
}

/// Aggregate counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistStats {
    pub total_users: i64,
    pub total_clients: i64,
    pub total_taskers: i64,
    pub status_counts: StatusCounts,
}

use serde::{Deserialize, Serialize};

/// Applicant category. Decides which answer set an entry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "waitlist_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntryRole {
    Client,
    Tasker,
}

impl EntryRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryRole::Client => "client",
            EntryRole::Tasker => "tasker",
        }
    }
}

impl std::fmt::Display for EntryRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntryRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(EntryRole::Client),
            "tasker" => Ok(EntryRole::Tasker),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

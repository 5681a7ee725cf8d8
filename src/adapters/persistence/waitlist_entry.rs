use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::{PostgresPersistence, parse_json_with_fallback},
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::EntryStore,
    domain::entities::{
        entry_role::EntryRole,
        entry_status::EntryStatus,
        waitlist_entry::{EntryFilter, RoleAnswers, WaitlistEntry},
    },
};

const ENTRY_COLUMNS: &str = "id, name, email, age, role, status, answers, created_at";

fn row_to_entry(row: sqlx::postgres::PgRow) -> WaitlistEntry {
    let id: Uuid = row.get("id");
    let role: EntryRole = row.get("role");
    let answers_json: serde_json::Value = row.get("answers");
    let entity_id = id.to_string();

    let answers = match role {
        EntryRole::Client => RoleAnswers::Client {
            client_answers: parse_json_with_fallback(
                &answers_json,
                "answers",
                "waitlist_entry",
                &entity_id,
            ),
        },
        EntryRole::Tasker => RoleAnswers::Tasker {
            tasker_answers: parse_json_with_fallback(
                &answers_json,
                "answers",
                "waitlist_entry",
                &entity_id,
            ),
        },
    };

    WaitlistEntry {
        id,
        name: row.get("name"),
        email: row.get("email"),
        age: row.get("age"),
        answers,
        status: row.get("status"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl EntryStore for PostgresPersistence {
    async fn insert(&self, entry: &WaitlistEntry) -> AppResult<WaitlistEntry> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO waitlist_entries (id, name, email, age, role, status, answers, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(entry.id)
        .bind(&entry.name)
        .bind(&entry.email)
        .bind(entry.age)
        .bind(entry.role())
        .bind(entry.status)
        .bind(entry.answers.answers_json())
        .bind(entry.created_at)
        .fetch_one(self.pool())
        .await
        .map_err(AppError::from)?;

        Ok(row_to_entry(row))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<WaitlistEntry>> {
        let row = sqlx::query(&format!(
            "SELECT {ENTRY_COLUMNS} FROM waitlist_entries WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;

        Ok(row.map(row_to_entry))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<WaitlistEntry>> {
        let row = sqlx::query(&format!(
            "SELECT {ENTRY_COLUMNS} FROM waitlist_entries WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;

        Ok(row.map(row_to_entry))
    }

    async fn update_status_by_id(
        &self,
        id: Uuid,
        status: EntryStatus,
    ) -> AppResult<Option<WaitlistEntry>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE waitlist_entries
            SET status = $2
            WHERE id = $1
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;

        Ok(row.map(row_to_entry))
    }

    async fn query_by_filter(&self, filter: EntryFilter) -> AppResult<Vec<WaitlistEntry>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM waitlist_entries
            WHERE ($1::waitlist_role IS NULL OR role = $1)
              AND ($2::waitlist_status IS NULL OR status = $2)
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(filter.role)
        .bind(filter.status)
        .fetch_all(self.pool())
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_entry).collect())
    }

    async fn count_by_filter(&self, filter: EntryFilter) -> AppResult<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM waitlist_entries
            WHERE ($1::waitlist_role IS NULL OR role = $1)
              AND ($2::waitlist_status IS NULL OR status = $2)
            "#,
        )
        .bind(filter.role)
        .bind(filter.status)
        .fetch_one(self.pool())
        .await
        .map_err(AppError::from)?;

        Ok(row.0)
    }
}

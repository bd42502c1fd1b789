//! Interview persistence — pluggable, trait-based record store.
//!
//! Default: `PgInterviewStore` (PostgreSQL via sqlx).
//! `AppState` holds an `Arc<dyn InterviewStore>`.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::interview::InterviewRecord;

/// Storage for interview records. Writes are all-or-nothing.
#[async_trait]
pub trait InterviewStore: Send + Sync {
    async fn insert(&self, record: &InterviewRecord) -> Result<()>;

    async fn get(&self, id: Uuid) -> Result<Option<InterviewRecord>>;

    /// Most recent records for a user, newest first.
    async fn list_for_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<InterviewRecord>>;
}

pub struct PgInterviewStore {
    pool: PgPool,
}

impl PgInterviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterviewStore for PgInterviewStore {
    async fn insert(&self, record: &InterviewRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO interviews
                (id, user_id, job_title, job_description, interview_date,
                 resume_text, questions, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(&record.job_title)
        .bind(&record.job_description)
        .bind(record.interview_date)
        .bind(&record.resume_text)
        .bind(&record.questions)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<InterviewRecord>> {
        let record = sqlx::query_as::<_, InterviewRecord>("SELECT * FROM interviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn list_for_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<InterviewRecord>> {
        let records = sqlx::query_as::<_, InterviewRecord>(
            "SELECT * FROM interviews WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }
}

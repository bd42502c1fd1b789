use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted interview-prep submission and the questions generated for it.
/// Written once per successful submission; never updated or deleted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRecord {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub job_title: String,
    pub job_description: String,
    pub interview_date: NaiveDate,
    pub resume_text: String,
    pub questions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

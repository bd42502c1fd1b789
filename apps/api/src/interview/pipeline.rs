//! Interview Prep — orchestrates question generation for one submission.
//!
//! Flow: validate → build prompt → generate (with rate-limit backoff) →
//!       normalize questions → persist record → return response.
//!
//! Nothing is written unless generation succeeds. A persistence failure after
//! generation is reported as an error and the questions are not returned.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::prompts::build_question_prompt;
use crate::interview::questions::{normalize_questions, BlankLinePolicy};
use crate::interview::store::InterviewStore;
use crate::llm_client::GenerationClient;
use crate::models::interview::InterviewRecord;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Submission as received from the client. Every field is optional here so
/// that missing ones surface as a validation error rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewPrepPayload {
    pub job_title: Option<String>,
    pub job_description: Option<String>,
    pub interview_date: Option<String>,
    pub resume_text: Option<String>,
    /// Authenticated user, when the identity layer supplied one.
    pub user_id: Option<Uuid>,
}

/// A validated submission.
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewRequest {
    pub job_title: String,
    pub job_description: String,
    pub interview_date: NaiveDate,
    pub resume_text: String,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewPrepResponse {
    pub message: String,
    pub id: Uuid,
    pub questions: Vec<String>,
}

impl InterviewPrepPayload {
    /// Checks that all four fields are present and non-blank. Values are kept
    /// exactly as sent; only the interview date is parsed.
    pub fn validate(self) -> Result<InterviewRequest, AppError> {
        let mut missing = Vec::new();
        let job_title = required(self.job_title, "jobTitle", &mut missing);
        let job_description = required(self.job_description, "jobDescription", &mut missing);
        let interview_date = required(self.interview_date, "interviewDate", &mut missing);
        let resume_text = required(self.resume_text, "resumeText", &mut missing);

        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let interview_date = parse_interview_date(&interview_date.unwrap_or_default())?;

        Ok(InterviewRequest {
            job_title: job_title.unwrap_or_default(),
            job_description: job_description.unwrap_or_default(),
            interview_date,
            resume_text: resume_text.unwrap_or_default(),
            user_id: self.user_id,
        })
    }
}

fn required(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            missing.push(field);
            None
        }
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (the date part is kept).
pub fn parse_interview_date(raw: &str) -> Result<NaiveDate, AppError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| {
            AppError::Validation(format!(
                "interviewDate '{raw}' is not a valid date (expected YYYY-MM-DD)"
            ))
        })
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs one interview-prep submission end to end.
///
/// Steps, strictly sequential:
/// 1. validate payload (no external calls on failure)
/// 2. build_question_prompt()
/// 3. llm.generate() → raw text (retries only on rate limiting)
/// 4. normalize_questions() → Vec<String>
/// 5. store.insert() → InterviewRecord
pub async fn prepare_interview(
    llm: &GenerationClient,
    store: &dyn InterviewStore,
    blank_lines: BlankLinePolicy,
    payload: InterviewPrepPayload,
) -> Result<InterviewPrepResponse, AppError> {
    let request = payload.validate()?;

    info!(
        "Preparing interview questions for '{}' (user: {:?}, backend: {})",
        request.job_title,
        request.user_id,
        llm.backend_name()
    );

    let prompt = build_question_prompt(
        &request.job_title,
        &request.job_description,
        &request.resume_text,
    );

    let raw = llm.generate(&prompt).await?;
    let questions = normalize_questions(&raw, blank_lines);

    let record = InterviewRecord {
        id: Uuid::new_v4(),
        user_id: request.user_id,
        job_title: request.job_title,
        job_description: request.job_description,
        interview_date: request.interview_date,
        resume_text: request.resume_text,
        questions,
        created_at: Utc::now(),
    };

    store
        .insert(&record)
        .await
        .map_err(|e| AppError::Persistence(format!("{e:#}")))?;

    info!(
        "Persisted interview {} with {} questions",
        record.id,
        record.questions.len()
    );

    Ok(InterviewPrepResponse {
        message: "Interview prepared successfully!".to_string(),
        id: record.id,
        questions: record.questions,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

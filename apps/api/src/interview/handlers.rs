//! Axum route handlers for the Interview Prep API.

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Multipart, Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::pipeline::{prepare_interview, InterviewPrepPayload, InterviewPrepResponse};
use crate::interview::resume_upload::extract_resume_text;
use crate::models::interview::InterviewRecord;
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: i64 = 20;
const MAX_LIST_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListInterviewsQuery {
    pub user_id: Uuid,
    pub limit: Option<i64>,
}

/// POST /api/interview-prep
///
/// Generates and stores interview questions for a typed (or client-extracted) resume.
pub async fn handle_interview_prep(
    State(state): State<AppState>,
    payload: Result<Json<InterviewPrepPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<InterviewPrepResponse>), AppError> {
    let Json(payload) = payload?;
    let response = prepare_interview(
        &state.llm,
        state.store.as_ref(),
        state.config.blank_lines,
        payload,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/interview-prep/upload
///
/// Multipart variant: same scalar fields plus an optional `resume` file part.
/// Text extracted from the file takes precedence over a `resumeText` field.
pub async fn handle_interview_prep_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<InterviewPrepResponse>), AppError> {
    let mut multipart = multipart?;
    let mut payload = InterviewPrepPayload::default();
    let mut upload: Option<(Option<String>, Option<String>, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid resume file: {e}")))?;
                if !data.is_empty() {
                    upload = Some((file_name, content_type, data));
                }
            }
            "jobTitle" | "jobDescription" | "interviewDate" | "resumeText" | "userId" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid field {name}: {e}")))?;
                set_text_field(&mut payload, &name, value)?;
            }
            // Unknown parts are ignored.
            _ => {}
        }
    }

    if let Some((file_name, content_type, data)) = upload {
        let text =
            extract_resume_text(file_name.as_deref(), content_type.as_deref(), data).await?;
        payload.resume_text = Some(text);
    }

    let response = prepare_interview(
        &state.llm,
        state.store.as_ref(),
        state.config.blank_lines,
        payload,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

fn set_text_field(
    payload: &mut InterviewPrepPayload,
    name: &str,
    value: String,
) -> Result<(), AppError> {
    match name {
        "jobTitle" => payload.job_title = Some(value),
        "jobDescription" => payload.job_description = Some(value),
        "interviewDate" => payload.interview_date = Some(value),
        "resumeText" => payload.resume_text = Some(value),
        "userId" if value.trim().is_empty() => {}
        "userId" => {
            let id = Uuid::parse_str(value.trim())
                .map_err(|_| AppError::Validation(format!("userId '{value}' is not a UUID")))?;
            payload.user_id = Some(id);
        }
        _ => {}
    }
    Ok(())
}

/// GET /api/interviews/:id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<InterviewRecord>, AppError> {
    let Path(id) = id?;
    let record = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;
    Ok(Json(record))
}

/// GET /api/interviews?userId=&limit=
///
/// Most recent interviews for a user, newest first.
pub async fn handle_list_interviews(
    State(state): State<AppState>,
    params: Result<Query<ListInterviewsQuery>, QueryRejection>,
) -> Result<Json<Vec<InterviewRecord>>, AppError> {
    let Query(params) = params?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);
    let records = state.store.list_for_user(params.user_id, limit).await?;
    Ok(Json(records))
}

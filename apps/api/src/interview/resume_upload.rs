//! Resume upload — turns an uploaded file into plain resume text.
//!
//! PDF text extraction is delegated to `pdf-extract` and treated as a black
//! box: it yields text or fails. Word documents are not supported server-side.

use bytes::Bytes;
use tracing::{info, warn};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeKind {
    Pdf,
    PlainText,
    Unsupported,
}

/// Classifies an upload from its declared content type, file name and magic bytes.
pub fn detect_kind(file_name: Option<&str>, content_type: Option<&str>, data: &[u8]) -> ResumeKind {
    let name = file_name.unwrap_or_default().to_ascii_lowercase();
    let content_type = content_type.unwrap_or_default().to_ascii_lowercase();

    if data.starts_with(b"%PDF-") || content_type == "application/pdf" || name.ends_with(".pdf") {
        ResumeKind::Pdf
    } else if content_type.starts_with("text/") || name.ends_with(".txt") || name.ends_with(".md")
    {
        ResumeKind::PlainText
    } else {
        ResumeKind::Unsupported
    }
}

pub async fn extract_resume_text(
    file_name: Option<&str>,
    content_type: Option<&str>,
    data: Bytes,
) -> Result<String, AppError> {
    let kind = detect_kind(file_name, content_type, &data);
    let label = file_name.unwrap_or("resume");

    let text = match kind {
        ResumeKind::Pdf => extract_pdf(data).await?,
        ResumeKind::PlainText => String::from_utf8(data.to_vec()).map_err(|_| {
            AppError::UnprocessableEntity(format!("{label} is not valid UTF-8 text"))
        })?,
        ResumeKind::Unsupported => {
            return Err(AppError::UnprocessableEntity(format!(
                "Unsupported resume format for {label}. Upload a PDF or paste the resume text."
            )))
        }
    };

    if text.trim().is_empty() {
        warn!("No readable text found in uploaded resume {label}");
        return Err(AppError::UnprocessableEntity(format!(
            "No readable text found in {label}"
        )));
    }

    info!("Extracted {} chars from uploaded resume {label} ({kind:?})", text.len());
    Ok(text)
}

async fn extract_pdf(data: Bytes) -> Result<String, AppError> {
    // pdf-extract is CPU-bound and can panic on malformed input.
    let result = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data)).await;

    match result {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(AppError::UnprocessableEntity(format!(
            "Could not extract text from PDF: {e}"
        ))),
        Err(e) if e.is_panic() => Err(AppError::UnprocessableEntity(
            "Could not extract text from PDF: the file appears to be malformed".to_string(),
        )),
        Err(e) => Err(AppError::Internal(anyhow::anyhow!(
            "PDF extraction task failed: {e}"
        ))),
    }
}

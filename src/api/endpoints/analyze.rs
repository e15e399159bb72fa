//! `POST /analyze`: multipart report upload → sanitized answer.

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::pipeline::analysis::{AnalysisOutcome, AnalysisRequest, ReportFile};

/// Form field carrying report files (repeatable).
const REPORTS_FIELD: &str = "reports";

/// `POST /analyze`
///
/// Fields: `reports` (files), `question`, `location`, `compare`.
/// The API key is checked before the upload is read.
pub async fn analyze(
    State(ctx): State<ApiContext>,
    multipart: Multipart,
) -> Result<Json<AnalysisOutcome>, ApiError> {
    if !ctx.analyzer.is_configured() {
        return Err(ApiError::MissingApiKey);
    }

    let request = read_form(
        multipart,
        ctx.config.max_files,
        ctx.config.max_file_bytes,
    )
    .await?;

    let outcome = ctx.analyzer.analyze(request).await?;
    Ok(Json(outcome))
}

async fn read_form(
    mut multipart: Multipart,
    max_files: usize,
    max_file_bytes: usize,
) -> Result<AnalysisRequest, ApiError> {
    let mut request = AnalysisRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            REPORTS_FIELD => {
                let Some(file) = read_report(field, max_file_bytes).await? else {
                    continue;
                };
                if request.reports.len() >= max_files {
                    return Err(ApiError::BadRequest(format!(
                        "Too many files. Maximum {max_files} per request."
                    )));
                }
                request.reports.push(file);
            }
            "question" => request.question = field.text().await.map_err(multipart_error)?,
            "location" => {
                request.location = field.text().await.map_err(multipart_error)?.trim().to_string()
            }
            "compare" => {
                let value = field.text().await.map_err(multipart_error)?;
                request.compare = is_checked(&value);
            }
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(request)
}

/// Read one uploaded file. Browsers send an empty, unnamed part when no
/// file was chosen; that yields `None`.
async fn read_report(
    field: Field<'_>,
    max_file_bytes: usize,
) -> Result<Option<ReportFile>, ApiError> {
    let file_name = field.file_name().unwrap_or("").to_string();
    let declared = field
        .content_type()
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .map(str::to_string);

    let bytes = field.bytes().await.map_err(multipart_error)?;
    if bytes.is_empty() && file_name.is_empty() {
        return Ok(None);
    }
    if bytes.len() > max_file_bytes {
        return Err(ApiError::PayloadTooLarge(format!(
            "File too large. Maximum {}MB.",
            max_file_bytes / (1024 * 1024)
        )));
    }

    let mime_type = declared.unwrap_or_else(|| {
        mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    });

    Ok(Some(ReportFile {
        file_name,
        mime_type,
        bytes: bytes.to_vec(),
    }))
}

/// HTML checkboxes submit `on`; API clients tend to send `true`.
fn is_checked(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "on" | "true")
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        tracing::warn!(error = %err, "Malformed multipart upload");
        ApiError::BadRequest(err.body_text())
    }
}

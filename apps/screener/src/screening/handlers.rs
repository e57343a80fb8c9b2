//! Axum route handlers for the Screening API.

use std::path::{Path, PathBuf};

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::documents::{is_supported, SUPPORTED_EXTENSIONS};
use crate::errors::AppError;
use crate::screening::models::CandidateAnalysis;
use crate::screening::orchestrator::CandidateOutcome;
use crate::state::AppState;

const JD_FIELD: &str = "job_description";
const CV_FIELD: &str = "cvs";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ScreeningParams {
    /// `false` aborts the whole batch on the first failing CV.
    pub isolate: Option<bool>,
}

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ScreeningResponse {
    pub screening_id: Uuid,
    pub job_description: String,
    pub completed_at: DateTime<Utc>,
    pub results: Vec<CandidateResult>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// One row per uploaded CV, in upload order.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CandidateResult {
    Ok {
        position: usize,
        file_name: String,
        candidate_name: String,
        match_percent: u8,
        analysis: Box<CandidateAnalysis>,
    },
    Failed {
        position: usize,
        file_name: String,
        error: ErrorBody,
    },
}

impl CandidateResult {
    fn success(position: usize, file_name: String, analysis: CandidateAnalysis) -> Self {
        CandidateResult::Ok {
            position,
            file_name,
            candidate_name: analysis.display_name(position),
            match_percent: analysis.skill_match.match_percent(),
            analysis: Box::new(analysis),
        }
    }

    fn from_outcome(position: usize, file_name: String, outcome: CandidateOutcome) -> Self {
        match outcome.result {
            Ok(analysis) => Self::success(position, file_name, analysis),
            Err(e) => CandidateResult::Failed {
                position,
                file_name,
                error: ErrorBody {
                    code: e.code(),
                    message: e.to_string(),
                },
            },
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Upload staging
// ────────────────────────────────────────────────────────────────────────────

struct Upload {
    file_name: String,
    data: Bytes,
}

/// Keeps only the final path segment of a client-supplied file name.
fn sanitize_file_name(raw: &str) -> Option<String> {
    let name = raw.rsplit(['/', '\\']).next()?.trim();
    match name {
        "" | "." | ".." => None,
        _ => Some(name.to_string()),
    }
}

fn validate_upload(field: &str, file_name: Option<&str>) -> Result<String, AppError> {
    let file_name = file_name
        .and_then(sanitize_file_name)
        .ok_or_else(|| AppError::Validation(format!("'{field}' part must carry a file name")))?;

    if !is_supported(&file_name) {
        return Err(AppError::Validation(format!(
            "'{file_name}' is not a supported file type (expected one of: {})",
            SUPPORTED_EXTENSIONS.join(", ")
        )));
    }
    Ok(file_name)
}

async fn stage_file(dir: &Path, staged_name: String, data: &[u8]) -> Result<PathBuf, AppError> {
    let path = dir.join(staged_name);
    tokio::fs::write(&path, data)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to stage upload: {e}")))?;
    Ok(path)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/screenings
///
/// Multipart upload: one `job_description` file and one or more `cvs` files
/// (PDF, DOCX or TXT). Every CV is screened against the job description; a
/// failing CV is reported in its row and does not stop the others, unless
/// `?isolate=false` is given, in which case the first failure fails the request.
pub async fn handle_screening(
    State(state): State<AppState>,
    Query(params): Query<ScreeningParams>,
    mut multipart: Multipart,
) -> Result<Json<ScreeningResponse>, AppError> {
    let mut job_description: Option<Upload> = None;
    let mut cvs: Vec<Upload> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name != JD_FIELD && name != CV_FIELD {
            continue;
        }

        let file_name = validate_upload(&name, field.file_name())?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read '{file_name}': {e}")))?;
        let upload = Upload { file_name, data };

        if name == JD_FIELD {
            if job_description.is_some() {
                return Err(AppError::Validation(format!(
                    "exactly one '{JD_FIELD}' file is expected"
                )));
            }
            job_description = Some(upload);
        } else {
            cvs.push(upload);
        }
    }

    let job_description = job_description
        .ok_or_else(|| AppError::Validation(format!("missing '{JD_FIELD}' file")))?;
    if cvs.is_empty() {
        return Err(AppError::Validation(format!(
            "at least one '{CV_FIELD}' file is required"
        )));
    }

    let screening_id = Uuid::new_v4();
    info!(
        "Screening {screening_id}: {} CV(s) against {}",
        cvs.len(),
        job_description.file_name
    );

    // Removed when `staging` drops at the end of the request.
    let staging = tempfile::tempdir()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to create staging dir: {e}")))?;

    let jd_path = stage_file(
        staging.path(),
        format!("jd-{}", job_description.file_name),
        &job_description.data,
    )
    .await?;

    let mut cv_paths = Vec::with_capacity(cvs.len());
    for (idx, cv) in cvs.iter().enumerate() {
        let staged_name = format!("cv-{:03}-{}", idx + 1, cv.file_name);
        cv_paths.push(stage_file(staging.path(), staged_name, &cv.data).await?);
    }

    let results = if params.isolate.unwrap_or(true) {
        let outcomes = state
            .screener
            .run_many_isolated(&cv_paths, &jd_path)
            .await;
        cvs.into_iter()
            .zip(outcomes)
            .enumerate()
            .map(|(idx, (cv, outcome))| {
                CandidateResult::from_outcome(idx + 1, cv.file_name, outcome)
            })
            .collect()
    } else {
        let analyses = state.screener.run_many(&cv_paths, &jd_path).await?;
        cvs.into_iter()
            .zip(analyses)
            .enumerate()
            .map(|(idx, (cv, analysis))| CandidateResult::success(idx + 1, cv.file_name, analysis))
            .collect()
    };

    Ok(Json(ScreeningResponse {
        screening_id,
        job_description: job_description.file_name,
        completed_at: Utc::now(),
        results,
    }))
}

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::extract_text;
use crate::models::screening::{Decision, RoundResultRow, SessionRow};
use crate::pipeline::{evaluate_candidate, EvaluatePayload, EvaluationOutcome};
use crate::scoring::lexical;
use crate::state::AppState;
use crate::store::{self, RoundParams};

/// POST /api/v1/evaluate
/// Runs the full three-round pipeline on a JSON intake payload.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(payload): Json<EvaluatePayload>,
) -> Result<Json<EvaluationOutcome>, AppError> {
    let outcome = evaluate_candidate(&state.db, payload).await?;
    Ok(Json(outcome))
}

#[derive(Debug, Serialize)]
pub struct ScreenResumeResponse {
    pub role: String,
    pub screening_pass: bool,
    pub score: f64,
    pub reason: String,
    pub session_id: String,
}

/// POST /api/v1/screen_resume
/// Multipart intake adapter: `resume` file + `role` form field. Runs Level 1
/// only and completes the session immediately — HOLD on pass (awaiting the
/// remaining rounds), REJECT on fail.
pub async fn handle_screen_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreenResumeResponse>, AppError> {
    let mut resume_text: Option<String> = None;
    let mut role: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart request: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                let filename = field.file_name().unwrap_or("resume").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid resume file: {e}")))?;
                let text = extract_text(&filename, &data)
                    .map_err(|e| AppError::Validation(format!("Invalid resume file: {e}")))?;
                resume_text = Some(text);
            }
            Some("role") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid role field: {e}")))?;
                role = Some(value);
            }
            _ => {}
        }
    }

    let resume_text =
        resume_text.ok_or_else(|| AppError::Validation("'resume' file is required".to_string()))?;
    let role = role.ok_or_else(|| AppError::Validation("'role' field is required".to_string()))?;

    let candidate_id = store::upsert_candidate(&state.db, "Unknown", "", "", &role, None).await?;
    let session_id = store::create_session(&state.db, &candidate_id).await?;

    let result = lexical::score_resume(&resume_text);
    let question = format!("Resume screening for role: {role}");

    store::save_round_result(
        &state.db,
        RoundParams {
            session_id: &session_id,
            round_no: 1,
            owner: "Screening Engine",
            question: &question,
            answer: &resume_text,
            raw_score: result.score,
            score: result.score,
            passed: result.pass,
            threshold: lexical::PASS_THRESHOLD,
            question_id: None,
            violations: None,
            metrics: None,
            features: Some(serde_json::to_value(&result)?),
            entropy_value: None,
        },
    )
    .await?;

    let decision = if result.pass {
        Decision::Hold
    } else {
        Decision::Reject
    };
    store::complete_session(&state.db, &session_id, result.score, decision).await?;

    Ok(Json(ScreenResumeResponse {
        role,
        screening_pass: result.pass,
        score: result.score,
        reason: result.reason,
        session_id,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SessionListQuery {
    pub candidate_id: Option<String>,
    pub limit: Option<i64>,
}

/// GET /api/v1/sessions
pub async fn handle_list_sessions(
    State(state): State<AppState>,
    Query(params): Query<SessionListQuery>,
) -> Result<Json<Vec<SessionRow>>, AppError> {
    let sessions = store::list_sessions(
        &state.db,
        params.candidate_id.as_deref(),
        params.limit.unwrap_or(50),
    )
    .await?;
    Ok(Json(sessions))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionRow>, AppError> {
    let session = store::get_session(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    Ok(Json(session))
}

/// GET /api/v1/sessions/:id/rounds
pub async fn handle_get_rounds(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<RoundResultRow>>, AppError> {
    let rounds = store::get_round_results(&state.db, &id).await?;
    Ok(Json(rounds))
}

//! Evaluation orchestrator: Level 1 -> Level 2 -> Level 3.
//!
//! Strictly sequential with short-circuit gating: a failing round before
//! Level 3 completes the session as REJECT and later rounds are neither
//! scored nor persisted. Level 3 always completes the session, HIRE on pass
//! and HOLD on fail. Every round is persisted before its gate is applied.

pub mod handlers;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::screening::Decision;
use crate::scoring::lexical::{self, LexicalScore};
use crate::scoring::scenario::{self, ScenarioScore};
use crate::scoring::technical::{self, TechnicalScore};
use crate::store::{self, RoundParams};

/// Caller-supplied intake payload. Every field is optional; defaults mirror
/// the intake form.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluatePayload {
    #[serde(default = "default_full_name")]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub resume_text: String,
    #[serde(default = "default_answers")]
    pub technical_answers: Value,
    #[serde(default)]
    pub scenario_answer: String,
}

fn default_full_name() -> String {
    "Unknown".to_string()
}

fn default_role() -> String {
    "Backend Engineer".to_string()
}

fn default_answers() -> Value {
    serde_json::json!({})
}

/// Aggregated pipeline outcome returned to the caller.
///
/// `decision` is present only when Level 3 was reached; earlier failures
/// report `failed_at` instead. Levels that were never evaluated are absent.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationOutcome {
    pub final_pass: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_at: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,
    pub session_id: String,
    pub level1: LexicalScore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level2: Option<TechnicalScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level3: Option<ScenarioScore>,
}

/// Runs one candidate end-to-end: upsert candidate, open a fresh session,
/// score and persist each round in order, complete the session exactly once.
pub async fn evaluate_candidate(
    pool: &PgPool,
    payload: EvaluatePayload,
) -> Result<EvaluationOutcome, AppError> {
    let candidate_id = store::upsert_candidate(
        pool,
        &payload.full_name,
        &payload.email,
        &payload.phone,
        &payload.role,
        None,
    )
    .await?;

    let session_id = store::create_session(pool, &candidate_id).await?;

    // Level 1 — resume screening
    let l1 = lexical::score_resume(&payload.resume_text);

    store::save_round_result(
        pool,
        RoundParams {
            session_id: &session_id,
            round_no: 1,
            owner: "Interviewer L1",
            question: "Resume Screening",
            answer: &payload.resume_text,
            raw_score: l1.score,
            score: l1.score,
            passed: l1.pass,
            threshold: lexical::PASS_THRESHOLD,
            question_id: None,
            violations: None,
            metrics: None,
            features: Some(serde_json::to_value(&l1)?),
            entropy_value: None,
        },
    )
    .await?;

    if !l1.pass {
        store::complete_session(pool, &session_id, l1.score, Decision::Reject).await?;
        return Ok(EvaluationOutcome {
            final_pass: false,
            failed_at: Some("level1"),
            decision: None,
            session_id,
            level1: l1,
            level2: None,
            level3: None,
        });
    }

    // Level 2 — technical evaluation
    let l2 = technical::score_answers(&payload.technical_answers);
    let l2_score = l2.prob_pass * 100.0;
    let l2_answer = payload.technical_answers.to_string();

    store::save_round_result(
        pool,
        RoundParams {
            session_id: &session_id,
            round_no: 2,
            owner: "Interviewer L2",
            question: "Technical Evaluation",
            answer: &l2_answer,
            raw_score: l2_score,
            score: l2_score,
            passed: l2.pass,
            threshold: technical::PASS_THRESHOLD * 100.0,
            question_id: None,
            violations: None,
            metrics: Some(serde_json::to_value(&l2)?),
            features: None,
            entropy_value: None,
        },
    )
    .await?;

    if !l2.pass {
        store::complete_session(pool, &session_id, l2_score, Decision::Reject).await?;
        return Ok(EvaluationOutcome {
            final_pass: false,
            failed_at: Some("level2"),
            decision: None,
            session_id,
            level1: l1,
            level2: Some(l2),
            level3: None,
        });
    }

    // Level 3 — scenario reasoning; completes the session pass or fail
    let l3 = scenario::score_narrative(&payload.scenario_answer);

    store::save_round_result(
        pool,
        RoundParams {
            session_id: &session_id,
            round_no: 3,
            owner: "Interviewer L3",
            question: "Scenario-Based Reasoning",
            answer: &payload.scenario_answer,
            raw_score: l3.score,
            score: l3.score,
            passed: l3.pass,
            threshold: scenario::PASS_THRESHOLD,
            question_id: None,
            violations: None,
            metrics: Some(serde_json::to_value(&l3)?),
            features: None,
            entropy_value: None,
        },
    )
    .await?;

    let decision = if l3.pass { Decision::Hire } else { Decision::Hold };
    store::complete_session(pool, &session_id, l3.score, decision).await?;

    Ok(EvaluationOutcome {
        final_pass: l3.pass,
        failed_at: None,
        decision: Some(decision),
        session_id,
        level1: l1,
        level2: Some(l2),
        level3: Some(l3),
    })
}

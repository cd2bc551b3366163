//! Persistence surface for candidates, sessions, and round results.
//!
//! Every function issues single-statement writes on the pool, so each write
//! is its own atomic transaction: a failure rolls back only the statement in
//! flight and leaves previously committed rounds intact. Round results are
//! insert-only and are never updated after the fact.

use anyhow::Result;
use chrono::Utc;
use serde_json::{json, Value};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::screening::{Decision, RoundResultRow, SessionRow, SessionStatus};

/// Opaque prefixed identifier: `cand_1f3a9c0d2b4e`, `sess_...`, `res_...`.
fn new_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &hex[..12])
}

/// Inserts a candidate, or overwrites the mutable fields (name/email/phone/
/// role) if the id already exists. `created_at` is never touched on update.
pub async fn upsert_candidate(
    pool: &PgPool,
    full_name: &str,
    email: &str,
    phone: &str,
    role: &str,
    candidate_id: Option<&str>,
) -> Result<String> {
    let cid = candidate_id.map_or_else(|| new_id("cand"), str::to_string);

    sqlx::query(
        r#"
        INSERT INTO candidates (candidate_id, full_name, email, phone, role, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (candidate_id) DO UPDATE
        SET full_name = EXCLUDED.full_name,
            email     = EXCLUDED.email,
            phone     = EXCLUDED.phone,
            role      = EXCLUDED.role
        "#,
    )
    .bind(&cid)
    .bind(full_name)
    .bind(email)
    .bind(phone)
    .bind(role)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(cid)
}

/// Opens a fresh screening session for a candidate, status IN_PROGRESS.
pub async fn create_session(pool: &PgPool, candidate_id: &str) -> Result<String> {
    let sid = new_id("sess");

    sqlx::query(
        r#"
        INSERT INTO sessions (session_id, candidate_id, status, created_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(&sid)
    .bind(candidate_id)
    .bind(SessionStatus::InProgress.as_str())
    .bind(Utc::now())
    .execute(pool)
    .await?;

    info!("Opened session {sid} for candidate {candidate_id}");
    Ok(sid)
}

/// Parameters for persisting one scored round.
///
/// `violations` and `entropy_value` are reserved: current scorers never
/// populate them, but the persisted shape keeps them for future scorers.
pub struct RoundParams<'a> {
    pub session_id: &'a str,
    pub round_no: i32,
    pub owner: &'a str,
    pub question: &'a str,
    pub answer: &'a str,
    pub raw_score: f64,
    pub score: f64,
    pub passed: bool,
    pub threshold: f64,
    pub question_id: Option<&'a str>,
    pub violations: Option<&'a [String]>,
    pub metrics: Option<Value>,
    pub features: Option<Value>,
    pub entropy_value: Option<f64>,
}

/// Appends one round result. Duplicate round numbers for a session are
/// permitted — a retry simply appends another row.
pub async fn save_round_result(pool: &PgPool, params: RoundParams<'_>) -> Result<String> {
    let RoundParams {
        session_id,
        round_no,
        owner,
        question,
        answer,
        raw_score,
        score,
        passed,
        threshold,
        question_id,
        violations,
        metrics,
        features,
        entropy_value,
    } = params;

    let rid = new_id("res");
    let violations = json!(violations.unwrap_or(&[]));
    let metrics = metrics.unwrap_or_else(|| json!({}));
    let features = features.unwrap_or_else(|| json!({}));

    sqlx::query(
        r#"
        INSERT INTO round_results (
            result_id, session_id, round_no, owner,
            question_id, question, answer,
            raw_score, score, passed, threshold,
            violations, metrics, features,
            entropy_value, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        "#,
    )
    .bind(&rid)
    .bind(session_id)
    .bind(round_no)
    .bind(owner)
    .bind(question_id)
    .bind(question)
    .bind(answer)
    .bind(raw_score)
    .bind(score)
    .bind(passed)
    .bind(threshold)
    .bind(violations)
    .bind(metrics)
    .bind(features)
    .bind(entropy_value)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    info!("Saved round {round_no} result {rid} for session {session_id} (passed={passed})");
    Ok(rid)
}

/// Marks a session COMPLETED with its final score and decision.
/// Called exactly once per session in the normal flow.
pub async fn complete_session(
    pool: &PgPool,
    session_id: &str,
    final_score: f64,
    final_decision: Decision,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE sessions
        SET status = $1,
            final_score = $2,
            final_decision = $3,
            completed_at = $4
        WHERE session_id = $5
        "#,
    )
    .bind(SessionStatus::Completed.as_str())
    .bind(final_score)
    .bind(final_decision.as_str())
    .bind(Utc::now())
    .bind(session_id)
    .execute(pool)
    .await?;

    info!(
        "Completed session {session_id}: {} ({final_score:.2})",
        final_decision.as_str()
    );
    Ok(())
}

pub async fn get_session(pool: &PgPool, session_id: &str) -> Result<Option<SessionRow>> {
    Ok(
        sqlx::query_as::<_, SessionRow>("SELECT * FROM sessions WHERE session_id = $1")
            .bind(session_id)
            .fetch_optional(pool)
            .await?,
    )
}

/// Returns every round result for a session, ordered by round then insertion.
pub async fn get_round_results(pool: &PgPool, session_id: &str) -> Result<Vec<RoundResultRow>> {
    Ok(sqlx::query_as::<_, RoundResultRow>(
        r#"
        SELECT *
        FROM round_results
        WHERE session_id = $1
        ORDER BY round_no ASC, created_at ASC
        "#,
    )
    .bind(session_id)
    .fetch_all(pool)
    .await?)
}

/// Lists sessions, newest first, optionally filtered to one candidate.
pub async fn list_sessions(
    pool: &PgPool,
    candidate_id: Option<&str>,
    limit: i64,
) -> Result<Vec<SessionRow>> {
    let rows = match candidate_id {
        Some(cid) => {
            sqlx::query_as::<_, SessionRow>(
                r#"
                SELECT *
                FROM sessions
                WHERE candidate_id = $1
                ORDER BY created_at DESC
                LIMIT $2
                "#,
            )
            .bind(cid)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, SessionRow>(
                "SELECT * FROM sessions ORDER BY created_at DESC LIMIT $1",
            )
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_shape() {
        let id = new_id("cand");
        assert!(id.starts_with("cand_"));
        assert_eq!(id.len(), "cand_".len() + 12);
        assert!(id["cand_".len()..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_new_ids_are_unique() {
        let a = new_id("sess");
        let b = new_id("sess");
        assert_ne!(a, b);
    }

    #[test]
    fn test_round_params_defaults_serialize_to_empty_shapes() {
        // Reserved fields default to [] / {} in the persisted row
        let violations: Option<&[String]> = None;
        assert_eq!(json!(violations.unwrap_or(&[])), json!([]));
        let metrics: Option<Value> = None;
        assert_eq!(metrics.unwrap_or_else(|| json!({})), json!({}));
    }
}

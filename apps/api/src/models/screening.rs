#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Lifecycle state of a screening session.
/// Transitions IN_PROGRESS -> COMPLETED exactly once, never backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    InProgress,
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::InProgress => "IN_PROGRESS",
            SessionStatus::Completed => "COMPLETED",
        }
    }
}

/// Final outcome recorded on a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Hire,
    Hold,
    Reject,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Hire => "HIRE",
            Decision::Hold => "HOLD",
            Decision::Reject => "REJECT",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub candidate_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionRow {
    pub session_id: String,
    pub candidate_id: String,
    pub status: String,
    pub final_score: Option<f64>,
    pub final_decision: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// One scored round within a session. Insert-only: rows are never updated.
///
/// `violations` and `entropy_value` are reserved for future scorers and are
/// persisted even though the current pipeline never populates them;
/// `raw_score` likewise duplicates `score` until a pre-normalization scorer
/// needs the distinction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoundResultRow {
    pub result_id: String,
    pub session_id: String,
    pub round_no: i32,
    pub owner: String,
    pub question_id: Option<String>,
    pub question: String,
    pub answer: String,
    pub raw_score: f64,
    pub score: f64,
    pub passed: bool,
    pub threshold: f64,
    pub violations: Value,
    pub metrics: Value,
    pub features: Value,
    pub entropy_value: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_status_wire_spelling() {
        assert_eq!(SessionStatus::InProgress.as_str(), "IN_PROGRESS");
        assert_eq!(SessionStatus::Completed.as_str(), "COMPLETED");
    }

    #[test]
    fn test_decision_wire_spelling() {
        assert_eq!(Decision::Hire.as_str(), "HIRE");
        assert_eq!(Decision::Hold.as_str(), "HOLD");
        assert_eq!(Decision::Reject.as_str(), "REJECT");
    }

    #[test]
    fn test_decision_serde_matches_as_str() {
        for decision in [Decision::Hire, Decision::Hold, Decision::Reject] {
            let json = serde_json::to_string(&decision).unwrap();
            assert_eq!(json, format!("\"{}\"", decision.as_str()));
        }
    }

    #[test]
    fn test_session_status_roundtrip() {
        let status: SessionStatus = serde_json::from_str("\"IN_PROGRESS\"").unwrap();
        assert_eq!(status, SessionStatus::InProgress);
    }
}

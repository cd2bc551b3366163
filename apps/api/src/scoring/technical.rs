//! Level 2 — technical answer scoring over a structured correctness map.
//!
//! Input arrives as loose JSON from the intake payload; entries that do not
//! carry a `"correct"` field are ignored rather than rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::scoring::round3;

/// Pass cutoff on the 0–1 probability scale.
pub const PASS_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalScore {
    pub pass: bool,
    pub prob_pass: f64,
    pub reason: String,
}

impl TechnicalScore {
    fn fail(reason: &str) -> Self {
        TechnicalScore {
            pass: false,
            prob_pass: 0.0,
            reason: reason.to_string(),
        }
    }
}

/// Scores a question-key -> answer-record map. An entry is gradable only if
/// its value is an object containing a `"correct"` field; the pass
/// probability is the gradable-correct fraction.
pub fn score_answers(answers: &Value) -> TechnicalScore {
    let map = match answers.as_object() {
        Some(map) if !map.is_empty() => map,
        _ => return TechnicalScore::fail("No answers"),
    };

    let mut total = 0u32;
    let mut correct = 0u32;

    for value in map.values() {
        let Some(record) = value.as_object() else {
            continue;
        };
        let Some(flag) = record.get("correct") else {
            continue;
        };
        total += 1;
        if flag.as_bool().unwrap_or(false) {
            correct += 1;
        }
    }

    if total == 0 {
        return TechnicalScore::fail("Malformed input");
    }

    let prob = round3(f64::from(correct) / f64::from(total));
    let pass = prob >= PASS_THRESHOLD;

    TechnicalScore {
        pass,
        prob_pass: prob,
        reason: if pass { "OK" } else { "Weak technical fundamentals" }.to_string(),
    }
}

//! Level 3 — scenario reasoning scoring over a free-text incident narrative.
//!
//! Three signals, all keyword-driven:
//! - flow: how many response phases (diagnose/contain/fix/prevent) appear
//! - tradeoff: how broadly reasoning dimensions are combined per sentence
//! - stability: how evenly dimension mentions are spread (1 - dominance)

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::scoring::round2;

/// Pass cutoff for the scenario round. Deliberately stricter than rounds 1–2.
pub const PASS_THRESHOLD: f64 = 75.0;

const PHASES: &[(&str, &[&str])] = &[
    ("diagnose", &["investigate", "analyze", "identify"]),
    ("contain", &["rollback", "mitigate", "reduce"]),
    ("fix", &["fix", "resolve", "repair"]),
    ("prevent", &["monitor", "prevent", "automate"]),
];

const DIMENSIONS: &[(&str, &[&str])] = &[
    ("risk", &["risk", "impact"]),
    ("cost", &["cost", "budget"]),
    ("time", &["downtime", "delay"]),
    ("reliability", &["uptime", "stability"]),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioScore {
    pub pass: bool,
    pub score: f64,
    pub reason: String,
}

impl ScenarioScore {
    fn too_shallow() -> Self {
        ScenarioScore {
            pass: false,
            score: 0.0,
            reason: "Too shallow".to_string(),
        }
    }
}

/// Scores an incident-response narrative:
/// 100 * (0.45 * flow + 0.35 * tradeoff + 0.20 * stability).
pub fn score_narrative(answer: &str) -> ScenarioScore {
    let steps = segment(answer);
    if steps.len() < 2 {
        return ScenarioScore::too_shallow();
    }

    let mut phases_hit: HashSet<&str> = HashSet::new();
    // Dimension sets per segment; a dimension counts once per segment it
    // appears in, however many of its keywords the segment contains.
    let mut dim_hits: Vec<HashSet<&str>> = Vec::new();

    for step in &steps {
        for (phase, keywords) in PHASES {
            if keywords.iter().any(|k| step.contains(k)) {
                phases_hit.insert(phase);
            }
        }

        let dims: HashSet<&str> = DIMENSIONS
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| step.contains(k)))
            .map(|(dim, _)| *dim)
            .collect();
        if !dims.is_empty() {
            dim_hits.push(dims);
        }
    }

    let flow = phases_hit.len() as f64 / PHASES.len() as f64;

    let total_dim_hits: usize = dim_hits.iter().map(|dims| dims.len()).sum();
    let tradeoff = if dim_hits.is_empty() {
        0.0
    } else {
        total_dim_hits as f64 / (dim_hits.len() * DIMENSIONS.len()) as f64
    };

    let mut dim_counts: HashMap<&str, usize> = HashMap::new();
    for dims in &dim_hits {
        for dim in dims {
            *dim_counts.entry(dim).or_insert(0) += 1;
        }
    }
    let dominance = match dim_counts.values().max() {
        Some(&max_count) => max_count as f64 / total_dim_hits as f64,
        None => 1.0,
    };
    let stability = 1.0 - dominance;

    let score = round2(100.0 * (0.45 * flow + 0.35 * tradeoff + 0.20 * stability));
    let pass = score >= PASS_THRESHOLD;

    ScenarioScore {
        pass,
        score,
        reason: if pass { "OK" } else { "Weak scenario reasoning" }.to_string(),
    }
}

/// Splits on '.' or newline, trims, lowercases, drops empty segments.
fn segment(answer: &str) -> Vec<String> {
    answer
        .split(['.', '\n'])
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_answer_is_too_shallow() {
        let result = score_narrative("");
        assert!(!result.pass);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.reason, "Too shallow");
    }

    #[test]
    fn test_single_segment_is_too_shallow() {
        let result = score_narrative("We investigate, rollback, fix and monitor");
        assert_eq!(result.reason, "Too shallow");
    }

    #[test]
    fn test_segments_split_on_periods_and_newlines() {
        assert_eq!(segment("investigate\n\nrollback.").len(), 2);
        assert_eq!(segment("a. b\nc.").len(), 3);
        assert_eq!(segment("...\n\n").len(), 0);
    }

    #[test]
    fn test_three_phase_no_dimension_narrative() {
        // diagnose + contain + prevent -> flow 3/4; no dimension keywords, so
        // tradeoff = 0 and stability = 0: score = 100 * 0.45 * 0.75 = 33.75
        let answer = "We investigate the issue. We rollback the change. We monitor after.";
        let result = score_narrative(answer);
        assert!((result.score - 33.75).abs() < 1e-9, "score was {}", result.score);
        assert!(!result.pass);
        assert_eq!(result.reason, "Weak scenario reasoning");
    }

    #[test]
    fn test_duplicate_phase_hits_count_once() {
        // Three segments, all diagnose -> flow = 1/4, nothing else
        let answer = "We investigate. We analyze logs. We identify the cause.";
        let result = score_narrative(answer);
        assert!((result.score - 11.25).abs() < 1e-9, "score was {}", result.score);
    }

    #[test]
    fn test_all_phases_balanced_dimensions_passes() {
        // flow = 1, every segment hits all four dimensions (tradeoff = 1),
        // dominance = 1/4 -> stability = 0.75: score = 45 + 35 + 15 = 95
        let answer = "Investigate the impact, cost, delay and stability concerns. \
            Rollback quickly to cut risk, budget, downtime and uptime exposure. \
            Fix the defect while balancing risk, cost, delay and stability. \
            Monitor afterwards to track impact, budget, downtime and uptime.";
        let result = score_narrative(answer);
        assert!((result.score - 95.0).abs() < 1e-9, "score was {}", result.score);
        assert!(result.pass);
        assert_eq!(result.reason, "OK");
    }

    #[test]
    fn test_single_dominant_dimension_zeroes_stability() {
        // Both segments hit only the risk dimension: dominance = 1, and no
        // phase keywords, so score = 100 * 0.35 * (2 / (2 * 4)) = 8.75
        let answer = "The risk is severe. The impact and risk remain.";
        let result = score_narrative(answer);
        assert!((result.score - 8.75).abs() < 1e-9, "score was {}", result.score);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let lower = score_narrative("we investigate the issue. we rollback the change.");
        let upper = score_narrative("WE INVESTIGATE THE ISSUE. WE ROLLBACK THE CHANGE.");
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_identical_input_yields_identical_result() {
        let answer = "We investigate the impact. We rollback to reduce downtime.";
        assert_eq!(score_narrative(answer), score_narrative(answer));
    }
}

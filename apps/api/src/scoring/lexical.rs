//! Level 1 — lexical signal scoring over raw resume text.
//!
//! Measures information density with token-entropy and redundancy statistics.
//! No semantic understanding: the same text always produces the same score.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::scoring::round2;

/// Pass cutoff for the resume round.
pub const PASS_THRESHOLD: f64 = 60.0;

/// Resumes shorter than this many word tokens are too short to assess.
const MIN_TOKENS: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalScore {
    pub pass: bool,
    pub score: f64,
    pub reason: String,
}

impl LexicalScore {
    fn too_short() -> Self {
        LexicalScore {
            pass: false,
            score: 0.0,
            reason: "Too short".to_string(),
        }
    }
}

/// Scores resume text on token entropy (weight 0.55) and redundancy
/// (weight 0.45), each normalized to [0,1], scaled to 0–100.
pub fn score_resume(text: &str) -> LexicalScore {
    let tokens = tokenize(text);
    if tokens.len() < MIN_TOKENS {
        return LexicalScore::too_short();
    }

    let total = tokens.len() as f64;
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in &tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }

    // Shannon entropy over the token frequency distribution, normalized by
    // ln(total) so a fully uniform distribution lands at 1.0.
    let entropy: f64 = counts
        .values()
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.ln()
        })
        .sum();
    let entropy_norm = entropy / total.ln();

    let redundancy = counts.len() as f64 / total;

    let score = round2(100.0 * (0.55 * entropy_norm.min(1.0) + 0.45 * redundancy));
    let pass = score >= PASS_THRESHOLD;

    LexicalScore {
        pass,
        score,
        reason: if pass { "OK" } else { "Low signal" }.to_string(),
    }
}

/// Case-folded word tokens: runs of alphanumerics or underscores, everything
/// else is a separator.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const THIRTY_UNIQUE_WORDS: &str = "alpha bravo charlie delta echo foxtrot golf hotel \
        india juliett kilo lima mike november oscar papa quebec romeo sierra tango uniform \
        victor whiskey xray yankee zulu ocean river forest meadow";

    #[test]
    fn test_under_30_tokens_is_too_short() {
        let text = "short resume with only a handful of words";
        let result = score_resume(text);
        assert!(!result.pass);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.reason, "Too short");
    }

    #[test]
    fn test_empty_text_is_too_short() {
        let result = score_resume("");
        assert!(!result.pass);
        assert_eq!(result.reason, "Too short");
    }

    #[test]
    fn test_29_tokens_fails_30_passes_length_gate() {
        let words: Vec<String> = (0..29).map(|i| format!("word{i}")).collect();
        let result = score_resume(&words.join(" "));
        assert_eq!(result.reason, "Too short");

        let words: Vec<String> = (0..30).map(|i| format!("word{i}")).collect();
        let result = score_resume(&words.join(" "));
        assert_ne!(result.reason, "Too short");
    }

    #[test]
    fn test_30_distinct_words_scores_100() {
        // Uniform distribution: entropy_norm = 1.0, redundancy = 1.0
        let result = score_resume(THIRTY_UNIQUE_WORDS);
        assert_eq!(result.score, 100.0);
        assert!(result.pass);
        assert_eq!(result.reason, "OK");
    }

    #[test]
    fn test_single_repeated_word_scores_low() {
        // Zero entropy; redundancy 1/40 -> score = 100 * 0.45 * 0.025 = 1.125
        let text = vec!["echo"; 40].join(" ");
        let result = score_resume(&text);
        assert!(!result.pass);
        assert!((result.score - 1.13).abs() < 1e-9, "score was {}", result.score);
        assert_eq!(result.reason, "Low signal");
    }

    #[test]
    fn test_tokenize_strips_punctuation_and_folds_case() {
        let tokens = tokenize("Rust, Go; C++ and RUST!");
        assert_eq!(tokens, vec!["rust", "go", "c", "and", "rust"]);
    }

    #[test]
    fn test_tokenize_keeps_underscores() {
        let tokens = tokenize("snake_case stays whole");
        assert_eq!(tokens, vec!["snake_case", "stays", "whole"]);
    }

    #[test]
    fn test_identical_input_yields_identical_result() {
        let a = score_resume(THIRTY_UNIQUE_WORDS);
        let b = score_resume(THIRTY_UNIQUE_WORDS);
        assert_eq!(a, b);
    }

    #[test]
    fn test_score_is_bounded() {
        let text = "Backend engineer with seven years building distributed ingestion \
            pipelines, query planners, and storage engines in Rust and Go. Led migration \
            of a monolithic billing platform onto event-sourced services handling peak \
            loads above forty thousand requests per second across three regions.";
        let result = score_resume(text);
        assert!(result.score >= 0.0 && result.score <= 100.0);
    }
}

// Authoritative round scorers for the screening pipeline.
// All three are pure and deterministic: identical input always yields an
// identical result, and malformed input comes back as a non-passing score
// rather than an error.

pub mod lexical;
pub mod scenario;
pub mod technical;

/// Rounds to 2 decimal places (scores on the 0–100 scale).
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to 3 decimal places (probabilities on the 0–1 scale).
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

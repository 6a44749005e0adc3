use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Not enough samples for a regression yet. Callers should fall back
    /// to the last observed position.
    #[error("insufficient history: have {have} samples, need {need}")]
    InsufficientHistory { have: usize, need: usize },

    /// Rank-deficient regression system, e.g. duplicate time values.
    #[error("ill-conditioned fit over {points} samples")]
    IllConditionedFit { points: usize },
}

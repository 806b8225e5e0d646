// src/error.rs

/// Errors surfaced by the evaluator.
///
/// An infeasible decision is not an error; it is reported through
/// `EvaluationResult::feasible`.
#[derive(Debug, thiserror::Error)]
pub enum EvaluatorError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid decision: {0}")]
    InvalidDecision(String),
    #[error("unknown problem: {0}")]
    UnknownProblem(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<serde_json::Error> for EvaluatorError {
    fn from(value: serde_json::Error) -> Self {
        // Missing fields and unknown demand families both land here.
        Self::InvalidConfiguration(value.to_string())
    }
}

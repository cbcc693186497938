use thiserror::Error;

#[derive(Debug, Error)]
pub enum QaError {
    #[error("invalid leakage pattern {id}: {source}")]
    Pattern {
        id: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("evaluator unavailable: {0}")]
    Unavailable(String),

    #[error("evaluation failed: {0}")]
    Failed(String),

    #[error("report has no content to evaluate")]
    EmptyReport,
}

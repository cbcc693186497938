use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("content repository unavailable: {0}")]
    Unavailable(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid intake: {0}")]
    InvalidIntake(String),

    #[error("run cancelled at {stage}")]
    Cancelled { stage: &'static str },

    #[error("content repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("qa setup error: {0}")]
    Qa(#[from] oralis_qa::QaError),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

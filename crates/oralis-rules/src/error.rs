use oralis_core::models::driver::DriverId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("expected exactly one fallback scenario, found {0}")]
    FallbackCount(usize),

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("driver {0} is missing from the driver catalog")]
    MissingDriver(DriverId),

    #[error("driver {driver}: value '{value}' is not in its value set ({context})")]
    UnknownDriverValue {
        driver: DriverId,
        value: String,
        context: String,
    },

    #[error("driver {driver}: fallback '{value}' is not in its value set")]
    InvalidFallback { driver: DriverId, value: String },

    #[error("question {question}: threshold bands must be strictly descending by min")]
    UnsortedBands { question: String },

    #[error("section {section} has no layout")]
    MissingLayout { section: u8 },

    #[error("block {block_id} targets section {section}, which does not accept {content_type}")]
    LayoutMismatch {
        block_id: String,
        section: u8,
        content_type: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

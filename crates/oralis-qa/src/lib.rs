//! oralis-qa
//!
//! Quality assurance for composed reports: a structural validator, a
//! semantic leakage detector, the PASS / FLAG / BLOCK gate and the
//! optional advisory evaluator seam.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod gate;
pub mod leakage;
pub mod validate;

pub use crate::config::{QaConfig, WordBand};
pub use crate::error::{EvaluationError, QaError};
pub use crate::gate::QaGate;

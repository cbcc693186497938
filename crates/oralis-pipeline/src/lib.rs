//! oralis-pipeline
//!
//! Orchestrates one advisory run: intake validation, the engine stages,
//! content prefetch from a [`ContentRepository`], the QA gate and the
//! optional advisory evaluation. Progress is reported per stage, runs can
//! be cancelled, and every failure (panics included) comes back as a
//! BLOCK result with an audit record.
//!
//! [`ContentRepository`]: repository::ContentRepository

pub mod cancel;
pub mod config;
pub mod error;
pub mod intake;
pub mod pipeline;
pub mod progress;
pub mod repository;
pub mod trail;

pub use crate::cancel::CancellationToken;
pub use crate::config::PipelineConfig;
pub use crate::error::{PipelineError, RepositoryError};
pub use crate::pipeline::Pipeline;
pub use crate::progress::{ChannelProgress, NoProgress, ProgressSink};
pub use crate::repository::{ContentRepository, InMemoryRepository};

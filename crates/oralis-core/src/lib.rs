//! oralis-core
//!
//! Pure domain types for the advisory report pipeline: intake answers,
//! tags, drivers, scenarios, content selections, composed reports, QA
//! results and the audit record. No I/O and no rule data; this is the
//! shared vocabulary of the Oralis workspace.

use std::future::Future;
use std::pin::Pin;

pub mod error;
pub mod models;

pub use crate::error::CoreError;

/// Boxed future returned by the async seams (content repository, quality
/// evaluator) so they stay object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

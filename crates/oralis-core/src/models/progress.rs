use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StageStatus {
    Started,
    Completed,
    Error,
}

/// One stage transition, emitted in pipeline order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProgressEvent {
    pub stage_index: u32,
    pub stage_name: String,
    pub status: StageStatus,
    pub message: String,
    pub timestamp: jiff::Timestamp,
    /// Stage-specific counters, e.g. `tags` or `conflicts`.
    #[serde(default)]
    pub metrics: BTreeMap<String, serde_json::Value>,
    pub duration_ms: Option<u64>,
}

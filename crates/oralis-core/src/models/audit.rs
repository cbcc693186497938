use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::driver::DriverState;
use super::intake::{Answer, Language};
use super::progress::StageStatus;
use super::qa::{GateOutcome, QaGateResult};
use super::report::ComposedReport;
use super::scenario::ScenarioMatchResult;
use super::selection::{ContentSelections, Tone};
use super::tag::Tag;

/// Final status of one stage, as recorded in the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StageRecord {
    pub stage_index: u32,
    pub stage_name: String,
    pub status: StageStatus,
    pub duration_ms: u64,
    pub message: String,
}

/// Snapshot of every intermediate artifact of one run.
///
/// Created once when the run finishes. Stages that never ran leave their
/// field empty and `partial` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuditRecord {
    pub run_id: Uuid,
    pub session_id: String,
    pub started_at: jiff::Timestamp,
    pub completed_at: jiff::Timestamp,
    pub language: Option<Language>,
    pub answers: Vec<Answer>,
    pub tags: Vec<Tag>,
    pub drivers: Option<DriverState>,
    pub scenario: Option<ScenarioMatchResult>,
    pub tone: Option<Tone>,
    pub selections: Option<ContentSelections>,
    pub report: Option<ComposedReport>,
    pub qa: Option<QaGateResult>,
    pub stages: Vec<StageRecord>,
    pub outcome: GateOutcome,
    pub failure: Option<String>,
    pub partial: bool,
}

/// What the caller of the pipeline always receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PipelineResult {
    pub success: bool,
    pub outcome: GateOutcome,
    pub report: Option<ComposedReport>,
    pub audit: AuditRecord,
    pub error: Option<String>,
}

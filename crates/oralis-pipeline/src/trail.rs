//! Per-run bookkeeping: stage transitions, progress events and the
//! artifacts that end up in the audit record.

use std::collections::BTreeMap;
use std::time::Instant;

use oralis_core::models::audit::{AuditRecord, StageRecord};
use oralis_core::models::driver::DriverState;
use oralis_core::models::progress::{ProgressEvent, StageStatus};
use oralis_core::models::qa::{GateOutcome, QaGateResult};
use oralis_core::models::report::ComposedReport;
use oralis_core::models::scenario::ScenarioMatchResult;
use oralis_core::models::selection::{ContentSelections, Tone};
use oralis_core::models::intake::Intake;
use oralis_core::models::tag::Tag;
use tracing::{debug, error};
use uuid::Uuid;

use crate::cancel::CancellationToken;
use crate::error::PipelineError;
use crate::progress::ProgressSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ValidateIntake,
    ExtractTags,
    DeriveDrivers,
    MatchScenario,
    SelectContent,
    ComposeReport,
    QaGate,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::ValidateIntake,
        Stage::ExtractTags,
        Stage::DeriveDrivers,
        Stage::MatchScenario,
        Stage::SelectContent,
        Stage::ComposeReport,
        Stage::QaGate,
    ];

    pub fn index(&self) -> u32 {
        match self {
            Stage::ValidateIntake => 0,
            Stage::ExtractTags => 1,
            Stage::DeriveDrivers => 2,
            Stage::MatchScenario => 3,
            Stage::SelectContent => 4,
            Stage::ComposeReport => 5,
            Stage::QaGate => 6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::ValidateIntake => "validate_intake",
            Stage::ExtractTags => "extract_tags",
            Stage::DeriveDrivers => "derive_drivers",
            Stage::MatchScenario => "match_scenario",
            Stage::SelectContent => "select_content",
            Stage::ComposeReport => "compose_report",
            Stage::QaGate => "qa_gate",
        }
    }
}

pub type Metrics = BTreeMap<String, serde_json::Value>;

/// Build a metrics map from `(name, value)` pairs.
pub fn metrics<const N: usize>(pairs: [(&str, serde_json::Value); N]) -> Metrics {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

pub(crate) struct Trail<'a> {
    progress: &'a dyn ProgressSink,
    cancel: &'a CancellationToken,
    run_id: Uuid,
    session_id: String,
    started_at: jiff::Timestamp,
    current: Option<(Stage, Instant)>,
    pub stages: Vec<StageRecord>,
    pub tags: Vec<Tag>,
    pub drivers: Option<DriverState>,
    pub scenario: Option<ScenarioMatchResult>,
    pub tone: Option<Tone>,
    pub selections: Option<ContentSelections>,
    pub report: Option<ComposedReport>,
    pub qa: Option<QaGateResult>,
}

impl<'a> Trail<'a> {
    pub fn new(intake: &Intake, progress: &'a dyn ProgressSink, cancel: &'a CancellationToken) -> Self {
        Self {
            progress,
            cancel,
            run_id: Uuid::new_v4(),
            session_id: intake.session_id.clone(),
            started_at: jiff::Timestamp::now(),
            current: None,
            stages: Vec::new(),
            tags: Vec::new(),
            drivers: None,
            scenario: None,
            tone: None,
            selections: None,
            report: None,
            qa: None,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Fail with `Cancelled` if the caller gave up.
    pub fn check_cancelled(&self, before: &'static str) -> Result<(), PipelineError> {
        if self.cancel.is_cancelled() {
            debug!(session_id = %self.session_id, before, "run cancelled");
            Err(PipelineError::Cancelled { stage: before })
        } else {
            Ok(())
        }
    }

    /// Await `work`, abandoning it with `Cancelled` as soon as the caller
    /// cancels, even while the future is still pending.
    pub async fn until_cancelled<T>(
        &self,
        during: &'static str,
        work: impl Future<Output = T>,
    ) -> Result<T, PipelineError> {
        self.check_cancelled(during)?;
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                debug!(session_id = %self.session_id, during, "run cancelled mid-await");
                Err(PipelineError::Cancelled { stage: during })
            }
            output = work => Ok(output),
        }
    }

    pub fn start(&mut self, stage: Stage) -> Result<(), PipelineError> {
        self.check_cancelled(stage.name())?;
        self.current = Some((stage, Instant::now()));
        self.emit(stage, StageStatus::Started, format!("{} started", stage.name()), Metrics::new(), None);
        Ok(())
    }

    pub fn complete(&mut self, message: impl Into<String>, metrics: Metrics) {
        let Some((stage, started)) = self.current.take() else {
            return;
        };
        let duration_ms = started.elapsed().as_millis() as u64;
        let message = message.into();
        debug!(
            session_id = %self.session_id,
            stage = stage.name(),
            duration_ms,
            "{message}"
        );
        self.record(stage, StageStatus::Completed, duration_ms, &message);
        self.emit(stage, StageStatus::Completed, message, metrics, Some(duration_ms));
    }

    /// Close the running stage, if any, with an error event.
    pub fn fail(&mut self, message: impl Into<String>) {
        let Some((stage, started)) = self.current.take() else {
            return;
        };
        let duration_ms = started.elapsed().as_millis() as u64;
        let message = message.into();
        error!(
            session_id = %self.session_id,
            stage = stage.name(),
            duration_ms,
            error = %message,
            "stage failed"
        );
        self.record(stage, StageStatus::Error, duration_ms, &message);
        self.emit(stage, StageStatus::Error, message, Metrics::new(), Some(duration_ms));
    }

    fn record(&mut self, stage: Stage, status: StageStatus, duration_ms: u64, message: &str) {
        self.stages.push(StageRecord {
            stage_index: stage.index(),
            stage_name: stage.name().to_string(),
            status,
            duration_ms,
            message: message.to_string(),
        });
    }

    fn emit(
        &self,
        stage: Stage,
        status: StageStatus,
        message: String,
        metrics: Metrics,
        duration_ms: Option<u64>,
    ) {
        self.progress.emit(&ProgressEvent {
            stage_index: stage.index(),
            stage_name: stage.name().to_string(),
            status,
            message,
            timestamp: jiff::Timestamp::now(),
            metrics,
            duration_ms,
        });
    }

    /// Freeze the trail into the audit record.
    pub fn into_audit(
        self,
        intake: &Intake,
        outcome: GateOutcome,
        failure: Option<String>,
    ) -> AuditRecord {
        let partial = self.qa.is_none();
        AuditRecord {
            run_id: self.run_id,
            session_id: self.session_id,
            started_at: self.started_at,
            completed_at: jiff::Timestamp::now(),
            language: Some(intake.language),
            answers: intake.answers.clone(),
            tags: self.tags,
            drivers: self.drivers,
            scenario: self.scenario,
            tone: self.tone,
            selections: self.selections,
            report: self.report,
            qa: self.qa,
            stages: self.stages,
            outcome,
            failure,
            partial,
        }
    }
}

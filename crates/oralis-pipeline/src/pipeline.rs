use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use oralis_core::models::audit::{AuditRecord, PipelineResult};
use oralis_core::models::intake::Intake;
use oralis_core::models::qa::GateOutcome;
use oralis_core::models::report::ScenarioSections;
use oralis_core::models::selection::{ContentSelections, Tone};
use oralis_core::models::tag::tag_set;
use oralis_engine::compose::{BlockTexts, ComposeInput, compose_report};
use oralis_engine::drivers::derive_drivers;
use oralis_engine::placeholder::PlaceholderContext;
use oralis_engine::scenario::match_scenario;
use oralis_engine::select::select_content;
use oralis_engine::tags::extract_tags;
use oralis_engine::tone::resolve_tone;
use oralis_qa::QaGate;
use oralis_qa::evaluator::QualityEvaluator;
use oralis_rules::Catalog;
use serde_json::json;
use tracing::{error, info, warn};

use crate::cancel::CancellationToken;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, RepositoryError};
use crate::intake::validate_intake;
use crate::progress::{NoProgress, ProgressSink};
use crate::repository::ContentRepository;
use crate::trail::{Stage, Trail, metrics};

/// Runs intakes through every stage. Holds only read-only state, so one
/// instance serves concurrent sessions.
pub struct Pipeline {
    catalog: Arc<Catalog>,
    repository: Arc<dyn ContentRepository>,
    evaluator: Option<Arc<dyn QualityEvaluator>>,
    gate: QaGate,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        catalog: Arc<Catalog>,
        repository: Arc<dyn ContentRepository>,
        config: PipelineConfig,
    ) -> Result<Self, PipelineError> {
        let gate = QaGate::new(&catalog, config.qa.clone())?;
        Ok(Self {
            catalog,
            repository,
            evaluator: None,
            gate,
            config,
        })
    }

    pub fn with_evaluator(mut self, evaluator: Arc<dyn QualityEvaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub async fn run_simple(&self, intake: &Intake) -> PipelineResult {
        self.run(intake, &NoProgress, &CancellationToken::new()).await
    }

    /// Run one intake to a result. Never panics and never returns an
    /// error: every failure becomes a BLOCK result with an audit record.
    pub async fn run(
        &self,
        intake: &Intake,
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> PipelineResult {
        let mut trail = Trail::new(intake, progress, cancel);
        info!(
            session_id = %intake.session_id,
            run_id = %trail.run_id(),
            language = %intake.language,
            answers = intake.answers.len(),
            "pipeline run started"
        );

        let outcome = AssertUnwindSafe(self.execute(intake, &mut trail))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(())) => finish(intake, trail),
            Ok(Err(e)) => {
                let message = e.to_string();
                trail.fail(message.as_str());
                warn!(session_id = %intake.session_id, error = %message, "pipeline run blocked");
                blocked(trail.into_audit(intake, GateOutcome::Block, Some(message.clone())), message)
            }
            Err(panic) => {
                let message = format!("internal fault: {}", panic_message(panic.as_ref()));
                trail.fail(message.as_str());
                error!(session_id = %intake.session_id, error = %message, "pipeline run panicked");
                blocked(trail.into_audit(intake, GateOutcome::Block, Some(message.clone())), message)
            }
        }
    }

    async fn execute(&self, intake: &Intake, trail: &mut Trail<'_>) -> Result<(), PipelineError> {
        let catalog = self.catalog.as_ref();

        trail.start(Stage::ValidateIntake)?;
        validate_intake(intake)?;
        trail.complete(
            "intake accepted",
            metrics([("answers", json!(intake.answers.len()))]),
        );

        trail.start(Stage::ExtractTags)?;
        let tags = extract_tags(catalog, &intake.answers);
        let labels = tag_set(&tags);
        trail.complete(
            format!("{} tags extracted", tags.len()),
            metrics([
                ("tags", json!(tags.len())),
                ("distinct_tags", json!(labels.len())),
            ]),
        );
        trail.tags = tags;

        trail.start(Stage::DeriveDrivers)?;
        let drivers = derive_drivers(catalog, &trail.tags);
        trail.complete(
            format!("{} drivers derived", drivers.values.len()),
            metrics([
                ("drivers", json!(drivers.values.len())),
                ("conflicts", json!(drivers.conflicts.len())),
                ("fallbacks", json!(drivers.fallbacks.len())),
            ]),
        );
        let drivers = trail.drivers.insert(drivers).clone();

        trail.start(Stage::MatchScenario)?;
        let scenario = match_scenario(catalog, &drivers, &labels, &self.config.scoring);
        let tone = resolve_tone(&drivers, &intake.metadata);
        trail.complete(
            format!("matched {} ({})", scenario.matched_scenario, scenario.confidence),
            metrics([
                ("scenario", json!(scenario.matched_scenario)),
                ("score", json!(scenario.score)),
                ("confidence", json!(scenario.confidence.as_str())),
                ("fallback", json!(scenario.fallback_used)),
                ("tone", json!(tone.as_str())),
            ]),
        );
        let scenario = trail.scenario.insert(scenario).clone();
        trail.tone = Some(tone);

        trail.start(Stage::SelectContent)?;
        let selections = select_content(catalog, &drivers, &scenario, tone, &labels);
        trail.complete(
            format!("{} selections", selections.selections.len()),
            metrics([
                ("selections", json!(selections.selections.len())),
                (
                    "suppressed",
                    json!(selections.selections.iter().filter(|s| s.suppressed).count()),
                ),
                ("suppressed_sections", json!(selections.suppressed_sections.len())),
            ]),
        );
        let selections = trail.selections.insert(selections).clone();

        trail.start(Stage::ComposeReport)?;
        let (bundle, texts) = self
            .prefetch(trail, &scenario.matched_scenario, &selections, tone, intake)
            .await?;
        let scenario_name = catalog
            .scenario(&scenario.matched_scenario)
            .map(|s| s.name.as_str())
            .unwrap_or_default();
        let placeholders = PlaceholderContext::from_run(intake, &drivers, scenario_name);
        let report = compose_report(
            catalog,
            &ComposeInput {
                session_id: &intake.session_id,
                drivers: &drivers,
                scenario: &scenario,
                selections: &selections,
                tone,
                language: intake.language,
                scenario_text: bundle.as_ref(),
                block_texts: &texts,
                placeholders: &placeholders,
            },
        );
        trail.complete(
            format!("{} sections composed", report.sections.len()),
            metrics([
                ("sections", json!(report.sections.len())),
                ("suppressed_sections", json!(report.suppressed_sections.len())),
                ("words", json!(report.total_word_count)),
                ("content_gaps", json!(report.content_gaps.len())),
                ("placeholders_unresolved", json!(report.placeholders_unresolved.len())),
            ]),
        );
        let report = trail.report.insert(report).clone();

        trail.start(Stage::QaGate)?;
        let mut qa = self.gate.check(catalog, &report, &drivers, &labels);
        if let Some(evaluator) = &self.evaluator {
            trail.check_cancelled("advisory evaluation")?;
            qa.advisory = self.advise(evaluator.as_ref(), &report).await;
        }
        trail.complete(
            format!("outcome {}", qa.outcome),
            metrics([
                ("outcome", json!(qa.outcome.as_str())),
                ("errors", json!(qa.validation.errors.len())),
                ("warnings", json!(qa.validation.warnings.len())),
                ("critical", json!(qa.leakage.critical.len())),
                ("leakage_warnings", json!(qa.leakage.warnings.len())),
            ]),
        );
        trail.qa = Some(qa);

        Ok(())
    }

    /// Fetch the scenario bundle and the body of every selection that will
    /// be rendered, so composition itself stays synchronous.
    async fn prefetch(
        &self,
        trail: &Trail<'_>,
        scenario_id: &str,
        selections: &ContentSelections,
        tone: Tone,
        intake: &Intake,
    ) -> Result<(Option<ScenarioSections>, BlockTexts), PipelineError> {
        let language = intake.language;

        let fetched = trail
            .until_cancelled(
                "scenario content fetch",
                self.repository.get_scenario_sections(scenario_id, tone, language),
            )
            .await?;
        let bundle = self.tolerate(scenario_id, fetched)?.flatten();

        let mut texts = BlockTexts::new();
        for selection in selections.rendered() {
            if selection.block_id == scenario_id || texts.contains_key(&selection.block_id) {
                continue;
            }
            let fetched = trail
                .until_cancelled(
                    "content fetch",
                    self.repository
                        .get_content(&selection.block_id, selection.tone, language),
                )
                .await?;
            if let Some(text) = self.tolerate(&selection.block_id, fetched)?.flatten() {
                texts.insert(selection.block_id.clone(), text);
            }
        }

        Ok((bundle, texts))
    }

    /// Repository failures count as missing content unless configured
    /// to be fatal.
    fn tolerate<T>(
        &self,
        id: &str,
        result: Result<T, RepositoryError>,
    ) -> Result<Option<T>, PipelineError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if self.config.fail_on_repository_error => Err(e.into()),
            Err(e) => {
                warn!(id, error = %e, "content repository failed, treating as absent");
                Ok(None)
            }
        }
    }

    async fn advise(
        &self,
        evaluator: &dyn QualityEvaluator,
        report: &oralis_core::models::report::ComposedReport,
    ) -> Option<oralis_core::models::qa::AdvisoryEvaluation> {
        let limit = Duration::from_millis(self.config.advisory_timeout_ms);
        let evaluation =
            AssertUnwindSafe(async { evaluator.evaluate(report).await }).catch_unwind();
        match tokio::time::timeout(limit, evaluation).await {
            Ok(Ok(Ok(evaluation))) => {
                info!(evaluator = evaluator.name(), score = evaluation.score, "advisory evaluation attached");
                Some(evaluation)
            }
            Ok(Ok(Err(e))) => {
                warn!(evaluator = evaluator.name(), error = %e, "advisory evaluation failed, ignored");
                None
            }
            Ok(Err(panic)) => {
                warn!(
                    evaluator = evaluator.name(),
                    error = %panic_message(panic.as_ref()),
                    "advisory evaluator panicked, ignored"
                );
                None
            }
            Err(_) => {
                warn!(
                    evaluator = evaluator.name(),
                    timeout_ms = self.config.advisory_timeout_ms,
                    "advisory evaluation timed out, ignored"
                );
                None
            }
        }
    }
}

fn finish(intake: &Intake, trail: Trail<'_>) -> PipelineResult {
    let outcome = trail
        .qa
        .as_ref()
        .map_or(GateOutcome::Block, |qa| qa.outcome);
    let failure = trail
        .qa
        .as_ref()
        .filter(|qa| qa.outcome == GateOutcome::Block)
        .map(|qa| qa.reasons.join("; "));
    let audit = trail.into_audit(intake, outcome, failure.clone());

    info!(
        session_id = %audit.session_id,
        run_id = %audit.run_id,
        outcome = %outcome,
        "pipeline run finished"
    );

    PipelineResult {
        success: outcome.is_deliverable(),
        outcome,
        report: audit.report.clone().filter(|_| outcome.is_deliverable()),
        audit,
        error: failure,
    }
}

fn blocked(audit: AuditRecord, message: String) -> PipelineResult {
    PipelineResult {
        success: false,
        outcome: GateOutcome::Block,
        report: None,
        audit,
        error: Some(message),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use oralis_core::BoxFuture;
use oralis_core::models::intake::{Answer, Intake, Language};
use oralis_core::models::qa::AdvisoryEvaluation;
use oralis_core::models::report::{ComposedReport, ScenarioSections};
use oralis_core::models::selection::Tone;
use oralis_pipeline::repository::ContentLibrary;
use oralis_pipeline::{
    CancellationToken, ContentRepository, InMemoryRepository, Pipeline, PipelineConfig,
    RepositoryError,
};
use oralis_qa::error::EvaluationError;
use oralis_qa::evaluator::QualityEvaluator;
use oralis_rules::Catalog;

pub const DEMO_CONTENT: &str = include_str!("../../../../demos/content.json");

pub fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::standard().expect("standard catalog validates"))
}

pub fn library() -> ContentLibrary {
    serde_json::from_str(DEMO_CONTENT).expect("demo content parses")
}

pub fn repository() -> Arc<InMemoryRepository> {
    Arc::new(InMemoryRepository::new(library()))
}

pub fn pipeline(repository: Arc<dyn ContentRepository>) -> Pipeline {
    pipeline_with(repository, PipelineConfig::default())
}

pub fn pipeline_with(repository: Arc<dyn ContentRepository>, config: PipelineConfig) -> Pipeline {
    Pipeline::new(catalog(), repository, config).expect("pipeline builds")
}

pub fn demo_pipeline() -> Pipeline {
    pipeline(repository())
}

/// One missing back tooth, calm patient, moderate budget.
pub fn routine_answers() -> Vec<Answer> {
    vec![
        Answer::list("Q1", ["missing_teeth"]),
        Answer::text("Q2", "one"),
        Answer::text("Q3", "back"),
        Answer::text("Q4", "none"),
        Answer::text("Q5", "none"),
        Answer::list("Q6", ["none"]),
        Answer::text("Q7", "0"),
        Answer::text("Q8", "moderate"),
        Answer::text("Q9", "months"),
        Answer::text("Q10", "2"),
        Answer::list("Q11", ["durability"]),
    ]
}

pub fn urgent_answers() -> Vec<Answer> {
    with_answer(routine_answers(), Answer::text("Q5", "swelling"))
}

pub fn with_answer(mut answers: Vec<Answer>, answer: Answer) -> Vec<Answer> {
    answers.retain(|a| a.question_id != answer.question_id);
    answers.push(answer);
    answers
}

pub fn without(mut answers: Vec<Answer>, question_id: &str) -> Vec<Answer> {
    answers.retain(|a| a.question_id != question_id);
    answers
}

pub fn intake(session_id: &str, answers: Vec<Answer>) -> Intake {
    Intake {
        session_id: session_id.to_string(),
        language: Language::En,
        answers,
        metadata: BTreeMap::new(),
    }
}

/// Every call fails.
pub struct FailingRepository;

impl ContentRepository for FailingRepository {
    fn get_content<'a>(
        &'a self,
        _block_id: &'a str,
        _tone: Tone,
        _language: Language,
    ) -> BoxFuture<'a, Result<Option<String>, RepositoryError>> {
        Box::pin(async { Err(RepositoryError::Unavailable("store offline".to_string())) })
    }

    fn get_scenario_sections<'a>(
        &'a self,
        _scenario_id: &'a str,
        _tone: Tone,
        _language: Language,
    ) -> BoxFuture<'a, Result<Option<ScenarioSections>, RepositoryError>> {
        Box::pin(async { Err(RepositoryError::Unavailable("store offline".to_string())) })
    }
}

/// Panics as soon as content is requested.
pub struct PanickingRepository;

impl ContentRepository for PanickingRepository {
    fn get_content<'a>(
        &'a self,
        _block_id: &'a str,
        _tone: Tone,
        _language: Language,
    ) -> BoxFuture<'a, Result<Option<String>, RepositoryError>> {
        Box::pin(async { panic!("content store exploded") })
    }

    fn get_scenario_sections<'a>(
        &'a self,
        _scenario_id: &'a str,
        _tone: Tone,
        _language: Language,
    ) -> BoxFuture<'a, Result<Option<ScenarioSections>, RepositoryError>> {
        Box::pin(async { panic!("content store exploded") })
    }
}

/// Serves the demo library but cancels the run on the first block fetch.
pub struct CancellingRepository {
    pub inner: InMemoryRepository,
    pub cancel: CancellationToken,
}

impl ContentRepository for CancellingRepository {
    fn get_content<'a>(
        &'a self,
        block_id: &'a str,
        tone: Tone,
        language: Language,
    ) -> BoxFuture<'a, Result<Option<String>, RepositoryError>> {
        self.cancel.cancel();
        self.inner.get_content(block_id, tone, language)
    }

    fn get_scenario_sections<'a>(
        &'a self,
        scenario_id: &'a str,
        tone: Tone,
        language: Language,
    ) -> BoxFuture<'a, Result<Option<ScenarioSections>, RepositoryError>> {
        self.inner.get_scenario_sections(scenario_id, tone, language)
    }
}

/// Never answers within any reasonable timeout.
pub struct SlowEvaluator;

impl QualityEvaluator for SlowEvaluator {
    fn name(&self) -> &str {
        "slow"
    }

    fn evaluate<'a>(
        &'a self,
        _report: &'a ComposedReport,
    ) -> BoxFuture<'a, Result<AdvisoryEvaluation, EvaluationError>> {
        Box::pin(async {
            tokio::time::sleep(Duration::from_secs(3_600)).await;
            Ok(AdvisoryEvaluation {
                score: 1.0,
                summary: "too late".to_string(),
            })
        })
    }
}

pub struct BrokenEvaluator;

impl QualityEvaluator for BrokenEvaluator {
    fn name(&self) -> &str {
        "broken"
    }

    fn evaluate<'a>(
        &'a self,
        _report: &'a ComposedReport,
    ) -> BoxFuture<'a, Result<AdvisoryEvaluation, EvaluationError>> {
        Box::pin(async { Err(EvaluationError::Unavailable("model offline".to_string())) })
    }
}

/// Accepts every request and never answers.
pub struct StalledRepository;

impl ContentRepository for StalledRepository {
    fn get_content<'a>(
        &'a self,
        _block_id: &'a str,
        _tone: Tone,
        _language: Language,
    ) -> BoxFuture<'a, Result<Option<String>, RepositoryError>> {
        Box::pin(std::future::pending())
    }

    fn get_scenario_sections<'a>(
        &'a self,
        _scenario_id: &'a str,
        _tone: Tone,
        _language: Language,
    ) -> BoxFuture<'a, Result<Option<ScenarioSections>, RepositoryError>> {
        Box::pin(std::future::pending())
    }
}

pub struct PanickingEvaluator;

impl QualityEvaluator for PanickingEvaluator {
    fn name(&self) -> &str {
        "panicking"
    }

    fn evaluate<'a>(
        &'a self,
        _report: &'a ComposedReport,
    ) -> BoxFuture<'a, Result<AdvisoryEvaluation, EvaluationError>> {
        Box::pin(async { panic!("scorer crashed") })
    }
}

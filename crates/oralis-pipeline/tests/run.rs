mod common;

use std::collections::BTreeSet;
use std::sync::Arc;

use oralis_core::models::audit::PipelineResult;
use oralis_core::models::intake::Answer;
use oralis_core::models::progress::StageStatus;
use oralis_core::models::qa::GateOutcome;
use oralis_core::models::scenario::Confidence;
use oralis_core::models::section::SectionId;
use oralis_core::models::selection::Tone;
use oralis_pipeline::PipelineConfig;

use common::*;

fn section_numbers(result: &PipelineResult) -> Vec<u8> {
    result
        .report
        .as_ref()
        .map(|r| r.sections.iter().map(|s| s.number.number()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn routine_intake_passes_with_a_complete_report() {
    let pipeline = demo_pipeline();
    let result = pipeline.run_simple(&intake("s-routine", routine_answers())).await;

    assert!(result.success, "unexpected failure: {:?}", result.error);
    assert_eq!(result.outcome, GateOutcome::Pass, "reasons: {:?}", result.audit.qa);
    assert!(result.error.is_none());

    let report = result.report.as_ref().expect("deliverable run carries a report");
    assert_eq!(report.scenario_id, "S01");
    assert_eq!(report.confidence, Confidence::High);
    assert_eq!(report.tone, Tone::Neutral);
    assert!(report.content_gaps.is_empty());
    assert!(report.placeholders_unresolved.is_empty());
    assert!(report.suppressed_sections.is_empty());
    assert_eq!(section_numbers(&result), vec![0, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);

    let summary = report.section(SectionId::PERSONAL_SUMMARY).expect("summary rendered");
    assert!(summary.content.contains("You are missing one tooth"));
    let intro = report.section(SectionId::INTRODUCTION).expect("intro rendered");
    assert!(intro.content.contains("missing teeth"));
    assert!(!intro.content.contains('{'));
}

#[tokio::test]
async fn routine_audit_is_complete() {
    let pipeline = demo_pipeline();
    let result = pipeline.run_simple(&intake("s-audit", routine_answers())).await;
    let audit = &result.audit;

    assert_eq!(audit.session_id, "s-audit");
    assert!(!audit.partial);
    assert_eq!(audit.outcome, result.outcome);
    assert!(audit.failure.is_none());
    assert_eq!(audit.answers.len(), 11);
    assert!(!audit.tags.is_empty());
    assert!(audit.drivers.is_some());
    assert!(audit.scenario.is_some());
    assert!(audit.selections.is_some());
    assert_eq!(audit.report, result.report);
    assert!(audit.qa.is_some());
    assert!(audit.started_at <= audit.completed_at);

    let stages: Vec<(u32, StageStatus)> =
        audit.stages.iter().map(|s| (s.stage_index, s.status)).collect();
    assert_eq!(
        stages,
        (0..7).map(|i| (i, StageStatus::Completed)).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn urgent_intake_suppresses_treatment_sections() {
    let pipeline = demo_pipeline();
    let result = pipeline.run_simple(&intake("s-urgent", urgent_answers())).await;

    // Medium confidence is reported, not blocked.
    assert!(result.success, "unexpected failure: {:?}", result.error);
    assert_eq!(result.outcome, GateOutcome::Flag);

    let report = result.report.as_ref().expect("flagged run carries a report");
    assert_eq!(report.scenario_id, "S07");
    assert_eq!(report.tone, Tone::Direct);

    let suppressed: BTreeSet<u8> = report.suppressed_sections.iter().map(|s| s.number()).collect();
    assert_eq!(suppressed, BTreeSet::from([5, 6, 7, 8, 9]));
    for number in &suppressed {
        assert!(!section_numbers(&result).contains(number));
    }

    let attention = report.section(SectionId::ATTENTION).expect("warnings rendered");
    assert!(attention.content.contains("first step is an assessment"));

    let qa = result.audit.qa.as_ref().expect("qa ran");
    assert!(qa.reasons.iter().any(|r| r.contains("MEDIUM")));
}

#[tokio::test]
async fn contraindicated_intake_is_routed_to_medical_scenario_without_implant_content() {
    let pipeline = demo_pipeline();
    let answers = with_answer(routine_answers(), Answer::list("Q6", ["bisphosphonates"]));
    let result = pipeline.run_simple(&intake("s-contraindicated", answers)).await;

    assert!(result.success, "unexpected failure: {:?}", result.error);
    let report = result.report.as_ref().expect("deliverable run carries a report");
    assert_eq!(report.scenario_id, "S08");

    let suppressed: BTreeSet<u8> = report.suppressed_sections.iter().map(|s| s.number()).collect();
    assert_eq!(suppressed, BTreeSet::from([5, 6, 8]));
    let rendered = section_numbers(&result);
    assert!(rendered.iter().all(|n| !suppressed.contains(n)));
    assert!(rendered.contains(&7));
    assert!(rendered.contains(&9));

    let sources: Vec<&str> = report
        .sections
        .iter()
        .flat_map(|s| s.sources.iter().map(|source| source.block_id.as_str()))
        .collect();
    assert!(
        sources
            .iter()
            .all(|id| !id.starts_with("OPT_IMPLANT") && !id.starts_with("MOD_IMPLANT_")),
        "implant content leaked: {sources:?}"
    );
    assert!(sources.contains(&"C_S08_MEDICAL"));
    assert!(sources.contains(&"A_MEDICAL_CONTRAINDICATION"));
}

#[tokio::test]
async fn missing_required_answer_blocks_at_validation() {
    let pipeline = demo_pipeline();
    let result = pipeline
        .run_simple(&intake("s-missing", without(routine_answers(), "Q5")))
        .await;

    assert!(!result.success);
    assert_eq!(result.outcome, GateOutcome::Block);
    assert!(result.report.is_none());
    let error = result.error.as_deref().expect("error message");
    assert!(error.contains("Q5"), "{error}");

    let audit = &result.audit;
    assert!(audit.partial);
    assert_eq!(audit.failure.as_deref(), Some(error));
    assert!(audit.tags.is_empty());
    assert!(audit.drivers.is_none());
    assert_eq!(audit.stages.len(), 1);
    assert_eq!(audit.stages[0].stage_name, "validate_intake");
    assert_eq!(audit.stages[0].status, StageStatus::Error);
}

#[tokio::test]
async fn blank_required_answer_blocks() {
    let pipeline = demo_pipeline();
    let answers = with_answer(routine_answers(), Answer::list("Q1", ["  "]));
    let result = pipeline.run_simple(&intake("s-blank", answers)).await;

    assert_eq!(result.outcome, GateOutcome::Block);
    assert!(result.error.as_deref().is_some_and(|e| e.contains("Q1")));
}

#[tokio::test]
async fn blank_session_id_blocks() {
    let pipeline = demo_pipeline();
    let result = pipeline.run_simple(&intake("  ", routine_answers())).await;

    assert_eq!(result.outcome, GateOutcome::Block);
    assert!(result.error.as_deref().is_some_and(|e| e.contains("session_id")));
}

#[tokio::test]
async fn no_candidate_scenario_falls_back_and_flags() {
    let pipeline = demo_pipeline();
    let answers = with_answer(routine_answers(), Answer::text("Q2", "none"));
    let result = pipeline.run_simple(&intake("s-fallback", answers)).await;

    let scenario = result.audit.scenario.as_ref().expect("matching ran");
    assert!(scenario.fallback_used);
    assert_eq!(scenario.matched_scenario, "S00");
    assert!(result.outcome.is_deliverable());
    assert_eq!(result.outcome, GateOutcome::Flag);
}

#[tokio::test]
async fn tone_override_from_metadata_is_used() {
    let pipeline = demo_pipeline();
    let mut intake = intake("s-tone", routine_answers());
    intake.metadata.insert("tone".to_string(), "empathic".to_string());
    let result = pipeline.run_simple(&intake).await;

    assert_eq!(result.audit.tone, Some(Tone::Empathic));
}

#[tokio::test]
async fn patient_name_placeholder_resolves_from_metadata() {
    let mut library = library();
    let intro = library
        .blocks
        .get_mut("B_INTRO_GENERAL")
        .expect("intro block");
    intro.default.insert(
        oralis_core::models::intake::Language::En,
        "Dear {PATIENT_NAME}, this report summarises your answers and explains your situation in general terms.".to_string(),
    );
    let pipeline = pipeline(Arc::new(oralis_pipeline::InMemoryRepository::new(library)));

    let mut named = intake("s-name", routine_answers());
    named.metadata.insert("patient_name".to_string(), "Sam".to_string());
    let result = pipeline.run_simple(&named).await;
    let report = result.report.as_ref().expect("report");
    assert!(report.sections[0].content.starts_with("Dear Sam,"));

    let anonymous = pipeline.run_simple(&intake("s-anon", routine_answers())).await;
    let report = anonymous.audit.report.as_ref().expect("report composed");
    assert_eq!(report.placeholders_unresolved, vec!["PATIENT_NAME".to_string()]);
    assert_eq!(anonymous.outcome, GateOutcome::Flag);
}

#[tokio::test]
async fn strict_placeholders_block_unresolved_names() {
    let mut library = library();
    library
        .blocks
        .get_mut("B_INTRO_GENERAL")
        .expect("intro block")
        .default
        .insert(
            oralis_core::models::intake::Language::En,
            "Dear {PATIENT_NAME}, this report summarises your answers and explains your situation in general terms.".to_string(),
        );
    let mut config = PipelineConfig::default();
    config.qa.strict_placeholders = true;
    let pipeline = pipeline_with(
        Arc::new(oralis_pipeline::InMemoryRepository::new(library)),
        config,
    );

    let result = pipeline.run_simple(&intake("s-strict", routine_answers())).await;
    assert_eq!(result.outcome, GateOutcome::Block);
    assert!(result.report.is_none());
    assert!(result.audit.report.is_some());
    assert!(!result.audit.partial);
    assert!(result.error.is_some());
}

#[tokio::test]
async fn concurrent_runs_share_one_pipeline() {
    let pipeline = Arc::new(demo_pipeline());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move {
                let answers = if i % 2 == 0 { routine_answers() } else { urgent_answers() };
                let intake = intake(&format!("s-{i}"), answers);
                pipeline.run_simple(&intake).await
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.await.expect("run task completes");
        assert_eq!(result.audit.session_id, format!("s-{i}"));
        let expected = if i % 2 == 0 { "S01" } else { "S07" };
        assert_eq!(
            result.report.as_ref().map(|r| r.scenario_id.as_str()),
            Some(expected)
        );
    }
}

#[tokio::test]
async fn identical_intakes_compose_identical_reports() {
    let pipeline = demo_pipeline();
    let first = pipeline.run_simple(&intake("s-same", routine_answers())).await;
    let second = pipeline.run_simple(&intake("s-same", routine_answers())).await;

    assert_eq!(first.report, second.report);
    assert_ne!(first.audit.run_id, second.audit.run_id);
}

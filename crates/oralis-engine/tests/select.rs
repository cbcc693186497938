mod common;

use std::collections::BTreeMap;

use oralis_core::models::intake::Answer;
use oralis_core::models::section::SectionId;
use oralis_core::models::selection::{ContentType, Tone};
use oralis_engine::tone::{TONE_OVERRIDE_KEY, resolve_tone};

fn sections(ids: &[u8]) -> Vec<SectionId> {
    ids.iter().map(|n| SectionId::new(*n).expect("valid section")).collect()
}

#[test]
fn urgent_suppresses_treatment_sections_and_keeps_safety_block() {
    let decided = common::decide(&common::catalog(), common::urgent_single_gap());
    let selections = &decided.selections;

    assert_eq!(
        selections.suppressed_sections.iter().copied().collect::<Vec<_>>(),
        sections(&[5, 6, 7, 8, 9])
    );

    let urgent = selections
        .selections
        .iter()
        .find(|s| s.block_id == "A_URGENT_TREATMENT_BLOCKED")
        .expect("urgent warning selected");
    assert!(!urgent.suppressed);
    assert_eq!(urgent.section, SectionId::ATTENTION);

    for s in &selections.selections {
        if selections.suppressed_sections.contains(&s.section) {
            assert!(s.suppressed, "{} in suppressed section left active", s.block_id);
            assert!(s.suppression_reason.is_some());
        }
    }
}

#[test]
fn suppressed_selections_are_kept_with_a_reason() {
    let decided = common::decide(&common::catalog(), common::urgent_single_gap());
    let option = decided
        .selections
        .selections
        .iter()
        .find(|s| s.block_id == "OPT_IMPLANT_SINGLE")
        .expect("option retained");

    assert!(option.suppressed);
    assert!(
        option
            .suppression_reason
            .as_deref()
            .unwrap_or_default()
            .contains("SUP_URGENT")
    );
}

#[test]
fn warnings_are_ordered_by_urgency() {
    let answers = common::with_answer(common::urgent_single_gap(), Answer::text("Q10", "9"));
    let decided = common::decide(&common::catalog(), answers);

    let warnings: Vec<&str> = decided
        .selections
        .selections
        .iter()
        .filter(|s| s.content_type == ContentType::Warning)
        .map(|s| s.block_id.as_str())
        .collect();
    assert_eq!(
        warnings,
        vec!["A_URGENT_TREATMENT_BLOCKED", "A_SWELLING", "A_ANXIETY"]
    );
}

#[test]
fn planning_warnings_are_suppressed_when_urgent() {
    let answers = common::with_answer(common::urgent_single_gap(), Answer::text("Q8", "unknown"));
    let decided = common::decide(&common::catalog(), answers);

    let planning = decided
        .selections
        .selections
        .iter()
        .find(|s| s.block_id == "A_PLANNING_BUDGET")
        .expect("budget warning selected");
    assert!(planning.suppressed);
    // the attention section itself stays active
    assert!(!decided.selections.suppressed_sections.contains(&SectionId::ATTENTION));
}

#[test]
fn contraindication_suppresses_implant_content_only() {
    let answers = common::with_answer(
        common::routine_single_gap(),
        Answer::list("Q6", ["bisphosphonates"]),
    );
    let decided = common::decide(&common::catalog(), answers);
    let selections = &decided.selections;

    assert_eq!(
        selections.suppressed_sections.iter().copied().collect::<Vec<_>>(),
        sections(&[5, 6, 8])
    );
    let care = selections
        .selections
        .iter()
        .find(|s| s.block_id == "MOD_IMPLANT_CARE")
        .expect("implant care module selected");
    assert_eq!(care.section, SectionId::RISKS);
    assert!(care.suppressed);
    assert!(selections.contains_block("A_MEDICAL_CONTRAINDICATION"));
}

#[test]
fn routine_run_selects_scenario_summary_and_statics() {
    let decided = common::decide(&common::catalog(), common::routine_single_gap());
    let selections = &decided.selections;

    assert!(selections.suppressed_sections.is_empty());
    assert!(selections.selections.iter().all(|s| !s.suppressed));

    let primary = selections
        .for_section(SectionId::PERSONAL_SUMMARY)
        .find(|s| s.block_id == "S01")
        .expect("scenario selection");
    assert_eq!(primary.content_type, ContentType::Scenario);
    assert_eq!(primary.priority, 50);

    assert!(selections.contains_block("N_S01_BONE_PRESERVATION"));
    assert!(selections.contains_block("C_S01_SINGLE_TOOTH"));
    assert!(selections.contains_block("STATIC_NEXT_STEPS"));
    assert!(selections.contains_block("STATIC_DISCLAIMER"));
}

#[test]
fn modules_get_one_selection_per_target() {
    let answers = common::with_answer(common::routine_single_gap(), Answer::text("Q10", "8"));
    let decided = common::decide(&common::catalog(), answers);

    let comfort: Vec<_> = decided
        .selections
        .selections
        .iter()
        .filter(|s| s.block_id == "MOD_ANXIETY_COMFORT")
        .collect();
    assert_eq!(comfort.len(), 2);
    assert_eq!(comfort[0].section, SectionId::PERSONAL_SUMMARY);
    assert!(comfort[0].priority < 50);
    assert_eq!(comfort[1].section, SectionId::PROCESS);
    assert!(comfort[1].priority > 50);
}

#[test]
fn next_steps_is_always_neutral() {
    let decided = common::decide(&common::catalog(), common::urgent_single_gap());
    assert_eq!(decided.tone, Tone::Direct);

    let tone_of = |id: &str| {
        decided
            .selections
            .selections
            .iter()
            .find(|s| s.block_id == id)
            .map(|s| s.tone)
    };
    assert_eq!(tone_of("STATIC_NEXT_STEPS"), Some(Tone::Neutral));
    assert_eq!(tone_of("STATIC_DISCLAIMER"), Some(Tone::Direct));
}

#[test]
fn tone_follows_urgency_then_anxiety() {
    let catalog = common::catalog();
    let anxious = common::with_answer(common::routine_single_gap(), Answer::text("Q10", "9"));

    assert_eq!(common::decide(&catalog, common::routine_single_gap()).tone, Tone::Neutral);
    assert_eq!(common::decide(&catalog, anxious.clone()).tone, Tone::Empathic);
    assert_eq!(
        common::decide(&catalog, common::with_answer(anxious, Answer::text("Q5", "severe"))).tone,
        Tone::Direct
    );
}

#[test]
fn tone_override_wins_when_valid() {
    let decided = common::decide(&common::catalog(), common::urgent_single_gap());

    let valid = BTreeMap::from([(TONE_OVERRIDE_KEY.to_string(), "empathic".to_string())]);
    assert_eq!(resolve_tone(&decided.drivers, &valid), Tone::Empathic);

    let invalid = BTreeMap::from([(TONE_OVERRIDE_KEY.to_string(), "cheerful".to_string())]);
    assert_eq!(resolve_tone(&decided.drivers, &invalid), Tone::Direct);
}

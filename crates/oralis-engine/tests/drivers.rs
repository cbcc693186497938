mod common;

use oralis_core::models::driver::{DriverId, DriverSource};
use oralis_core::models::intake::Answer;
use oralis_core::models::tag::Tag;
use oralis_engine::drivers::derive_drivers;
use oralis_engine::tags::extract_tags;

fn tags(answers: &[Answer]) -> Vec<Tag> {
    extract_tags(&common::catalog(), answers)
}

#[test]
fn every_driver_gets_exactly_one_value() {
    let catalog = common::catalog();
    for answers in [vec![], common::routine_single_gap(), common::urgent_single_gap()] {
        let state = derive_drivers(&catalog, &tags(&answers));
        assert_eq!(state.values.len(), DriverId::ALL.len());
        for id in DriverId::ALL {
            let value = state.value(id).expect("driver resolved");
            let spec = catalog.driver(id).expect("driver in catalog");
            assert!(spec.accepts(value), "{id} = {value} not in its value set");
        }
    }
}

#[test]
fn empty_tags_fall_back_everywhere() {
    let catalog = common::catalog();
    let state = derive_drivers(&catalog, &[]);

    assert_eq!(state.fallbacks.len(), DriverId::ALL.len());
    assert!(state.conflicts.is_empty());
    assert_eq!(state.value(DriverId::MouthSituation), Some("multiple_gaps"));
    assert_eq!(state.value(DriverId::BudgetType), Some("unknown"));
    assert!(state.values.values().all(|v| v.is_fallback()));
}

#[test]
fn routine_answers_resolve_without_conflict() {
    let state = derive_drivers(&common::catalog(), &tags(&common::routine_single_gap()));

    assert!(state.conflicts.is_empty());
    assert!(state.is(DriverId::MouthSituation, "single_gap"));
    assert!(state.is(DriverId::ClinicalPriority, "routine"));
    assert!(state.is(DriverId::BudgetType, "balanced"));
    assert!(state.is(DriverId::ToothLocation, "posterior"));
    assert!(state.is(DriverId::RiskProfile, "standard"));
    // nothing points at a front tooth or aesthetic concern
    assert!(state.is(DriverId::AestheticPriority, "normal"));
    assert_eq!(state.fallbacks.len(), 1);
    assert_eq!(state.fallbacks[0].driver, DriverId::AestheticPriority);
}

#[test]
fn conflict_resolves_by_precedence_and_is_recorded() {
    let answers = [Answer::list("Q1", ["pain"]), Answer::text("Q5", "swelling")];
    let state = derive_drivers(&common::catalog(), &tags(&answers));

    assert!(state.is(DriverId::ClinicalPriority, "urgent"));
    let conflict = state
        .conflicts
        .iter()
        .find(|c| c.driver == DriverId::ClinicalPriority)
        .expect("clinical priority conflict");
    assert_eq!(conflict.candidates, vec!["urgent", "elevated"]);
    assert_eq!(conflict.chosen, "urgent");
    assert_eq!(conflict.tags, vec!["pain_severe", "swelling", "concern_pain"]);

    match &state.get(DriverId::ClinicalPriority).expect("value").source {
        DriverSource::Derived { tags } => assert_eq!(tags, &vec!["pain_severe", "swelling"]),
        other => panic!("unexpected source {other:?}"),
    }
}

#[test]
fn same_value_from_two_tags_is_not_a_conflict() {
    let answers = [
        Answer::list("Q1", ["aesthetics"]),
        Answer::list("Q11", ["aesthetics"]),
    ];
    let state = derive_drivers(&common::catalog(), &tags(&answers));

    assert!(state.is(DriverId::AestheticPriority, "high"));
    assert!(
        !state
            .conflicts
            .iter()
            .any(|c| c.driver == DriverId::AestheticPriority)
    );
}

#[test]
fn contraindication_outranks_caution() {
    let answers = [Answer::list("Q6", ["pregnancy", "bisphosphonates"])];
    let state = derive_drivers(&common::catalog(), &tags(&answers));

    assert!(state.is(DriverId::MedicalConstraint, "contraindicated"));
}

#[test]
fn derivation_is_deterministic() {
    let catalog = common::catalog();
    let tags = tags(&common::urgent_single_gap());
    assert_eq!(derive_drivers(&catalog, &tags), derive_drivers(&catalog, &tags));
}

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use oralis_core::models::driver::DriverState;
use oralis_core::models::intake::{Answer, Intake, Language};
use oralis_core::models::scenario::ScenarioMatchResult;
use oralis_core::models::selection::{ContentSelections, Tone};
use oralis_core::models::tag::{Tag, tag_set};
use oralis_engine::compose::BlockTexts;
use oralis_engine::drivers::derive_drivers;
use oralis_engine::scenario::{ScoringConfig, match_scenario};
use oralis_engine::select::select_content;
use oralis_engine::tags::extract_tags;
use oralis_engine::tone::resolve_tone;
use oralis_rules::Catalog;

pub fn catalog() -> Catalog {
    Catalog::standard().expect("standard catalog validates")
}

/// A calm patient with one missing back tooth and a moderate budget.
pub fn routine_single_gap() -> Vec<Answer> {
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

/// Same patient, but with a swelling.
pub fn urgent_single_gap() -> Vec<Answer> {
    with_answer(routine_single_gap(), Answer::text("Q5", "swelling"))
}

/// No missing teeth and no medical or urgent signal: no scenario applies.
pub fn no_candidate() -> Vec<Answer> {
    with_answer(routine_single_gap(), Answer::text("Q2", "none"))
}

/// Replace (or add) the answer for one question.
pub fn with_answer(mut answers: Vec<Answer>, answer: Answer) -> Vec<Answer> {
    answers.retain(|a| a.question_id != answer.question_id);
    answers.push(answer);
    answers
}

pub fn intake(answers: Vec<Answer>) -> Intake {
    Intake {
        session_id: "session-1".to_string(),
        language: Language::En,
        answers,
        metadata: BTreeMap::new(),
    }
}

/// Everything the composer needs, produced by the upstream stages.
pub struct Decided {
    pub intake: Intake,
    pub tags: Vec<Tag>,
    pub tag_set: BTreeSet<String>,
    pub drivers: DriverState,
    pub scenario: ScenarioMatchResult,
    pub tone: Tone,
    pub selections: ContentSelections,
}

pub fn decide(catalog: &Catalog, answers: Vec<Answer>) -> Decided {
    let intake = intake(answers);
    let tags = extract_tags(catalog, &intake.answers);
    let tag_set = tag_set(&tags);
    let drivers = derive_drivers(catalog, &tags);
    let scenario = match_scenario(catalog, &drivers, &tag_set, &ScoringConfig::default());
    let tone = resolve_tone(&drivers, &intake.metadata);
    let selections = select_content(catalog, &drivers, &scenario, tone, &tag_set);
    Decided {
        intake,
        tags,
        tag_set,
        drivers,
        scenario,
        tone,
        selections,
    }
}

/// A body for every selected block, so no section is empty for lack of
/// content.
pub fn texts_for(selections: &ContentSelections) -> BlockTexts {
    selections
        .selections
        .iter()
        .map(|s| {
            (
                s.block_id.clone(),
                format!("Information about {} for this situation.", s.block_id),
            )
        })
        .collect()
}

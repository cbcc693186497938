#![allow(dead_code)]

use std::collections::BTreeSet;

use oralis_core::models::driver::DriverState;
use oralis_core::models::intake::{Answer, Language};
use oralis_core::models::report::{ComposedReport, ReportSection, SectionSource};
use oralis_core::models::scenario::Confidence;
use oralis_core::models::section::SectionId;
use oralis_core::models::selection::{ContentType, Tone};
use oralis_core::models::tag::tag_set;
use oralis_engine::compose::word_count;
use oralis_engine::drivers::derive_drivers;
use oralis_engine::tags::extract_tags;
use oralis_rules::Catalog;

/// Twenty-one plain words, inside every default band.
pub const FILLER: &str = "This overview explains your situation in plain words so that you can \
                          prepare a calm and informed conversation with your dentist.";

pub fn catalog() -> Catalog {
    Catalog::standard().expect("standard catalog validates")
}

pub fn section(number: u8, content: &str, sources: &[(&str, ContentType)]) -> ReportSection {
    let number = SectionId::new(number).expect("valid section");
    ReportSection {
        number,
        name: number.name().to_string(),
        content: content.to_string(),
        sources: sources
            .iter()
            .map(|(id, content_type)| SectionSource {
                block_id: id.to_string(),
                content_type: *content_type,
            })
            .collect(),
        word_count: word_count(content),
    }
}

pub fn report(sections: Vec<ReportSection>) -> ComposedReport {
    ComposedReport {
        session_id: "session-qa".to_string(),
        scenario_id: "S01".to_string(),
        tone: Tone::Neutral,
        language: Language::En,
        confidence: Confidence::High,
        total_word_count: sections.iter().map(|s| s.word_count).sum(),
        sections,
        suppressed_sections: vec![],
        placeholders_resolved: 0,
        placeholders_unresolved: vec![],
        content_gaps: vec![],
    }
}

/// A minimal report that passes every structural check.
pub fn clean_report() -> ComposedReport {
    report(vec![
        section(0, FILLER, &[("B_INTRO_GENERAL", ContentType::Contextual)]),
        section(2, FILLER, &[("S01", ContentType::Scenario)]),
        section(10, FILLER, &[("STATIC_NEXT_STEPS", ContentType::Static)]),
        section(11, FILLER, &[("STATIC_DISCLAIMER", ContentType::Static)]),
    ])
}

pub fn drivers_for(answers: &[Answer]) -> (DriverState, BTreeSet<String>) {
    let catalog = catalog();
    let tags = extract_tags(&catalog, answers);
    (derive_drivers(&catalog, &tags), tag_set(&tags))
}

pub fn urgent_drivers() -> (DriverState, BTreeSet<String>) {
    drivers_for(&[
        Answer::list("Q1", ["missing_teeth"]),
        Answer::text("Q2", "one"),
        Answer::text("Q5", "swelling"),
    ])
}

pub fn codes(issues: &[oralis_core::models::qa::ValidationIssue]) -> Vec<&str> {
    issues.iter().map(|i| i.code.as_str()).collect()
}

mod common;

use oralis_core::models::intake::Language;
use oralis_core::models::qa::{LeakageCategory, LeakageSeverity};
use oralis_core::models::selection::{ContentType, Tone};
use oralis_qa::error::QaError;
use oralis_qa::leakage::LeakageDetector;
use oralis_rules::leakage::LeakagePattern;

use common::section;

fn detector() -> LeakageDetector {
    LeakageDetector::new(common::catalog().leakage_patterns()).expect("patterns compile")
}

fn report_with(text: &str) -> oralis_core::models::report::ComposedReport {
    common::report(vec![section(
        3,
        text,
        &[("B_CONTEXT_SINGLE_GAP", ContentType::Contextual)],
    )])
}

#[test]
fn standard_patterns_compile() {
    assert_eq!(detector().len(), common::catalog().leakage_patterns().len());
}

#[test]
fn guaranteed_outcome_is_critical_in_any_case() {
    let result = detector().scan(&report_with("The result is GUARANTEED to hold."));

    assert_eq!(result.critical.len(), 1);
    let violation = &result.critical[0];
    assert_eq!(violation.pattern_id, "EN_GUARANTEE");
    assert_eq!(violation.category, LeakageCategory::GuaranteedOutcome);
    assert_eq!(violation.severity, LeakageSeverity::Critical);
    assert_eq!(violation.matched, "GUARANTEED");
    assert_eq!(violation.section.number(), 3);
}

#[test]
fn specific_prices_are_critical() {
    let result = detector().scan(&report_with("An implant costs about € 1500 or 1.800 euros."));
    let ids: Vec<&str> = result.critical.iter().map(|v| v.pattern_id.as_str()).collect();
    assert_eq!(ids, vec!["EN_PRICE", "EN_PRICE"]);
}

#[test]
fn diagnosis_is_critical() {
    let result = detector().scan(&report_with("You have periodontitis in the lower jaw."));
    assert_eq!(result.critical[0].category, LeakageCategory::Diagnosis);
}

#[test]
fn superlatives_are_warnings() {
    let result = detector().scan(&report_with("An implant is the best solution for you."));
    assert!(result.critical.is_empty());
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].category, LeakageCategory::Superlative);
}

#[test]
fn tone_specific_patterns_apply_only_to_their_tones() {
    let text = "You must see a dentist soon.";

    let mut empathic = report_with(text);
    empathic.tone = Tone::Empathic;
    assert_eq!(detector().scan(&empathic).warnings.len(), 1);

    let mut direct = report_with(text);
    direct.tone = Tone::Direct;
    assert!(detector().scan(&direct).warnings.is_empty());
}

#[test]
fn patterns_are_language_specific() {
    let mut dutch = report_with("Het resultaat is gegarandeerd, a guaranteed result.");
    dutch.language = Language::Nl;

    let result = detector().scan(&dutch);
    let ids: Vec<&str> = result.critical.iter().map(|v| v.pattern_id.as_str()).collect();
    assert_eq!(ids, vec!["NL_GUARANTEE"]);
}

#[test]
fn neutral_wording_is_clean() {
    let result = detector().scan(&common::clean_report());
    assert!(result.critical.is_empty());
    assert!(result.warnings.is_empty());
}

#[test]
fn invalid_pattern_is_reported_with_its_id() {
    let broken = LeakagePattern {
        id: "BROKEN".to_string(),
        language: Language::En,
        pattern: "(unclosed".to_string(),
        category: LeakageCategory::Superlative,
        severity: LeakageSeverity::Warning,
        tones: vec![],
    };

    match LeakageDetector::new(&[broken]) {
        Err(QaError::Pattern { id, .. }) => assert_eq!(id, "BROKEN"),
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("pattern should not compile"),
    }
}

//! Structural validation of a composed report.
//!
//! Error codes (`E_*`) block delivery; warning codes (`W_*`) flag it.

use std::collections::{BTreeMap, BTreeSet};

use oralis_core::models::driver::DriverState;
use oralis_core::models::qa::{ValidationIssue, ValidationResult};
use oralis_core::models::report::{ComposedReport, ReportSection};
use oralis_core::models::selection::ContentType;
use oralis_engine::placeholder::placeholders_in;
use oralis_engine::select::active_suppressions;
use oralis_rules::Catalog;
use tracing::debug;

use crate::config::QaConfig;

pub const E_REQUIRED_SECTION_MISSING: &str = "E_REQUIRED_SECTION_MISSING";
pub const E_EMPTY_SECTION: &str = "E_EMPTY_SECTION";
pub const E_SECTION_STATE: &str = "E_SECTION_STATE";
pub const E_CARDINALITY: &str = "E_CARDINALITY";
pub const E_SUPPRESSION_LEAK: &str = "E_SUPPRESSION_LEAK";
pub const E_UNRESOLVED_PLACEHOLDER: &str = "E_UNRESOLVED_PLACEHOLDER";
pub const E_CONTENT_GAP: &str = "E_CONTENT_GAP";
pub const W_WORDS_BELOW: &str = "W_WORDS_BELOW";
pub const W_WORDS_ABOVE: &str = "W_WORDS_ABOVE";
pub const W_DUPLICATE_BLOCK: &str = "W_DUPLICATE_BLOCK";
pub const W_UNRESOLVED_PLACEHOLDER: &str = "W_UNRESOLVED_PLACEHOLDER";
pub const W_CONTENT_GAP: &str = "W_CONTENT_GAP";

pub fn validate_report(
    catalog: &Catalog,
    report: &ComposedReport,
    drivers: &DriverState,
    tags: &BTreeSet<String>,
    config: &QaConfig,
) -> ValidationResult {
    let mut result = ValidationResult::default();

    check_section_states(catalog, report, &mut result);
    for section in &report.sections {
        check_cardinality(catalog, section, &mut result);
        check_words(section, config, &mut result);
        check_duplicates(section, &mut result);
    }
    check_suppression_leaks(catalog, report, drivers, tags, &mut result);
    check_placeholders(report, config, &mut result);
    check_gaps(report, config, &mut result);

    debug!(
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "report validated"
    );
    result
}

fn check_section_states(catalog: &Catalog, report: &ComposedReport, result: &mut ValidationResult) {
    for layout in catalog.layouts() {
        let section = layout.section;
        let rendered = report.section(section);
        let suppressed = report.is_suppressed(section);

        if layout.required && rendered.is_none() && !suppressed {
            result.errors.push(ValidationIssue::new(
                E_REQUIRED_SECTION_MISSING,
                Some(section),
                format!("required section {section} ({}) is missing", section.name()),
            ));
        }
        if rendered.is_some() && suppressed {
            result.errors.push(ValidationIssue::new(
                E_SECTION_STATE,
                Some(section),
                format!("section {section} is both rendered and suppressed"),
            ));
        }
    }

    for section in &report.sections {
        if section.content.trim().is_empty() {
            result.errors.push(ValidationIssue::new(
                E_EMPTY_SECTION,
                Some(section.number),
                format!("section {} is rendered without content", section.number),
            ));
        }
    }
}

fn check_cardinality(catalog: &Catalog, section: &ReportSection, result: &mut ValidationResult) {
    let Some(layout) = catalog.layout(section.number) else {
        result.errors.push(ValidationIssue::new(
            E_CARDINALITY,
            Some(section.number),
            format!("section {} has no layout", section.number),
        ));
        return;
    };

    let mut counts: BTreeMap<ContentType, usize> = BTreeMap::new();
    for source in &section.sources {
        *counts.entry(source.content_type).or_default() += 1;
    }

    for (content_type, count) in counts {
        if !layout.accepts(content_type) {
            result.errors.push(ValidationIssue::new(
                E_CARDINALITY,
                Some(section.number),
                format!("section {} does not take {content_type} content", section.number),
            ));
        } else if let Some(max) = layout.cap(content_type).filter(|max| count > *max) {
            result.errors.push(ValidationIssue::new(
                E_CARDINALITY,
                Some(section.number),
                format!(
                    "section {} holds {count} {content_type} blocks (max {max})",
                    section.number
                ),
            ));
        }
    }
}

fn check_words(section: &ReportSection, config: &QaConfig, result: &mut ValidationResult) {
    let Some(band) = config.band(section.number) else {
        return;
    };
    if section.word_count < band.min {
        result.warnings.push(ValidationIssue::new(
            W_WORDS_BELOW,
            Some(section.number),
            format!(
                "section {} has {} words (min {})",
                section.number, section.word_count, band.min
            ),
        ));
    } else if section.word_count > band.max {
        result.warnings.push(ValidationIssue::new(
            W_WORDS_ABOVE,
            Some(section.number),
            format!(
                "section {} has {} words (max {})",
                section.number, section.word_count, band.max
            ),
        ));
    }
}

fn check_duplicates(section: &ReportSection, result: &mut ValidationResult) {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    for source in &section.sources {
        if !seen.insert(source.block_id.as_str()) && reported.insert(source.block_id.as_str()) {
            result.warnings.push(ValidationIssue::new(
                W_DUPLICATE_BLOCK,
                Some(section.number),
                format!("block {} appears more than once", source.block_id),
            ));
        }
    }
}

/// Recompute the suppression set from the drivers and make sure nothing it
/// covers reached the report.
fn check_suppression_leaks(
    catalog: &Catalog,
    report: &ComposedReport,
    drivers: &DriverState,
    tags: &BTreeSet<String>,
    result: &mut ValidationResult,
) {
    for suppression in active_suppressions(catalog, drivers, tags) {
        for section in &report.sections {
            if suppression.sections.contains(&section.number) && !section.content.trim().is_empty()
            {
                result.errors.push(ValidationIssue::new(
                    E_SUPPRESSION_LEAK,
                    Some(section.number),
                    format!(
                        "section {} has content while {} is active",
                        section.number, suppression.rule_id
                    ),
                ));
            }
            for source in &section.sources {
                if suppression.blocks.iter().any(|p| p.matches(&source.block_id)) {
                    result.errors.push(ValidationIssue::new(
                        E_SUPPRESSION_LEAK,
                        Some(section.number),
                        format!(
                            "block {} rendered while {} is active",
                            source.block_id, suppression.rule_id
                        ),
                    ));
                }
            }
        }
    }
}

fn check_placeholders(report: &ComposedReport, config: &QaConfig, result: &mut ValidationResult) {
    let mut names: BTreeSet<String> = report.placeholders_unresolved.iter().cloned().collect();
    for section in &report.sections {
        names.extend(placeholders_in(&section.content));
    }

    for name in names {
        let message = format!("placeholder {{{name}}} left unresolved");
        if config.strict_placeholders {
            result
                .errors
                .push(ValidationIssue::new(E_UNRESOLVED_PLACEHOLDER, None, message));
        } else {
            result
                .warnings
                .push(ValidationIssue::new(W_UNRESOLVED_PLACEHOLDER, None, message));
        }
    }
}

fn check_gaps(report: &ComposedReport, config: &QaConfig, result: &mut ValidationResult) {
    for block_id in &report.content_gaps {
        let message = format!("no content available for block {block_id}");
        if config.content_gaps_block {
            result
                .errors
                .push(ValidationIssue::new(E_CONTENT_GAP, None, message));
        } else {
            result
                .warnings
                .push(ValidationIssue::new(W_CONTENT_GAP, None, message));
        }
    }
}

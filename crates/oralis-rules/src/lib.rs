//! oralis-rules
//!
//! Read-only reference data for the advisory pipeline: question extraction
//! rules, the driver catalog, scenarios, content-selection rule tables,
//! section layouts, engine-owned text and the leakage pattern catalog.
//! Pure data, no I/O.
//!
//! A [`Catalog`] is built once at process start through [`Catalog::new`],
//! which validates every cross-reference (driver values, the single
//! fallback scenario, section layouts). Afterwards it is shared read-only.

pub mod content;
pub mod drivers;
pub mod error;
pub mod layout;
pub mod leakage;
pub mod questions;
pub mod scenarios;
pub mod text;
pub mod trigger;

use std::collections::HashSet;

use oralis_core::models::driver::DriverId;
use oralis_core::models::scenario::{DriverCriterion, Scenario};
use oralis_core::models::section::SectionId;
use oralis_core::models::selection::ContentType;
use serde::{Deserialize, Serialize};

use crate::content::{ContentRules, standard_content_rules};
use crate::drivers::{DriverSpec, standard_drivers};
use crate::error::CatalogError;
use crate::layout::{SectionLayout, standard_layouts};
use crate::leakage::{LeakagePattern, standard_leakage_patterns};
use crate::questions::{Extraction, QuestionRule, standard_questions};
use crate::scenarios::standard_scenarios;

/// The raw, unvalidated tables. Tests substitute individual tables here
/// before handing them to [`Catalog::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogParts {
    pub questions: Vec<QuestionRule>,
    pub drivers: Vec<DriverSpec>,
    pub scenarios: Vec<Scenario>,
    pub content: ContentRules,
    pub layouts: Vec<SectionLayout>,
    pub leakage: Vec<LeakagePattern>,
}

impl CatalogParts {
    pub fn standard() -> Self {
        Self {
            questions: standard_questions(),
            drivers: standard_drivers(),
            scenarios: standard_scenarios(),
            content: standard_content_rules(),
            layouts: standard_layouts(),
            leakage: standard_leakage_patterns(),
        }
    }
}

/// Validated, immutable rule catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    parts: CatalogParts,
    fallback: usize,
}

impl Catalog {
    /// The built-in catalog.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(CatalogParts::standard())
    }

    /// Parse and validate a catalog serialized as JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let parts: CatalogParts = serde_json::from_str(json)?;
        Self::new(parts)
    }

    pub fn new(mut parts: CatalogParts) -> Result<Self, CatalogError> {
        validate_questions(&parts.questions)?;
        validate_drivers(&parts.drivers)?;
        let fallback = validate_scenarios(&parts.scenarios, &parts.drivers)?;
        validate_layouts(&parts.layouts)?;
        validate_content(&parts.content, &parts.layouts, &parts.drivers)?;

        // Lookups below rely on catalog order matching driver order.
        parts.drivers.sort_by_key(|d| d.id);
        parts.layouts.sort_by_key(|l| l.section);

        tracing::debug!(
            questions = parts.questions.len(),
            scenarios = parts.scenarios.len(),
            fallback = %parts.scenarios[fallback].id,
            "rule catalog validated"
        );

        Ok(Self { parts, fallback })
    }

    pub fn questions(&self) -> &[QuestionRule] {
        &self.parts.questions
    }

    pub fn question(&self, question_id: &str) -> Option<&QuestionRule> {
        self.parts.questions.iter().find(|q| q.question_id == question_id)
    }

    /// Driver specs in driver order.
    pub fn drivers(&self) -> &[DriverSpec] {
        &self.parts.drivers
    }

    pub fn driver(&self, id: DriverId) -> Option<&DriverSpec> {
        self.parts.drivers.iter().find(|d| d.id == id)
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.parts.scenarios
    }

    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.parts.scenarios.iter().find(|s| s.id == id)
    }

    /// The single scenario flagged as the universal fallback.
    pub fn fallback_scenario(&self) -> &Scenario {
        &self.parts.scenarios[self.fallback]
    }

    pub fn content(&self) -> &ContentRules {
        &self.parts.content
    }

    /// Layouts in ascending section order.
    pub fn layouts(&self) -> &[SectionLayout] {
        &self.parts.layouts
    }

    pub fn layout(&self, section: SectionId) -> Option<&SectionLayout> {
        self.parts.layouts.iter().find(|l| l.section == section)
    }

    pub fn leakage_patterns(&self) -> &[LeakagePattern] {
        &self.parts.leakage
    }

    pub fn parts(&self) -> &CatalogParts {
        &self.parts
    }
}

fn ensure_unique<'a>(
    kind: &'static str,
    ids: impl IntoIterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_questions(questions: &[QuestionRule]) -> Result<(), CatalogError> {
    ensure_unique("question", questions.iter().map(|q| q.question_id.as_str()))?;
    for question in questions {
        // The first band whose `min` the answer reaches wins.
        let Extraction::Threshold { bands } = &question.extraction else {
            continue;
        };
        if !bands.windows(2).all(|pair| pair[0].min > pair[1].min) {
            return Err(CatalogError::UnsortedBands {
                question: question.question_id.clone(),
            });
        }
    }
    Ok(())
}

fn validate_drivers(drivers: &[DriverSpec]) -> Result<(), CatalogError> {
    ensure_unique("driver", drivers.iter().map(|d| d.id.as_str()))?;
    for id in DriverId::ALL {
        let spec = drivers
            .iter()
            .find(|d| d.id == id)
            .ok_or(CatalogError::MissingDriver(id))?;
        if !spec.accepts(&spec.fallback) {
            return Err(CatalogError::InvalidFallback {
                driver: id,
                value: spec.fallback.clone(),
            });
        }
        for rule in &spec.rules {
            if !spec.accepts(&rule.value) {
                return Err(CatalogError::UnknownDriverValue {
                    driver: id,
                    value: rule.value.clone(),
                    context: format!("tag rule '{}'", rule.tag),
                });
            }
        }
    }
    Ok(())
}

fn validate_criterion(
    criterion: &DriverCriterion,
    drivers: &[DriverSpec],
    context: &str,
) -> Result<(), CatalogError> {
    let spec = drivers
        .iter()
        .find(|d| d.id == criterion.driver)
        .ok_or(CatalogError::MissingDriver(criterion.driver))?;
    for value in &criterion.values {
        if !spec.accepts(value) {
            return Err(CatalogError::UnknownDriverValue {
                driver: criterion.driver,
                value: value.clone(),
                context: context.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_scenarios(scenarios: &[Scenario], drivers: &[DriverSpec]) -> Result<usize, CatalogError> {
    ensure_unique("scenario", scenarios.iter().map(|s| s.id.as_str()))?;

    let fallbacks: Vec<usize> = scenarios
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_fallback)
        .map(|(i, _)| i)
        .collect();
    if fallbacks.len() != 1 {
        return Err(CatalogError::FallbackCount(fallbacks.len()));
    }

    for scenario in scenarios {
        let context = format!("scenario {}", scenario.id);
        for criterion in scenario
            .required
            .iter()
            .chain(&scenario.strong)
            .chain(&scenario.supporting)
            .chain(&scenario.excluding)
        {
            validate_criterion(criterion, drivers, &context)?;
        }
    }

    Ok(fallbacks[0])
}

fn validate_layouts(layouts: &[SectionLayout]) -> Result<(), CatalogError> {
    for section in SectionId::all() {
        match layouts.iter().filter(|l| l.section == section).count() {
            0 => return Err(CatalogError::MissingLayout { section: section.number() }),
            1 => {}
            _ => {
                return Err(CatalogError::DuplicateId {
                    kind: "section layout",
                    id: section.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn check_target(
    layouts: &[SectionLayout],
    block_id: &str,
    section: SectionId,
    content_type: ContentType,
) -> Result<(), CatalogError> {
    let accepts = layouts
        .iter()
        .find(|l| l.section == section)
        .is_some_and(|l| l.accepts(content_type));
    if accepts {
        Ok(())
    } else {
        Err(CatalogError::LayoutMismatch {
            block_id: block_id.to_string(),
            section: section.number(),
            content_type: content_type.to_string(),
        })
    }
}

fn validate_content(
    content: &ContentRules,
    layouts: &[SectionLayout],
    drivers: &[DriverSpec],
) -> Result<(), CatalogError> {
    for rule in &content.suppressions {
        for criterion in rule.trigger.criteria() {
            validate_criterion(criterion, drivers, &format!("suppression {}", rule.id))?;
        }
    }

    ensure_unique(
        "block",
        content
            .warnings
            .iter()
            .chain(&content.blocks)
            .map(|r| r.target.block_id.as_str())
            .chain(content.modules.iter().map(|m| m.target.block_id.as_str()))
            .chain(content.statics.iter().map(|s| s.block_id.as_str())),
    )?;

    for rule in content.warnings.iter().chain(&content.blocks) {
        let target = &rule.target;
        for criterion in rule.trigger.criteria() {
            validate_criterion(criterion, drivers, &format!("block {}", target.block_id))?;
        }
        check_target(layouts, &target.block_id, target.section, target.content_type)?;
    }

    for rule in &content.modules {
        for criterion in rule.trigger.criteria() {
            validate_criterion(criterion, drivers, &format!("module {}", rule.target.block_id))?;
        }
        for target in &rule.target.targets {
            check_target(layouts, &rule.target.block_id, target.section, ContentType::Module)?;
        }
    }

    for block in &content.statics {
        check_target(layouts, &block.block_id, block.section, ContentType::Static)?;
    }

    Ok(())
}

use std::collections::BTreeSet;

use oralis_core::models::driver::DriverState;
use oralis_core::models::qa::{
    GateOutcome, QaGateResult, SemanticLeakageResult, ValidationResult,
};
use oralis_core::models::report::ComposedReport;
use oralis_core::models::scenario::Confidence;
use oralis_rules::Catalog;
use tracing::info;

use crate::config::QaConfig;
use crate::error::QaError;
use crate::leakage::LeakageDetector;
use crate::validate::validate_report;

/// Decide the outcome from validation and leakage results.
///
/// Blocking rules are checked first; once any of them fires the flagging
/// rules are not consulted.
pub fn decide_outcome(
    validation: &ValidationResult,
    leakage: &SemanticLeakageResult,
    confidence: Confidence,
    config: &QaConfig,
) -> (GateOutcome, Vec<String>) {
    let mut blocking = Vec::new();
    if leakage.critical.len() > config.max_critical {
        let ids: BTreeSet<&str> = leakage.critical.iter().map(|v| v.pattern_id.as_str()).collect();
        blocking.push(format!(
            "{} critical leakage violation(s): {}",
            leakage.critical.len(),
            ids.into_iter().collect::<Vec<_>>().join(", ")
        ));
    }
    if validation.errors.len() > config.max_errors {
        let codes: BTreeSet<&str> = validation.errors.iter().map(|e| e.code.as_str()).collect();
        blocking.push(format!(
            "{} structural error(s): {}",
            validation.errors.len(),
            codes.into_iter().collect::<Vec<_>>().join(", ")
        ));
    }
    if !blocking.is_empty() {
        return (GateOutcome::Block, blocking);
    }

    let mut flagging = Vec::new();
    if leakage.warnings.len() > config.max_leakage_warnings {
        flagging.push(format!(
            "{} leakage warning(s)",
            leakage.warnings.len()
        ));
    }
    if validation.warnings.len() > config.max_validation_warnings {
        let codes: BTreeSet<&str> = validation.warnings.iter().map(|w| w.code.as_str()).collect();
        flagging.push(format!(
            "{} structural warning(s): {}",
            validation.warnings.len(),
            codes.into_iter().collect::<Vec<_>>().join(", ")
        ));
    }
    if !confidence.is_high() {
        flagging.push(format!("scenario confidence is {confidence}"));
    }
    if !flagging.is_empty() {
        return (GateOutcome::Flag, flagging);
    }

    (GateOutcome::Pass, Vec::new())
}

/// Structural validation, leakage scan and outcome decision in one place.
pub struct QaGate {
    detector: LeakageDetector,
    config: QaConfig,
}

impl QaGate {
    pub fn new(catalog: &Catalog, config: QaConfig) -> Result<Self, QaError> {
        Ok(Self {
            detector: LeakageDetector::new(catalog.leakage_patterns())?,
            config,
        })
    }

    pub fn config(&self) -> &QaConfig {
        &self.config
    }

    pub fn check(
        &self,
        catalog: &Catalog,
        report: &ComposedReport,
        drivers: &DriverState,
        tags: &BTreeSet<String>,
    ) -> QaGateResult {
        let validation = validate_report(catalog, report, drivers, tags, &self.config);
        let leakage = self.detector.scan(report);
        let (outcome, reasons) =
            decide_outcome(&validation, &leakage, report.confidence, &self.config);

        info!(
            session_id = %report.session_id,
            outcome = %outcome,
            errors = validation.errors.len(),
            warnings = validation.warnings.len(),
            critical = leakage.critical.len(),
            leakage_warnings = leakage.warnings.len(),
            "qa gate decided"
        );

        QaGateResult {
            validation,
            leakage,
            advisory: None,
            outcome,
            reasons,
        }
    }
}

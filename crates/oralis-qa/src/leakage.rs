use oralis_core::models::qa::{LeakageSeverity, LeakageViolation, SemanticLeakageResult};
use oralis_core::models::report::ComposedReport;
use oralis_rules::leakage::LeakagePattern;
use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::error::QaError;

struct CompiledPattern {
    spec: LeakagePattern,
    regex: Regex,
}

/// Scans rendered report text for wording the advisory must never contain.
pub struct LeakageDetector {
    patterns: Vec<CompiledPattern>,
}

impl LeakageDetector {
    /// Compile every pattern case-insensitively. A pattern that fails to
    /// compile is a catalog error, reported with its id.
    pub fn new(patterns: &[LeakagePattern]) -> Result<Self, QaError> {
        let patterns = patterns
            .iter()
            .map(|spec| {
                RegexBuilder::new(&spec.pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|regex| CompiledPattern {
                        spec: spec.clone(),
                        regex,
                    })
                    .map_err(|source| QaError::Pattern {
                        id: spec.id.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Only rendered section content is scanned; suppressed sections have
    /// none.
    pub fn scan(&self, report: &ComposedReport) -> SemanticLeakageResult {
        let mut result = SemanticLeakageResult::default();

        let applicable: Vec<&CompiledPattern> = self
            .patterns
            .iter()
            .filter(|p| p.spec.applies_to(report.language, report.tone))
            .collect();

        for section in &report.sections {
            for pattern in &applicable {
                for found in pattern.regex.find_iter(&section.content) {
                    let violation = LeakageViolation {
                        pattern_id: pattern.spec.id.clone(),
                        category: pattern.spec.category,
                        severity: pattern.spec.severity,
                        section: section.number,
                        matched: found.as_str().to_string(),
                    };
                    debug!(
                        pattern = %violation.pattern_id,
                        section = %section.number,
                        matched = %violation.matched,
                        "leakage pattern matched"
                    );
                    match violation.severity {
                        LeakageSeverity::Critical => result.critical.push(violation),
                        LeakageSeverity::Warning => result.warnings.push(violation),
                    }
                }
            }
        }

        result
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::section::SectionId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidationIssue {
    /// Stable machine code, e.g. `E_EMPTY_SECTION` or `W_WORDS_BELOW`.
    pub code: String,
    pub section: Option<SectionId>,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(code: &str, section: Option<SectionId>, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            section,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LeakageSeverity {
    Critical,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LeakageCategory {
    GuaranteedOutcome,
    SpecificPrice,
    Diagnosis,
    ToneDrift,
    Superlative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeakageViolation {
    pub pattern_id: String,
    pub category: LeakageCategory,
    pub severity: LeakageSeverity,
    pub section: SectionId,
    /// The matched text as it appears in the section.
    pub matched: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SemanticLeakageResult {
    pub critical: Vec<LeakageViolation>,
    pub warnings: Vec<LeakageViolation>,
}

/// Informational quality score from the optional evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdvisoryEvaluation {
    pub score: f64,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum GateOutcome {
    Pass,
    Flag,
    Block,
}

impl GateOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateOutcome::Pass => "PASS",
            GateOutcome::Flag => "FLAG",
            GateOutcome::Block => "BLOCK",
        }
    }

    pub fn is_deliverable(&self) -> bool {
        !matches!(self, GateOutcome::Block)
    }
}

impl fmt::Display for GateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QaGateResult {
    pub validation: ValidationResult,
    pub leakage: SemanticLeakageResult,
    /// Attached after the outcome is fixed; never changes it.
    pub advisory: Option<AdvisoryEvaluation>,
    pub outcome: GateOutcome,
    pub reasons: Vec<String>,
}

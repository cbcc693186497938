use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The fixed set of situational variables. Declaration order is the
/// canonical driver order used for logs and audit output.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DriverId {
    MouthSituation,
    ClinicalPriority,
    MedicalConstraint,
    BudgetType,
    TimeHorizon,
    AnxietyLevel,
    AestheticPriority,
    RiskProfile,
    ToothLocation,
    ProsthesisStatus,
}

impl DriverId {
    pub const ALL: [DriverId; 10] = [
        DriverId::MouthSituation,
        DriverId::ClinicalPriority,
        DriverId::MedicalConstraint,
        DriverId::BudgetType,
        DriverId::TimeHorizon,
        DriverId::AnxietyLevel,
        DriverId::AestheticPriority,
        DriverId::RiskProfile,
        DriverId::ToothLocation,
        DriverId::ProsthesisStatus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DriverId::MouthSituation => "mouth_situation",
            DriverId::ClinicalPriority => "clinical_priority",
            DriverId::MedicalConstraint => "medical_constraint",
            DriverId::BudgetType => "budget_type",
            DriverId::TimeHorizon => "time_horizon",
            DriverId::AnxietyLevel => "anxiety_level",
            DriverId::AestheticPriority => "aesthetic_priority",
            DriverId::RiskProfile => "risk_profile",
            DriverId::ToothLocation => "tooth_location",
            DriverId::ProsthesisStatus => "prosthesis_status",
        }
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriverId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DriverId::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| CoreError::UnknownDriver(s.to_string()))
    }
}

/// Where a driver's value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum DriverSource {
    /// Resolved from the listed tag labels.
    Derived { tags: Vec<String> },
    /// No tag resolved the driver; the declared fallback was applied.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DriverValue {
    pub driver: DriverId,
    pub value: String,
    pub source: DriverSource,
}

impl DriverValue {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, DriverSource::Fallback)
    }
}

/// Two or more tags implied different values for the same driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DriverConflict {
    pub driver: DriverId,
    /// Distinct candidate values, in precedence order.
    pub candidates: Vec<String>,
    pub chosen: String,
    /// Every tag that contributed a candidate.
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DriverFallback {
    pub driver: DriverId,
    pub value: String,
    pub reason: String,
}

/// The resolved value of every driver plus the conflict and fallback logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DriverState {
    pub values: BTreeMap<DriverId, DriverValue>,
    pub conflicts: Vec<DriverConflict>,
    pub fallbacks: Vec<DriverFallback>,
}

impl DriverState {
    pub fn get(&self, driver: DriverId) -> Option<&DriverValue> {
        self.values.get(&driver)
    }

    /// The resolved value string for `driver`, if present.
    pub fn value(&self, driver: DriverId) -> Option<&str> {
        self.values.get(&driver).map(|v| v.value.as_str())
    }

    /// True when `driver` resolved to exactly `value`.
    pub fn is(&self, driver: DriverId, value: &str) -> bool {
        self.value(driver) == Some(value)
    }

    /// True when `driver` resolved to any of `values`.
    pub fn is_any(&self, driver: DriverId, values: &[String]) -> bool {
        self.value(driver)
            .is_some_and(|v| values.iter().any(|candidate| candidate == v))
    }
}

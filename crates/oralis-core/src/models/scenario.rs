use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::driver::{DriverId, DriverState};

/// A driver condition: the driver's resolved value must be one of `values`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DriverCriterion {
    pub driver: DriverId,
    pub values: Vec<String>,
}

impl DriverCriterion {
    pub fn new<I, S>(driver: DriverId, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            driver,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, state: &DriverState) -> bool {
        state.is_any(self.driver, &self.values)
    }
}

/// A predefined situational archetype.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    /// Static tie-break; lower wins.
    pub priority: u32,
    #[serde(default)]
    pub is_fallback: bool,
    /// All must match or the scenario is excluded.
    #[serde(default)]
    pub required: Vec<DriverCriterion>,
    #[serde(default)]
    pub strong: Vec<DriverCriterion>,
    #[serde(default)]
    pub supporting: Vec<DriverCriterion>,
    /// Any match disqualifies the scenario.
    #[serde(default)]
    pub excluding: Vec<DriverCriterion>,
    #[serde(default)]
    pub preferred_tags: Vec<String>,
    /// Scenario-specific blocks for the context section.
    #[serde(default)]
    pub nuance_blocks: Vec<String>,
    /// Scenario-specific blocks for the cost section.
    #[serde(default)]
    pub cost_blocks: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Confidence {
    High,
    Medium,
    Low,
    Fallback,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "HIGH",
            Confidence::Medium => "MEDIUM",
            Confidence::Low => "LOW",
            Confidence::Fallback => "FALLBACK",
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, Confidence::High)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum ScoreStatus {
    Scored {
        score: f64,
        strong_hits: u32,
        supporting_hits: u32,
        tag_hits: u32,
    },
    /// Excluded before scoring; there is no score.
    Excluded { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScenarioScore {
    pub scenario_id: String,
    pub priority: u32,
    pub status: ScoreStatus,
}

impl ScenarioScore {
    pub fn score(&self) -> Option<f64> {
        match self.status {
            ScoreStatus::Scored { score, .. } => Some(score),
            ScoreStatus::Excluded { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScenarioMatchResult {
    pub matched_scenario: String,
    pub score: f64,
    pub confidence: Confidence,
    /// Scored scenarios best-first, then excluded scenarios.
    pub ranking: Vec<ScenarioScore>,
    pub fallback_used: bool,
    pub fallback_reason: Option<String>,
}

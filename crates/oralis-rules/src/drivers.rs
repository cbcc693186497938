//! Driver catalog: closed value sets, precedence, fallbacks and the tag
//! rules that imply each value.

use oralis_core::models::driver::DriverId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRule {
    pub tag: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverSpec {
    pub id: DriverId,
    /// The closed value set in precedence order. On conflict the value
    /// listed first wins, so safety-relevant values come first.
    pub values: Vec<String>,
    pub fallback: String,
    pub rules: Vec<TagRule>,
}

impl DriverSpec {
    pub fn precedence(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    pub fn accepts(&self, value: &str) -> bool {
        self.precedence(value).is_some()
    }
}

fn spec(id: DriverId, values: &[&str], fallback: &str, rules: &[(&str, &str)]) -> DriverSpec {
    DriverSpec {
        id,
        values: values.iter().map(|v| v.to_string()).collect(),
        fallback: fallback.to_string(),
        rules: rules
            .iter()
            .map(|(tag, value)| TagRule {
                tag: tag.to_string(),
                value: value.to_string(),
            })
            .collect(),
    }
}

pub fn standard_drivers() -> Vec<DriverSpec> {
    vec![
        spec(
            DriverId::MouthSituation,
            &["edentulous", "extensive_loss", "multiple_gaps", "single_gap", "no_loss"],
            "multiple_gaps",
            &[
                ("loss_complete", "edentulous"),
                ("loss_extensive", "extensive_loss"),
                ("loss_multiple", "multiple_gaps"),
                ("loss_single", "single_gap"),
                ("loss_none", "no_loss"),
            ],
        ),
        spec(
            DriverId::ClinicalPriority,
            &["urgent", "elevated", "routine"],
            "routine",
            &[
                ("pain_severe", "urgent"),
                ("swelling", "urgent"),
                ("pain_mild", "elevated"),
                ("concern_pain", "elevated"),
                ("concern_loose", "elevated"),
                ("pain_none", "routine"),
            ],
        ),
        spec(
            DriverId::MedicalConstraint,
            &["contraindicated", "caution", "none"],
            "none",
            &[
                ("health_bisphosphonates", "contraindicated"),
                ("health_radiotherapy", "contraindicated"),
                ("health_diabetes_uncontrolled", "contraindicated"),
                ("health_pregnancy", "caution"),
                ("health_diabetes_controlled", "caution"),
                ("health_blood_thinners", "caution"),
                ("health_none", "none"),
            ],
        ),
        spec(
            DriverId::BudgetType,
            &["economy", "balanced", "premium", "unknown"],
            "unknown",
            &[
                ("budget_minimal", "economy"),
                ("priority_cost", "economy"),
                ("budget_moderate", "balanced"),
                ("budget_flexible", "premium"),
                ("budget_unknown", "unknown"),
            ],
        ),
        spec(
            DriverId::TimeHorizon,
            &["immediate", "planned", "flexible"],
            "planned",
            &[
                ("timeline_asap", "immediate"),
                ("priority_speed", "immediate"),
                ("timeline_months", "planned"),
                ("timeline_flexible", "flexible"),
            ],
        ),
        spec(
            DriverId::AnxietyLevel,
            &["high", "moderate", "low"],
            "low",
            &[
                ("anxiety_high", "high"),
                ("anxiety_moderate", "moderate"),
                ("anxiety_low", "low"),
            ],
        ),
        spec(
            DriverId::AestheticPriority,
            &["high", "normal"],
            "normal",
            &[
                ("concern_aesthetics", "high"),
                ("priority_aesthetics", "high"),
                ("location_front", "high"),
            ],
        ),
        spec(
            DriverId::RiskProfile,
            &["elevated", "standard"],
            "standard",
            &[
                ("smoker_heavy", "elevated"),
                ("health_diabetes_controlled", "elevated"),
                ("smoker_light", "standard"),
                ("non_smoker", "standard"),
            ],
        ),
        spec(
            DriverId::ToothLocation,
            &["anterior", "posterior", "mixed"],
            "mixed",
            &[
                ("location_front", "anterior"),
                ("location_back", "posterior"),
                ("location_mixed", "mixed"),
            ],
        ),
        spec(
            DriverId::ProsthesisStatus,
            &["removable", "fixed", "none"],
            "none",
            &[
                ("prosthesis_removable", "removable"),
                ("prosthesis_fixed", "fixed"),
                ("prosthesis_none", "none"),
            ],
        ),
    ]
}

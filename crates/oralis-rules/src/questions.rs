//! Per-question tag extraction rules.

use serde::{Deserialize, Serialize};

/// Questions that must be answered (non-blank) before the pipeline runs.
pub const REQUIRED_QUESTIONS: [&str; 3] = ["Q1", "Q2", "Q5"];

/// Question whose first value feeds the `PRIMARY_CONCERN` placeholder.
pub const PRIMARY_CONCERN_QUESTION: &str = "Q1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueMapping {
    pub value: String,
    pub tags: Vec<String>,
}

/// Numeric band; the first band whose `min` the answer reaches wins, so
/// bands are kept in descending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBand {
    pub min: f64,
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Extraction {
    /// Map the (first) answer value to tags.
    Direct { mapping: Vec<ValueMapping> },
    /// Parse the answer as a number and emit the tag of the first band
    /// it reaches.
    Threshold { bands: Vec<ThresholdBand> },
    /// Expand every value of a list answer.
    MultiValue { mapping: Vec<ValueMapping> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRule {
    pub question_id: String,
    pub label: String,
    pub extraction: Extraction,
}

fn map(pairs: &[(&str, &[&str])]) -> Vec<ValueMapping> {
    pairs
        .iter()
        .map(|(value, tags)| ValueMapping {
            value: value.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        })
        .collect()
}

fn bands(pairs: &[(f64, &str)]) -> Vec<ThresholdBand> {
    let mut out: Vec<ThresholdBand> = pairs
        .iter()
        .map(|(min, tag)| ThresholdBand {
            min: *min,
            tag: tag.to_string(),
        })
        .collect();
    out.sort_by(|a, b| b.min.total_cmp(&a.min));
    out
}

fn question(id: &str, label: &str, extraction: Extraction) -> QuestionRule {
    QuestionRule {
        question_id: id.to_string(),
        label: label.to_string(),
        extraction,
    }
}

pub fn standard_questions() -> Vec<QuestionRule> {
    vec![
        question(
            "Q1",
            "Main concerns",
            Extraction::MultiValue {
                mapping: map(&[
                    ("missing_teeth", &["concern_missing"]),
                    ("loose_teeth", &["concern_loose"]),
                    ("aesthetics", &["concern_aesthetics"]),
                    ("pain", &["concern_pain"]),
                    ("chewing", &["concern_chewing"]),
                ]),
            },
        ),
        question(
            "Q2",
            "Missing teeth",
            Extraction::Direct {
                mapping: map(&[
                    ("none", &["loss_none"]),
                    ("one", &["loss_single"]),
                    ("several", &["loss_multiple"]),
                    ("most", &["loss_extensive"]),
                    ("all", &["loss_complete"]),
                ]),
            },
        ),
        question(
            "Q3",
            "Location of the gap",
            Extraction::Direct {
                mapping: map(&[
                    ("front", &["location_front"]),
                    ("back", &["location_back"]),
                    ("both", &["location_mixed"]),
                ]),
            },
        ),
        question(
            "Q4",
            "Current prosthesis",
            Extraction::Direct {
                mapping: map(&[
                    ("none", &["prosthesis_none"]),
                    ("partial_denture", &["prosthesis_removable"]),
                    ("full_denture", &["prosthesis_removable"]),
                    ("bridge", &["prosthesis_fixed"]),
                ]),
            },
        ),
        question(
            "Q5",
            "Pain or swelling",
            Extraction::Direct {
                mapping: map(&[
                    ("none", &["pain_none"]),
                    ("mild", &["pain_mild"]),
                    ("severe", &["pain_severe"]),
                    ("swelling", &["pain_severe", "swelling"]),
                ]),
            },
        ),
        question(
            "Q6",
            "Health conditions",
            Extraction::MultiValue {
                mapping: map(&[
                    ("diabetes_uncontrolled", &["health_diabetes_uncontrolled"]),
                    ("diabetes_controlled", &["health_diabetes_controlled"]),
                    ("bisphosphonates", &["health_bisphosphonates"]),
                    ("radiotherapy", &["health_radiotherapy"]),
                    ("pregnancy", &["health_pregnancy"]),
                    ("blood_thinners", &["health_blood_thinners"]),
                    ("none", &["health_none"]),
                ]),
            },
        ),
        question(
            "Q7",
            "Cigarettes per day",
            Extraction::Threshold {
                bands: bands(&[(10.0, "smoker_heavy"), (1.0, "smoker_light"), (0.0, "non_smoker")]),
            },
        ),
        question(
            "Q8",
            "Budget",
            Extraction::Direct {
                mapping: map(&[
                    ("minimal", &["budget_minimal"]),
                    ("moderate", &["budget_moderate"]),
                    ("flexible", &["budget_flexible"]),
                    ("unknown", &["budget_unknown"]),
                ]),
            },
        ),
        question(
            "Q9",
            "Timeline",
            Extraction::Direct {
                mapping: map(&[
                    ("asap", &["timeline_asap"]),
                    ("months", &["timeline_months"]),
                    ("no_rush", &["timeline_flexible"]),
                ]),
            },
        ),
        question(
            "Q10",
            "Dental anxiety (0-10)",
            Extraction::Threshold {
                bands: bands(&[(7.0, "anxiety_high"), (4.0, "anxiety_moderate"), (0.0, "anxiety_low")]),
            },
        ),
        question(
            "Q11",
            "Priorities",
            Extraction::MultiValue {
                mapping: map(&[
                    ("aesthetics", &["priority_aesthetics"]),
                    ("durability", &["priority_durability"]),
                    ("cost", &["priority_cost"]),
                    ("speed", &["priority_speed"]),
                    ("minimally_invasive", &["priority_minimal"]),
                ]),
            },
        ),
    ]
}

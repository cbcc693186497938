//! Semantic leakage pattern catalog.
//!
//! Patterns are case-insensitive regular expressions, compiled once by the
//! QA crate. A pattern without tones applies to every tone.

use oralis_core::models::intake::Language;
use oralis_core::models::qa::{LeakageCategory, LeakageSeverity};
use oralis_core::models::selection::Tone;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeakagePattern {
    pub id: String,
    pub language: Language,
    pub pattern: String,
    pub category: LeakageCategory,
    pub severity: LeakageSeverity,
    #[serde(default)]
    pub tones: Vec<Tone>,
}

impl LeakagePattern {
    pub fn applies_to(&self, language: Language, tone: Tone) -> bool {
        self.language == language && (self.tones.is_empty() || self.tones.contains(&tone))
    }
}

fn pattern(
    id: &str,
    language: Language,
    regex: &str,
    category: LeakageCategory,
    tones: &[Tone],
) -> LeakagePattern {
    let severity = match category {
        LeakageCategory::GuaranteedOutcome
        | LeakageCategory::SpecificPrice
        | LeakageCategory::Diagnosis => LeakageSeverity::Critical,
        LeakageCategory::ToneDrift | LeakageCategory::Superlative => LeakageSeverity::Warning,
    };
    LeakagePattern {
        id: id.to_string(),
        language,
        pattern: regex.to_string(),
        category,
        severity,
        tones: tones.to_vec(),
    }
}

pub fn standard_leakage_patterns() -> Vec<LeakagePattern> {
    use Language::*;
    use LeakageCategory::*;

    vec![
        // English, critical
        pattern("EN_GUARANTEE", En, r"\bguarantee(?:d|s)?\b", GuaranteedOutcome, &[]),
        pattern(
            "EN_CERTAIN_SUCCESS",
            En,
            r"\b(?:100\s?%|always)\s+(?:successful|succeeds|works)\b",
            GuaranteedOutcome,
            &[],
        ),
        pattern(
            "EN_LIFETIME",
            En,
            r"\blasts?\s+(?:a\s+)?lifetime\b|\bpermanent\s+solution\b",
            GuaranteedOutcome,
            &[],
        ),
        pattern(
            "EN_PRICE",
            En,
            r"[€$£]\s?\d+|\b\d+(?:[.,]\d+)?\s?(?:euros?|eur|dollars?)\b",
            SpecificPrice,
            &[],
        ),
        pattern(
            "EN_DIAGNOSIS",
            En,
            r"\byou\s+(?:have|suffer\s+from)\s+(?:periodontitis|gum\s+disease|an\s+infection|bone\s+loss)\b|\bdiagnosed\s+with\b",
            Diagnosis,
            &[],
        ),
        // English, warning
        pattern(
            "EN_MINIMIZING",
            En,
            r"\b(?:painless|nothing\s+to\s+worry\s+about|don'?t\s+worry)\b",
            ToneDrift,
            &[],
        ),
        pattern("EN_ALARMING", En, r"\b(?:dangerous|alarming|catastrophic)\b", ToneDrift, &[Tone::Empathic, Tone::Neutral]),
        pattern("EN_DIRECTIVE", En, r"\byou\s+must\b", ToneDrift, &[Tone::Empathic]),
        pattern(
            "EN_SUPERLATIVE",
            En,
            r"\b(?:best|perfect|ideal)\s+(?:solution|option|choice|treatment)\b",
            Superlative,
            &[],
        ),
        // Dutch, critical
        pattern("NL_GUARANTEE", Nl, r"\b(?:garantie|gegarandeerd)\b", GuaranteedOutcome, &[]),
        pattern(
            "NL_LIFETIME",
            Nl,
            r"\bleven\s?lang\s+mee\b|\bpermanente\s+oplossing\b",
            GuaranteedOutcome,
            &[],
        ),
        pattern("NL_PRICE", Nl, r"€\s?\d+|\b\d+(?:[.,]\d+)?\s?(?:euro|eur)\b", SpecificPrice, &[]),
        pattern(
            "NL_DIAGNOSIS",
            Nl,
            r"\bu\s+heeft\s+(?:parodontitis|een\s+ontsteking|botverlies)\b|\bgediagnosticeerd\b",
            Diagnosis,
            &[],
        ),
        // Dutch, warning
        pattern("NL_MINIMIZING", Nl, r"\b(?:pijnloos|geen\s+zorgen)\b", ToneDrift, &[]),
        pattern("NL_DIRECTIVE", Nl, r"\bu\s+moet\b", ToneDrift, &[Tone::Empathic]),
        pattern(
            "NL_SUPERLATIVE",
            Nl,
            r"\b(?:beste|perfecte|ideale)\s+(?:oplossing|optie|keuze|behandeling)\b",
            Superlative,
            &[],
        ),
    ]
}

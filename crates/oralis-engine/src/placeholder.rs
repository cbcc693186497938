//! `{NAME}` placeholder resolution.
//!
//! Values come from intake answers and derived drivers. Unknown or
//! unavailable names are left verbatim and tallied as unresolved; they
//! never fail composition.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use oralis_core::models::driver::{DriverId, DriverState};
use oralis_core::models::intake::{Intake, Language};
use oralis_rules::questions::PRIMARY_CONCERN_QUESTION;
use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Z][A-Z0-9_]*)\}").expect("placeholder pattern compiles"));

/// Metadata key carrying the patient's display name.
pub const PATIENT_NAME_KEY: &str = "patient_name";

/// Resolved placeholder values for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderContext {
    values: BTreeMap<String, String>,
}

impl PlaceholderContext {
    pub fn from_run(intake: &Intake, drivers: &DriverState, scenario_name: &str) -> Self {
        let language = intake.language;
        let mut values = BTreeMap::new();
        let mut set = |name: &str, value: Option<String>| {
            if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
                values.insert(name.to_string(), v);
            }
        };

        set(
            "PATIENT_NAME",
            intake.metadata.get(PATIENT_NAME_KEY).map(|n| n.trim().to_string()),
        );
        set(
            "PRIMARY_CONCERN",
            intake
                .answer(PRIMARY_CONCERN_QUESTION)
                .and_then(|a| a.first())
                .map(|v| concern_phrase(v, language)),
        );
        set("SCENARIO_NAME", Some(scenario_name.to_string()));

        let mouth = drivers.value(DriverId::MouthSituation);
        set("TREATMENT_COMPLEXITY", mouth.and_then(|m| complexity(m, language)).map(String::from));
        set("TREATMENT_DURATION", mouth.and_then(|m| duration(m, language)).map(String::from));
        set(
            "TIME_HORIZON",
            drivers
                .value(DriverId::TimeHorizon)
                .and_then(|t| horizon(t, language))
                .map(String::from),
        );
        set(
            "BUDGET_APPROACH",
            drivers
                .value(DriverId::BudgetType)
                .and_then(|b| budget(b, language))
                .map(String::from),
        );
        set(
            "TOOTH_LOCATION",
            drivers
                .value(DriverId::ToothLocation)
                .and_then(|l| location(l, language))
                .map(String::from),
        );

        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Running count of substitutions across a whole report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderTally {
    pub resolved: u32,
    pub unresolved: BTreeSet<String>,
}

/// Substitute every known `{NAME}` token in `text`.
pub fn resolve_placeholders(
    text: &str,
    context: &PlaceholderContext,
    tally: &mut PlaceholderTally,
) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| {
            let name = &caps[1];
            match context.get(name) {
                Some(value) => {
                    tally.resolved += 1;
                    value.to_string()
                }
                None => {
                    tally.unresolved.insert(name.to_string());
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}

/// Placeholder names still present in `text`.
pub fn placeholders_in(text: &str) -> BTreeSet<String> {
    PLACEHOLDER
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

fn concern_phrase(value: &str, language: Language) -> String {
    let phrase = match (value, language) {
        ("missing_teeth", Language::En) => "missing teeth",
        ("missing_teeth", Language::Nl) => "ontbrekende tanden",
        ("loose_teeth", Language::En) => "loose teeth",
        ("loose_teeth", Language::Nl) => "loszittende tanden",
        ("aesthetics", Language::En) => "the appearance of your teeth",
        ("aesthetics", Language::Nl) => "het uiterlijk van uw gebit",
        ("pain", Language::En) => "pain",
        ("pain", Language::Nl) => "pijn",
        ("chewing", Language::En) => "difficulty chewing",
        ("chewing", Language::Nl) => "moeite met kauwen",
        (other, _) => return other.replace('_', " "),
    };
    phrase.to_string()
}

fn complexity(mouth: &str, language: Language) -> Option<&'static str> {
    Some(match (mouth, language) {
        ("no_loss", Language::En) => "limited",
        ("no_loss", Language::Nl) => "beperkt",
        ("single_gap", Language::En) => "relatively straightforward",
        ("single_gap", Language::Nl) => "relatief eenvoudig",
        ("multiple_gaps", Language::En) => "moderately complex",
        ("multiple_gaps", Language::Nl) => "gemiddeld complex",
        ("extensive_loss", Language::En) => "complex",
        ("extensive_loss", Language::Nl) => "complex",
        ("edentulous", Language::En) => "comprehensive",
        ("edentulous", Language::Nl) => "omvangrijk",
        _ => return None,
    })
}

fn duration(mouth: &str, language: Language) -> Option<&'static str> {
    Some(match (mouth, language) {
        ("no_loss", Language::En) => "a single visit",
        ("no_loss", Language::Nl) => "één bezoek",
        ("single_gap", Language::En) => "three to six months",
        ("single_gap", Language::Nl) => "drie tot zes maanden",
        ("multiple_gaps", Language::En) => "four to nine months",
        ("multiple_gaps", Language::Nl) => "vier tot negen maanden",
        ("extensive_loss" | "edentulous", Language::En) => "six to twelve months",
        ("extensive_loss" | "edentulous", Language::Nl) => "zes tot twaalf maanden",
        _ => return None,
    })
}

fn horizon(value: &str, language: Language) -> Option<&'static str> {
    Some(match (value, language) {
        ("immediate", Language::En) => "in the coming weeks",
        ("immediate", Language::Nl) => "in de komende weken",
        ("planned", Language::En) => "in the coming months",
        ("planned", Language::Nl) => "in de komende maanden",
        ("flexible", Language::En) => "at a moment that suits you",
        ("flexible", Language::Nl) => "op een moment dat u past",
        _ => return None,
    })
}

fn budget(value: &str, language: Language) -> Option<&'static str> {
    Some(match (value, language) {
        ("economy", Language::En) => "a cost-conscious approach",
        ("economy", Language::Nl) => "een kostenbewuste aanpak",
        ("balanced", Language::En) => "a balance between cost and durability",
        ("balanced", Language::Nl) => "een balans tussen kosten en duurzaamheid",
        ("premium", Language::En) => "an approach focused on durability and comfort",
        ("premium", Language::Nl) => "een aanpak gericht op duurzaamheid en comfort",
        ("unknown", Language::En) => "an approach that fits your budget",
        ("unknown", Language::Nl) => "een aanpak die bij uw budget past",
        _ => return None,
    })
}

fn location(value: &str, language: Language) -> Option<&'static str> {
    Some(match (value, language) {
        ("anterior", Language::En) => "the front of your mouth",
        ("anterior", Language::Nl) => "het voorste deel van uw mond",
        ("posterior", Language::En) => "the back of your mouth",
        ("posterior", Language::Nl) => "het achterste deel van uw mond",
        ("mixed", Language::En) => "several places in your mouth",
        ("mixed", Language::Nl) => "meerdere plaatsen in uw mond",
        _ => return None,
    })
}

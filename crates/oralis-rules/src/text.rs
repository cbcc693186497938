//! Engine-owned text: static boilerplate used when the content repository
//! has no variant, and the uncertainty qualifier.

use oralis_core::models::intake::Language;

/// Built-in text for a static block, if the engine owns one.
pub fn static_boilerplate(block_id: &str, language: Language) -> Option<&'static str> {
    match (block_id, language) {
        ("STATIC_NEXT_STEPS", Language::En) => Some(
            "Discuss this report with your dentist. Bring your questions and this overview \
             to the consultation so you can plan the next step together {TIME_HORIZON}.",
        ),
        ("STATIC_NEXT_STEPS", Language::Nl) => Some(
            "Bespreek dit rapport met uw tandarts. Neem uw vragen en dit overzicht mee naar \
             het consult, zodat u samen de volgende stap kunt plannen {TIME_HORIZON}.",
        ),
        ("STATIC_DISCLAIMER", Language::En) => Some(
            "This report is general information based on your own answers. It does not \
             replace an examination by a dentist, and no rights can be derived from it.",
        ),
        ("STATIC_DISCLAIMER", Language::Nl) => Some(
            "Dit rapport bevat algemene informatie op basis van uw eigen antwoorden. Het \
             vervangt geen onderzoek door een tandarts en er kunnen geen rechten aan worden \
             ontleend.",
        ),
        _ => None,
    }
}

/// Sentence prepended to interpretive sections when the scenario match is
/// not confident.
pub fn uncertainty_sentence(language: Language) -> &'static str {
    match language {
        Language::En => {
            "Your answers do not point to one clear situation, so read the following as a \
             general orientation that your dentist can refine."
        }
        Language::Nl => {
            "Uw antwoorden wijzen niet op één duidelijke situatie; lees het volgende daarom als \
             een algemene oriëntatie die uw tandarts verder kan verfijnen."
        }
    }
}

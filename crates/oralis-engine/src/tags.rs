use oralis_core::models::intake::{Answer, AnswerValue};
use oralis_core::models::tag::Tag;
use oralis_rules::Catalog;
use oralis_rules::questions::{Extraction, ValueMapping};
use tracing::{debug, warn};

/// Map every answer to zero or more canonical tags.
///
/// Output order follows the answers, then the rule's own order. Duplicates
/// are kept. Answers to questions the catalog does not know are skipped so
/// newer intake schemas keep working.
pub fn extract_tags(catalog: &Catalog, answers: &[Answer]) -> Vec<Tag> {
    let mut tags = Vec::new();

    for answer in answers {
        let Some(rule) = catalog.question(&answer.question_id) else {
            debug!(question_id = %answer.question_id, "no extraction rule, answer ignored");
            continue;
        };

        let labels = match &rule.extraction {
            Extraction::Direct { mapping } => answer
                .answer
                .first()
                .map(|value| lookup(mapping, value))
                .unwrap_or_default(),
            Extraction::MultiValue { mapping } => answer
                .answer
                .values()
                .into_iter()
                .flat_map(|value| lookup(mapping, value))
                .collect(),
            Extraction::Threshold { bands } => match parse_number(&answer.answer) {
                Some(number) => bands
                    .iter()
                    .find(|band| number >= band.min)
                    .map(|band| vec![band.tag.as_str()])
                    .unwrap_or_default(),
                None => {
                    warn!(
                        question_id = %answer.question_id,
                        "threshold answer is not a number, no tags emitted"
                    );
                    vec![]
                }
            },
        };

        tags.extend(
            labels
                .into_iter()
                .map(|label| Tag::new(label, answer.question_id.clone())),
        );
    }

    tags
}

fn lookup<'a>(mapping: &'a [ValueMapping], value: &str) -> Vec<&'a str> {
    match mapping.iter().find(|m| m.value.eq_ignore_ascii_case(value)) {
        Some(m) => m.tags.iter().map(String::as_str).collect(),
        None => {
            debug!(value, "answer value has no tag mapping");
            vec![]
        }
    }
}

fn parse_number(answer: &AnswerValue) -> Option<f64> {
    answer
        .first()
        .and_then(|v| v.replace(',', ".").parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

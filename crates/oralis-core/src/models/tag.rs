use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A canonical label derived from one questionnaire answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Tag {
    pub label: String,
    pub question_id: String,
}

impl Tag {
    pub fn new(label: impl Into<String>, question_id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            question_id: question_id.into(),
        }
    }
}

/// Deduplicated view of the extracted labels, used by every stage that only
/// asks "is this tag present".
pub fn tag_set(tags: &[Tag]) -> BTreeSet<String> {
    tags.iter().map(|t| t.label.clone()).collect()
}

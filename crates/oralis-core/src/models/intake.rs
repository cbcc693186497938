use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Report language. Content is fetched per language and the engine's own
/// boilerplate (uncertainty sentences, static fallbacks) exists for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Language {
    En,
    Nl,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Nl => "nl",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "nl" => Ok(Language::Nl),
            other => Err(CoreError::UnsupportedLanguage(other.to_string())),
        }
    }
}

/// The raw value of one questionnaire answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum AnswerValue {
    Text(String),
    List(Vec<String>),
}

impl AnswerValue {
    /// True when the answer carries no usable content (blank string or an
    /// empty / all-blank list).
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Text(text) => text.trim().is_empty(),
            AnswerValue::List(items) => items.iter().all(|i| i.trim().is_empty()),
        }
    }

    /// All non-blank values, trimmed. A text answer yields at most one.
    pub fn values(&self) -> Vec<&str> {
        match self {
            AnswerValue::Text(text) => {
                let t = text.trim();
                if t.is_empty() { vec![] } else { vec![t] }
            }
            AnswerValue::List(items) => items
                .iter()
                .map(|i| i.trim())
                .filter(|i| !i.is_empty())
                .collect(),
        }
    }

    /// First non-blank value.
    pub fn first(&self) -> Option<&str> {
        self.values().into_iter().next()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Answer {
    pub question_id: String,
    pub answer: AnswerValue,
}

impl Answer {
    pub fn text(question_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            answer: AnswerValue::Text(value.into()),
        }
    }

    pub fn list<I, S>(question_id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question_id: question_id.into(),
            answer: AnswerValue::List(values.into_iter().map(Into::into).collect()),
        }
    }
}

/// One completed questionnaire, as handed over by the intake collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Intake {
    pub session_id: String,
    pub language: Language,
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Intake {
    /// Look up an answer by question id. If a question was answered twice
    /// the first answer wins.
    pub fn answer(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers
            .iter()
            .find(|a| a.question_id == question_id)
            .map(|a| &a.answer)
    }
}

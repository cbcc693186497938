use oralis_core::BoxFuture;
use oralis_core::models::qa::AdvisoryEvaluation;
use oralis_core::models::report::ComposedReport;

use crate::error::EvaluationError;

/// Optional second opinion on a finished report. Its result is attached to
/// the gate result for information only.
pub trait QualityEvaluator: Send + Sync {
    fn name(&self) -> &str;

    fn evaluate<'a>(
        &'a self,
        report: &'a ComposedReport,
    ) -> BoxFuture<'a, Result<AdvisoryEvaluation, EvaluationError>>;
}

/// Scores readability from average sentence length: 1.0 at or below
/// `target_sentence_words`, falling linearly to 0.0 at twice the target.
pub struct ReadabilityEvaluator {
    pub target_sentence_words: f64,
}

impl Default for ReadabilityEvaluator {
    fn default() -> Self {
        Self {
            target_sentence_words: 20.0,
        }
    }
}

impl ReadabilityEvaluator {
    fn score(&self, report: &ComposedReport) -> Result<AdvisoryEvaluation, EvaluationError> {
        let text: Vec<&str> = report.sections.iter().map(|s| s.content.as_str()).collect();
        let words = report.total_word_count;
        if words == 0 {
            return Err(EvaluationError::EmptyReport);
        }

        let sentences = text
            .iter()
            .flat_map(|t| t.split(['.', '!', '?']))
            .filter(|s| !s.trim().is_empty())
            .count()
            .max(1);
        let average = f64::from(words) / sentences as f64;
        let target = self.target_sentence_words.max(1.0);
        let score = (1.0 - (average - target).max(0.0) / target).clamp(0.0, 1.0);

        Ok(AdvisoryEvaluation {
            score,
            summary: format!(
                "{sentences} sentences, {average:.1} words per sentence on average (target {target:.0})"
            ),
        })
    }
}

impl QualityEvaluator for ReadabilityEvaluator {
    fn name(&self) -> &str {
        "readability"
    }

    fn evaluate<'a>(
        &'a self,
        report: &'a ComposedReport,
    ) -> BoxFuture<'a, Result<AdvisoryEvaluation, EvaluationError>> {
        Box::pin(async move { self.score(report) })
    }
}

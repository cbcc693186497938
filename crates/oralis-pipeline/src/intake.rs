use oralis_core::models::intake::Intake;
use oralis_rules::questions::REQUIRED_QUESTIONS;

use crate::error::PipelineError;

/// Reject intakes the pipeline cannot work with. Messages name the
/// offending question so callers can point the patient back to it.
pub fn validate_intake(intake: &Intake) -> Result<(), PipelineError> {
    if intake.session_id.trim().is_empty() {
        return Err(PipelineError::InvalidIntake("session_id is blank".to_string()));
    }

    for question_id in REQUIRED_QUESTIONS {
        match intake.answer(question_id) {
            None => {
                return Err(PipelineError::InvalidIntake(format!(
                    "required question {question_id} is unanswered"
                )));
            }
            Some(answer) if answer.is_blank() => {
                return Err(PipelineError::InvalidIntake(format!(
                    "required question {question_id} has a blank answer"
                )));
            }
            Some(_) => {}
        }
    }

    Ok(())
}

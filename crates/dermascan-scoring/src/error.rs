use thiserror::Error;

use crate::intake::BatchViolation;
use crate::questionnaire::AnswerError;

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("invalid image batch: {}", join(.0))]
    InvalidBatch(Vec<BatchViolation>),
}

#[derive(Debug, Error)]
pub enum QuestionnaireError {
    #[error("incomplete questionnaire: {}", join(.0))]
    Incomplete(Vec<AnswerError>),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("stale response for scan {received} (current scan is {current})")]
    Stale { current: u64, received: u64 },

    #[error("scan {scan_id} has already been classified")]
    AlreadyClassified { scan_id: u64 },

    #[error("scan {scan_id} has no assessment yet")]
    NotAssessed { scan_id: u64 },

    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Questionnaire(#[from] QuestionnaireError),
}

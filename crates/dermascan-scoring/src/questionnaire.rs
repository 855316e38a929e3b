//! The universal symptom questionnaire.
//!
//! A fixed, ordered set of questions. Every answer is an index into the
//! question's option list; options run from least to most suggestive of AD.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use dermascan_core::models::classification::ClassificationResult;
use dermascan_core::models::image::SkinTone;
use dermascan_core::models::symptom::UserType;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Answers keyed by question id.
pub type SymptomAnswers = BTreeMap<String, u8>;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
}

static QUESTIONS: LazyLock<Vec<Question>> = LazyLock::new(|| {
    let table: [(&str, &str, [&str; 4]); 5] = [
        (
            "symptom_duration",
            "How long have these skin symptoms been present?",
            ["Less than 1 week", "1-4 weeks", "1-3 months", "Over 3 months"],
        ),
        (
            "itching_severity",
            "How intense is the itching?",
            [
                "No itching",
                "Mild (occasional, not bothersome)",
                "Moderate (daily, somewhat bothersome)",
                "Severe (constant, disrupts sleep/daily life)",
            ],
        ),
        (
            "skin_texture",
            "How does the affected skin feel to the touch?",
            [
                "Smooth/normal",
                "Slightly rough or dry",
                "Very rough, scaly, or leathery",
                "Oozing, crusting, or open sores",
            ],
        ),
        (
            "location_pattern",
            "Where are the main affected areas located?",
            [
                "Face or neck only",
                "Skin folds (elbows, knees, wrists)",
                "Widespread but in specific areas",
                "Generalized/covering large areas",
            ],
        ),
        (
            "pigmentation_changes",
            "Have you noticed any skin color changes in affected areas?",
            [
                "No color changes",
                "Slight darkening or lightening",
                "Moderate color changes that come and go",
                "Significant dark/light spots that persist",
            ],
        ),
    ];

    table
        .iter()
        .map(|(id, prompt, options)| Question {
            id: id.to_string(),
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        })
        .collect()
});

/// The questionnaire, in presentation order.
pub fn questions() -> &'static [Question] {
    &QUESTIONS
}

pub fn get_question(id: &str) -> Option<&'static Question> {
    questions().iter().find(|q| q.id == id)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum AnswerError {
    #[error("question '{question_id}' is unanswered")]
    Missing { question_id: String },

    #[error("unknown question '{question_id}'")]
    UnknownQuestion { question_id: String },

    #[error("answer {answer} to '{question_id}' is out of range (0..{options})")]
    OutOfRange {
        question_id: String,
        answer: u8,
        options: usize,
    },
}

/// Check a full answer set. Returns every problem found, in question order
/// followed by any unknown ids.
pub fn validate_answers(answers: &SymptomAnswers) -> Vec<AnswerError> {
    let mut errors = Vec::new();

    for question in questions() {
        match answers.get(&question.id) {
            None => errors.push(AnswerError::Missing {
                question_id: question.id.clone(),
            }),
            Some(&answer) if usize::from(answer) >= question.options.len() => {
                errors.push(AnswerError::OutOfRange {
                    question_id: question.id.clone(),
                    answer,
                    options: question.options.len(),
                })
            }
            Some(_) => {}
        }
    }

    for id in answers.keys() {
        if get_question(id).is_none() {
            errors.push(AnswerError::UnknownQuestion {
                question_id: id.clone(),
            });
        }
    }

    errors
}

/// How far through the questionnaire a respondent is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Completion {
    pub answered: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent.
    pub percent: u8,
}

pub fn completion(answers: &SymptomAnswers) -> Completion {
    let total = questions().len();
    let answered = questions()
        .iter()
        .filter(|q| answers.contains_key(&q.id))
        .count();
    let percent = ((answered as f64 / total as f64) * 100.0).round() as u8;
    Completion {
        answered,
        total,
        percent,
    }
}

/// Payload posted to the external questionnaire scoring service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SymptomSubmission {
    /// Scan cycle this submission belongs to; echoed back with the report.
    pub scan_id: u64,
    pub symptom_answers: SymptomAnswers,
    pub scan_results: Vec<ClassificationResult>,
    pub user_type: UserType,
    pub detected_skin_tone: SkinTone,
}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Who answered the symptom questionnaire. Drives the risk weighting.
///
/// Anything other than `"clinician"` deserializes to [`UserType::Patient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum UserType {
    #[default]
    Patient,
    Clinician,
}

impl UserType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "clinician" => UserType::Clinician,
            _ => UserType::Patient,
        }
    }
}

impl<'de> Deserialize<'de> for UserType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_str().map(UserType::from_tag).unwrap_or_default())
    }
}

/// Report returned by the questionnaire scoring service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SymptomAssessmentReport {
    /// Symptom-based AD likelihood in `[0, 1]`.
    pub final_confidence: f64,
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
}

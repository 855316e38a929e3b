use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Classifier variant selected for a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ModelVariant {
    #[default]
    Light,
    /// Tuned for darker skin tones.
    Dark,
}

/// Skin-tone context forwarded to the questionnaire scoring service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SkinTone {
    Light,
    Dark,
}

impl ModelVariant {
    pub fn skin_tone(self) -> SkinTone {
        match self {
            ModelVariant::Light => SkinTone::Light,
            ModelVariant::Dark => SkinTone::Dark,
        }
    }
}

impl SkinTone {
    /// Infer the skin-tone context from a free-form `model_used` string.
    pub fn from_model_name(model_used: &str) -> Self {
        if model_used.to_lowercase().contains("dark") {
            SkinTone::Dark
        } else {
            SkinTone::Light
        }
    }
}

/// Metadata for one image submitted to the classifier.
///
/// The bytes themselves travel to the classifier directly; the session
/// only tracks what was sent so results can be joined back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImageUpload {
    pub id: String,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: u64,
}

/// A per-image failure reported by the classifier alongside its results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImageError {
    pub index: u32,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

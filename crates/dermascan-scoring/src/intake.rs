//! Boundary between the outside world and the scoring core.
//!
//! Uploads are checked before they are sent to the classifier, and the
//! classifier / scoring-service responses are normalized from their loose
//! wire shapes into strict core types. Normalization never fails: malformed
//! entries degrade to documented defaults instead of sinking the batch.

use std::collections::HashSet;

use dermascan_core::models::classification::{ClassificationResult, Label};
use dermascan_core::models::image::{ImageError, ImageUpload};
use dermascan_core::models::symptom::{SymptomAssessmentReport, UserType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use ts_rs::TS;

use crate::combine::clamp01;

pub const MAX_IMAGES: usize = 10;
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
pub const ALLOWED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum BatchViolation {
    #[error("no images submitted")]
    Empty,

    #[error("{count} images submitted, at most {max} allowed")]
    TooMany { count: usize, max: usize },

    #[error("image '{image_id}' is {size_bytes} bytes, at most {max_bytes} allowed")]
    TooLarge {
        image_id: String,
        size_bytes: u64,
        max_bytes: u64,
    },

    #[error("image '{image_id}' has unsupported type '{content_type}'")]
    UnsupportedType {
        image_id: String,
        content_type: String,
    },

    #[error("image id '{image_id}' appears more than once")]
    DuplicateId { image_id: String },
}

/// Check a batch against the classifier's upload limits. Returns every
/// violation found; an empty vec means the batch is acceptable.
pub fn validate_batch(images: &[ImageUpload]) -> Vec<BatchViolation> {
    let mut violations = Vec::new();

    if images.is_empty() {
        violations.push(BatchViolation::Empty);
    }
    if images.len() > MAX_IMAGES {
        violations.push(BatchViolation::TooMany {
            count: images.len(),
            max: MAX_IMAGES,
        });
    }

    let mut seen = HashSet::new();
    for image in images {
        if !seen.insert(image.id.as_str()) {
            violations.push(BatchViolation::DuplicateId {
                image_id: image.id.clone(),
            });
        }
        if image.size_bytes > MAX_IMAGE_BYTES {
            violations.push(BatchViolation::TooLarge {
                image_id: image.id.clone(),
                size_bytes: image.size_bytes,
                max_bytes: MAX_IMAGE_BYTES,
            });
        }
        if !ALLOWED_CONTENT_TYPES.contains(&image.content_type.as_str()) {
            violations.push(BatchViolation::UnsupportedType {
                image_id: image.id.clone(),
                content_type: image.content_type.clone(),
            });
        }
    }

    violations
}

/// One classifier entry as it arrives on the wire. Every field is optional
/// and loosely typed; `normalize_entry` decides what each value means.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawClassification {
    #[serde(default)]
    pub index: Option<Value>,
    #[serde(default)]
    pub image_id: Option<Value>,
    #[serde(default)]
    pub label: Option<Value>,
    #[serde(default, alias = "confidence")]
    pub score: Option<Value>,
    #[serde(default)]
    pub model_used: Option<Value>,
}

/// A per-image failure as it arrives on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawImageError {
    #[serde(default)]
    pub index: Option<Value>,
    #[serde(default)]
    pub filename: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub details: Option<Value>,
}

/// A classifier response, keyed to the scan it was requested for.
#[derive(Debug, Clone, Deserialize)]
pub struct RawClassificationResponse {
    pub scan_id: u64,
    #[serde(default)]
    pub results: Vec<RawClassification>,
    #[serde(default)]
    pub errors: Vec<RawImageError>,
}

/// A classifier response after boundary normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResponse {
    pub scan_id: u64,
    pub results: Vec<ClassificationResult>,
    pub errors: Vec<ImageError>,
}

fn score_of(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|s| s.is_finite())
}

/// A 1-based image index, if the value is a non-negative integer that fits.
fn index_of(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(Value::as_u64)
        .and_then(|i| u32::try_from(i).ok())
}

fn string_of(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

/// Normalize a single entry. `position` is its 0-based place in the
/// response and stands in for a missing or unreadable `index`.
pub fn normalize_entry(raw: &RawClassification, position: usize) -> ClassificationResult {
    let fallback = position as u32 + 1;
    let index = index_of(raw.index.as_ref()).unwrap_or_else(|| {
        if raw.index.as_ref().is_some_and(|v| !v.is_null()) {
            tracing::warn!(position, "unreadable classifier index, using batch position");
        }
        fallback
    });

    let label = match &raw.label {
        Some(Value::String(tag)) => Label::from_tag(tag),
        _ => Label::Unknown,
    };

    let score = match score_of(raw.score.as_ref()) {
        Some(score) => clamp01(score),
        None => {
            if raw.score.as_ref().is_some_and(|v| !v.is_null()) {
                tracing::warn!(index, "non-numeric classifier score, treating as 0");
            }
            0.0
        }
    };

    ClassificationResult {
        index,
        image_id: string_of(raw.image_id.as_ref()),
        label,
        score,
        model_used: string_of(raw.model_used.as_ref()),
    }
}

/// Normalize a per-image failure. An entry without a usable index cannot
/// be matched to any image and is dropped.
pub fn normalize_image_error(raw: &RawImageError) -> Option<ImageError> {
    let Some(index) = index_of(raw.index.as_ref()) else {
        tracing::warn!("classifier error entry without a usable index, skipping");
        return None;
    };

    Some(ImageError {
        index,
        filename: string_of(raw.filename.as_ref()).unwrap_or_default(),
        error: string_of(raw.error.as_ref()).unwrap_or_default(),
        details: string_of(raw.details.as_ref()),
    })
}

/// Normalize a whole classifier response. Results whose index also
/// appears in the error list are dropped: a failed image is absent, not
/// `not_ad`.
pub fn normalize_classification(raw: RawClassificationResponse) -> ClassificationResponse {
    let errors: Vec<ImageError> = raw.errors.iter().filter_map(normalize_image_error).collect();
    let failed: HashSet<u32> = errors.iter().map(|e| e.index).collect();

    let results = raw
        .results
        .iter()
        .enumerate()
        .map(|(position, entry)| normalize_entry(entry, position))
        .filter(|result| !failed.contains(&result.index))
        .collect();

    ClassificationResponse {
        scan_id: raw.scan_id,
        results,
        errors,
    }
}

/// A scoring-service report as it arrives on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSymptomReport {
    #[serde(default)]
    pub final_confidence: Option<Value>,
    #[serde(default)]
    pub user_type: Option<Value>,
    #[serde(default)]
    pub recommendations: Option<Value>,
    #[serde(default)]
    pub next_steps: Option<Value>,
}

fn strings_of(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

pub fn normalize_report(raw: &RawSymptomReport) -> SymptomAssessmentReport {
    let final_confidence = score_of(raw.final_confidence.as_ref()).unwrap_or_else(|| {
        tracing::warn!("missing or non-numeric final_confidence, treating as 0");
        0.0
    });

    let user_type = match &raw.user_type {
        Some(Value::String(tag)) => UserType::from_tag(tag),
        _ => UserType::Patient,
    };

    SymptomAssessmentReport {
        final_confidence,
        user_type,
        recommendations: strings_of(raw.recommendations.as_ref()),
        next_steps: strings_of(raw.next_steps.as_ref()),
    }
}

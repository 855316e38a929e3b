use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Categorical outcome reported by the image classifier for one image.
///
/// Only [`Label::Ad`] counts as positive evidence. Any tag the classifier
/// emits that is not `"ad"` or `"not_ad"` deserializes to
/// [`Label::Unknown`] rather than failing the whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Label {
    Ad,
    NotAd,
    #[default]
    Unknown,
}

impl Label {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ad" => Label::Ad,
            "not_ad" => Label::NotAd,
            _ => Label::Unknown,
        }
    }

    pub fn is_ad(self) -> bool {
        self == Label::Ad
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_str().map(Label::from_tag).unwrap_or_default())
    }
}

/// One classifier verdict for one submitted image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClassificationResult {
    /// 1-based position of the image in the submitted batch.
    pub index: u32,
    /// Stable identifier of the submitted image, when the classifier echoes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    pub label: Label,
    /// Confidence in `[0, 1]` associated with `label`.
    pub score: f64,
    /// Informational only; never affects scoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::symptom::UserType;

/// The blended image + symptom risk for one assessment cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CombinedRiskAssessment {
    pub scan_confidence: f64,
    pub symptom_confidence: f64,
    pub has_ad_classification: bool,
    /// Always within `[0, 1]`.
    pub final_risk: f64,
    /// Role whose weighting produced `final_risk`.
    pub user_type: UserType,
}

impl CombinedRiskAssessment {
    /// Headline risk as a whole-number percentage, e.g. `"56%"`.
    pub fn risk_percent(&self) -> String {
        format!("{:.0}%", self.final_risk * 100.0)
    }
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::classification::ClassificationResult;
use super::image::ModelVariant;
use super::risk::CombinedRiskAssessment;
use super::symptom::SymptomAssessmentReport;

/// A completed assessment persisted by the "save scan" flow.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SavedScan {
    pub id: Uuid,
    /// Scan cycle within the originating session.
    pub scan_id: u64,
    pub model: ModelVariant,
    pub results: Vec<ClassificationResult>,
    pub report: SymptomAssessmentReport,
    pub assessment: CombinedRiskAssessment,
    pub saved_at: jiff::Timestamp,
}

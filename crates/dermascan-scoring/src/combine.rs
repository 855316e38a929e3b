use dermascan_core::models::classification::ClassificationResult;
use dermascan_core::models::risk::CombinedRiskAssessment;
use dermascan_core::models::symptom::{SymptomAssessmentReport, UserType};

use crate::aggregate::{aggregate, ScanEvidence};

/// Relative trust placed in image evidence versus symptom evidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub ai: f64,
    pub symptom: f64,
}

/// Patients' self-report is trusted less than the image evidence.
pub const PATIENT_WEIGHTS: Weights = Weights {
    ai: 0.6,
    symptom: 0.4,
};

/// Clinicians' symptom judgment is trusted more than the image evidence.
pub const CLINICIAN_WEIGHTS: Weights = Weights {
    ai: 0.4,
    symptom: 0.6,
};

/// Discount on symptom-only evidence when no image was classified `ad`.
pub const NO_EVIDENCE_DAMPING: f64 = 0.5;

impl Weights {
    pub fn for_user(user_type: UserType) -> Self {
        match user_type {
            UserType::Clinician => CLINICIAN_WEIGHTS,
            UserType::Patient => PATIENT_WEIGHTS,
        }
    }
}

/// Clamp to `[0, 1]`. NaN maps to 0.
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Blend scan and symptom confidence into the headline risk.
pub fn final_risk(
    scan_confidence: f64,
    symptom_confidence: f64,
    has_ad_classification: bool,
    user_type: UserType,
) -> f64 {
    let weights = Weights::for_user(user_type);
    let raw = if has_ad_classification {
        weights.ai * scan_confidence + weights.symptom * symptom_confidence
    } else {
        weights.symptom * symptom_confidence * NO_EVIDENCE_DAMPING
    };
    clamp01(raw)
}

/// Combine already-aggregated evidence with a symptom report.
pub fn combine(evidence: ScanEvidence, report: &SymptomAssessmentReport) -> CombinedRiskAssessment {
    let symptom_confidence = if report.final_confidence.is_finite() {
        report.final_confidence
    } else {
        0.0
    };

    CombinedRiskAssessment {
        scan_confidence: evidence.scan_confidence,
        symptom_confidence,
        has_ad_classification: evidence.has_ad_classification,
        final_risk: final_risk(
            evidence.scan_confidence,
            symptom_confidence,
            evidence.has_ad_classification,
            report.user_type,
        ),
        user_type: report.user_type,
    }
}

/// Re-aggregate `results` and combine with `report`.
pub fn assess(
    results: &[ClassificationResult],
    report: &SymptomAssessmentReport,
) -> CombinedRiskAssessment {
    let assessment = combine(aggregate(results), report);
    tracing::debug!(
        scan_confidence = assessment.scan_confidence,
        symptom_confidence = assessment.symptom_confidence,
        has_ad = assessment.has_ad_classification,
        final_risk = assessment.final_risk,
        "risk assessed"
    );
    assessment
}

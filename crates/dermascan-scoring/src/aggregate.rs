use dermascan_core::models::classification::ClassificationResult;

use crate::combine::clamp01;

/// Image-only evidence of AD for one scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanEvidence {
    /// Mean score over `ad`-labeled results, or 0 when there are none.
    pub scan_confidence: f64,
    pub has_ad_classification: bool,
}

impl ScanEvidence {
    pub const NONE: ScanEvidence = ScanEvidence {
        scan_confidence: 0.0,
        has_ad_classification: false,
    };
}

/// Collapse per-image results into a single evidence signal.
///
/// Results labeled anything other than `ad` are excluded, not averaged in
/// at zero: the value describes how strong the positive evidence is, not
/// how positive the whole batch is. Only the mean is clamped; a
/// non-finite score counts as 0.
pub fn aggregate(results: &[ClassificationResult]) -> ScanEvidence {
    let ad_scores: Vec<f64> = results
        .iter()
        .filter(|r| r.label.is_ad())
        .map(|r| if r.score.is_finite() { r.score } else { 0.0 })
        .collect();

    if ad_scores.is_empty() {
        return ScanEvidence::NONE;
    }

    let mean = ad_scores.iter().sum::<f64>() / ad_scores.len() as f64;
    ScanEvidence {
        scan_confidence: clamp01(mean),
        has_ad_classification: true,
    }
}

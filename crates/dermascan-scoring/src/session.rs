//! One user's scan cycle.
//!
//! A session moves `NoScan -> Scanned -> Assessed` within a scan cycle.
//! Starting or clearing a scan bumps `scan_id` and drops everything derived
//! from the previous images, so a response that was in flight for an older
//! scan can never be combined with the new one.

use dermascan_core::models::classification::ClassificationResult;
use dermascan_core::models::image::{ImageError, ImageUpload, ModelVariant, SkinTone};
use dermascan_core::models::risk::CombinedRiskAssessment;
use dermascan_core::models::scan::SavedScan;
use dermascan_core::models::symptom::{SymptomAssessmentReport, UserType};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::combine::assess;
use crate::error::{IntakeError, QuestionnaireError, SessionError};
use crate::intake::{validate_batch, ClassificationResponse};
use crate::questionnaire::{validate_answers, SymptomAnswers, SymptomSubmission};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionState {
    /// No classifier response accepted for the current scan.
    NoScan,
    /// Classifier results held, no symptom report yet.
    Scanned,
    /// Both present and a risk has been computed.
    Assessed,
}

/// Handed out when a scan starts. Requests to the classifier and the
/// scoring service carry its `scan_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScanTicket {
    pub scan_id: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ScanSession {
    scan_id: u64,
    model: ModelVariant,
    images: Vec<ImageUpload>,
    classified: bool,
    results: Vec<ClassificationResult>,
    image_errors: Vec<ImageError>,
    report: Option<SymptomAssessmentReport>,
    assessment: Option<CombinedRiskAssessment>,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scan_id(&self) -> u64 {
        self.scan_id
    }

    pub fn model(&self) -> ModelVariant {
        self.model
    }

    pub fn images(&self) -> &[ImageUpload] {
        &self.images
    }

    pub fn results(&self) -> &[ClassificationResult] {
        &self.results
    }

    pub fn image_errors(&self) -> &[ImageError] {
        &self.image_errors
    }

    pub fn report(&self) -> Option<&SymptomAssessmentReport> {
        self.report.as_ref()
    }

    pub fn assessment(&self) -> Option<&CombinedRiskAssessment> {
        self.assessment.as_ref()
    }

    pub fn state(&self) -> SessionState {
        if self.assessment.is_some() {
            SessionState::Assessed
        } else if self.classified {
            SessionState::Scanned
        } else {
            SessionState::NoScan
        }
    }

    /// Discard the current scan and everything derived from it.
    pub fn clear(&mut self) -> ScanTicket {
        self.scan_id += 1;
        self.images.clear();
        self.classified = false;
        self.results.clear();
        self.image_errors.clear();
        self.report = None;
        self.assessment = None;
        tracing::info!(scan_id = self.scan_id, "scan cleared");
        ScanTicket {
            scan_id: self.scan_id,
        }
    }

    /// Validate an image batch and start a new scan cycle with it.
    ///
    /// On a rejected batch the session is left untouched.
    pub fn begin_scan(
        &mut self,
        images: Vec<ImageUpload>,
        model: ModelVariant,
    ) -> Result<ScanTicket, SessionError> {
        let violations = validate_batch(&images);
        if !violations.is_empty() {
            return Err(IntakeError::InvalidBatch(violations).into());
        }

        let ticket = self.clear();
        tracing::info!(
            scan_id = ticket.scan_id,
            images = images.len(),
            ?model,
            "scan started"
        );
        self.images = images;
        self.model = model;
        Ok(ticket)
    }

    fn check_current(&self, received: u64) -> Result<(), SessionError> {
        if received != self.scan_id {
            tracing::warn!(
                current = self.scan_id,
                received,
                "discarding stale response"
            );
            return Err(SessionError::Stale {
                current: self.scan_id,
                received,
            });
        }
        Ok(())
    }

    /// Take the classifier's (normalized) response for the current scan.
    ///
    /// A report that arrived first is re-assessed against the new results.
    pub fn accept_classification(
        &mut self,
        response: ClassificationResponse,
    ) -> Result<SessionState, SessionError> {
        self.check_current(response.scan_id)?;
        if self.classified {
            return Err(SessionError::AlreadyClassified {
                scan_id: self.scan_id,
            });
        }

        tracing::info!(
            scan_id = self.scan_id,
            results = response.results.len(),
            failed = response.errors.len(),
            "classification accepted"
        );
        self.results = response.results;
        self.image_errors = response.errors;
        self.classified = true;

        if let Some(report) = &self.report {
            let assessment = assess(&self.results, report);
            tracing::info!(
                scan_id = self.scan_id,
                final_risk = assessment.final_risk,
                "assessment recomputed"
            );
            self.assessment = Some(assessment);
        }
        Ok(self.state())
    }

    /// Build the payload for the questionnaire scoring service.
    pub fn build_submission(
        &self,
        answers: SymptomAnswers,
        user_type: UserType,
    ) -> Result<SymptomSubmission, SessionError> {
        let errors = validate_answers(&answers);
        if !errors.is_empty() {
            return Err(QuestionnaireError::Incomplete(errors).into());
        }

        Ok(SymptomSubmission {
            scan_id: self.scan_id,
            symptom_answers: answers,
            scan_results: self.results.clone(),
            user_type,
            detected_skin_tone: self.skin_tone(),
        })
    }

    fn skin_tone(&self) -> SkinTone {
        let dark_result = self
            .results
            .iter()
            .filter_map(|r| r.model_used.as_deref())
            .any(|m| SkinTone::from_model_name(m) == SkinTone::Dark);
        if dark_result {
            SkinTone::Dark
        } else {
            self.model.skin_tone()
        }
    }

    /// Take a symptom report for the current scan and recompute the risk
    /// from the results held right now.
    pub fn accept_report(
        &mut self,
        scan_id: u64,
        report: SymptomAssessmentReport,
    ) -> Result<&CombinedRiskAssessment, SessionError> {
        self.check_current(scan_id)?;

        let assessment = assess(&self.results, &report);
        tracing::info!(
            scan_id = self.scan_id,
            final_risk = assessment.final_risk,
            "assessment computed"
        );
        self.report = Some(report);
        Ok(&*self.assessment.insert(assessment))
    }

    /// The image a result refers to: by echoed id when present, else by
    /// 1-based batch position.
    pub fn image_for(&self, result: &ClassificationResult) -> Option<&ImageUpload> {
        match &result.image_id {
            Some(id) => self.images.iter().find(|image| &image.id == id),
            None => (result.index as usize)
                .checked_sub(1)
                .and_then(|i| self.images.get(i)),
        }
    }

    /// Snapshot an assessed scan for persistence.
    pub fn to_saved(&self, id: Uuid, saved_at: jiff::Timestamp) -> Result<SavedScan, SessionError> {
        let (Some(report), Some(assessment)) = (&self.report, &self.assessment) else {
            return Err(SessionError::NotAssessed {
                scan_id: self.scan_id,
            });
        };

        Ok(SavedScan {
            id,
            scan_id: self.scan_id,
            model: self.model,
            results: self.results.clone(),
            report: report.clone(),
            assessment: *assessment,
            saved_at,
        })
    }
}

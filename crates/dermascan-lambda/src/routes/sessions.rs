use axum::extract::{Path, State};
use axum::Json;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dermascan_core::models::classification::ClassificationResult;
use dermascan_core::models::image::{ImageError, ImageUpload, ModelVariant};
use dermascan_core::models::risk::CombinedRiskAssessment;
use dermascan_core::models::symptom::{SymptomAssessmentReport, UserType};
use dermascan_scoring::intake::{
    normalize_classification, normalize_report, RawClassificationResponse, RawSymptomReport,
};
use dermascan_scoring::questionnaire::{completion, Completion, SymptomAnswers, SymptomSubmission};
use dermascan_scoring::session::{ScanSession, ScanTicket, SessionState};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionView {
    id: Uuid,
    state: SessionState,
    scan_id: u64,
    model: ModelVariant,
    images: Vec<ImageUpload>,
    results: Vec<ClassificationResult>,
    image_errors: Vec<ImageError>,
    report: Option<SymptomAssessmentReport>,
    assessment: Option<CombinedRiskAssessment>,
    risk_percent: Option<String>,
}

impl SessionView {
    fn new(id: Uuid, session: &ScanSession) -> Self {
        Self {
            id,
            state: session.state(),
            scan_id: session.scan_id(),
            model: session.model(),
            images: session.images().to_vec(),
            results: session.results().to_vec(),
            image_errors: session.image_errors().to_vec(),
            report: session.report().cloned(),
            assessment: session.assessment().copied(),
            risk_percent: session.assessment().map(CombinedRiskAssessment::risk_percent),
        }
    }
}

#[derive(Deserialize)]
pub struct BeginScanRequest {
    images: Vec<ImageUpload>,
    #[serde(default)]
    model: ModelVariant,
}

#[derive(Serialize)]
pub struct StateResponse {
    scan_id: u64,
    state: SessionState,
}

#[derive(Deserialize)]
pub struct QuestionnaireRequest {
    answers: SymptomAnswers,
    #[serde(default)]
    user_type: UserType,
}

#[derive(Serialize)]
pub struct SubmissionResponse {
    completion: Completion,
    submission: SymptomSubmission,
}

#[derive(Deserialize)]
pub struct ReportRequest {
    scan_id: u64,
    report: RawSymptomReport,
}

#[derive(Serialize)]
pub struct AssessmentResponse {
    scan_id: u64,
    assessment: CombinedRiskAssessment,
    risk_percent: String,
}

fn not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("session not found: {id}"))
}

pub async fn create_session(State(state): State<AppState>) -> Json<SessionView> {
    let id = Uuid::new_v4();
    let session = ScanSession::new();
    let view = SessionView::new(id, &session);
    let now = Timestamp::now();
    let mut sessions = state.sessions.lock().await;
    sessions.evict_idle(now);
    sessions.insert(id, session, now);
    tracing::info!(session = %id, live = sessions.len(), "session created");
    Json(view)
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<()>, ApiError> {
    state
        .sessions
        .lock()
        .await
        .remove(id)
        .ok_or_else(|| not_found(id))?;
    tracing::info!(session = %id, "session deleted");
    Ok(Json(()))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get(id, Timestamp::now()).ok_or_else(|| not_found(id))?;
    Ok(Json(SessionView::new(id, session)))
}

pub async fn begin_scan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<BeginScanRequest>,
) -> Result<Json<ScanTicket>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(id, Timestamp::now()).ok_or_else(|| not_found(id))?;
    Ok(Json(session.begin_scan(req.images, req.model)?))
}

pub async fn clear_scan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScanTicket>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(id, Timestamp::now()).ok_or_else(|| not_found(id))?;
    Ok(Json(session.clear()))
}

pub async fn accept_classification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(raw): Json<RawClassificationResponse>,
) -> Result<Json<StateResponse>, ApiError> {
    let response = normalize_classification(raw);
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(id, Timestamp::now()).ok_or_else(|| not_found(id))?;
    let new_state = session.accept_classification(response)?;
    Ok(Json(StateResponse {
        scan_id: session.scan_id(),
        state: new_state,
    }))
}

pub async fn build_submission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<QuestionnaireRequest>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let progress = completion(&req.answers);
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get(id, Timestamp::now()).ok_or_else(|| not_found(id))?;
    let submission = session.build_submission(req.answers, req.user_type)?;
    Ok(Json(SubmissionResponse {
        completion: progress,
        submission,
    }))
}

pub async fn accept_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReportRequest>,
) -> Result<Json<AssessmentResponse>, ApiError> {
    let report = normalize_report(&req.report);
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(id, Timestamp::now()).ok_or_else(|| not_found(id))?;
    let assessment = *session.accept_report(req.scan_id, report)?;
    Ok(Json(AssessmentResponse {
        scan_id: req.scan_id,
        risk_percent: assessment.risk_percent(),
        assessment,
    }))
}

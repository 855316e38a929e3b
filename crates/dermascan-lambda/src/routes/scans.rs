use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use dermascan_core::models::scan::SavedScan;
use dermascan_storage::scans;

use crate::error::ApiError;
use crate::state::AppState;

/// Persist the session's current assessment as a new saved scan.
pub async fn save_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SavedScan>, ApiError> {
    // Snapshot under the lock; the S3 write happens after it is released.
    let saved = {
        let mut sessions = state.sessions.lock().await;
        let session = sessions
            .get(id, jiff::Timestamp::now())
            .ok_or_else(|| ApiError::NotFound(format!("session not found: {id}")))?;
        session.to_saved(Uuid::new_v4(), jiff::Timestamp::now())?
    };

    scans::save_scan(&state.s3, &state.bucket, &saved).await?;
    Ok(Json(saved))
}

pub async fn list_scans(State(state): State<AppState>) -> Result<Json<Vec<SavedScan>>, ApiError> {
    Ok(Json(scans::list_scans(&state.s3, &state.bucket).await?))
}

pub async fn get_scan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SavedScan>, ApiError> {
    Ok(Json(scans::load_scan(&state.s3, &state.bucket, id).await?))
}

pub async fn delete_scan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<()>, ApiError> {
    scans::delete_scan(&state.s3, &state.bucket, id).await?;
    Ok(Json(()))
}

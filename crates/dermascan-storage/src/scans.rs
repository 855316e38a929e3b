use aws_sdk_s3::Client;
use dermascan_core::models::scan::SavedScan;
use dermascan_core::s3_keys;
use uuid::Uuid;

use crate::error::StorageError;
use crate::objects;

pub async fn save_scan(client: &Client, bucket: &str, scan: &SavedScan) -> Result<(), StorageError> {
    let key = s3_keys::scan(scan.id);
    objects::put_json(client, bucket, &key, scan).await?;
    tracing::info!(
        scan = %scan.id,
        final_risk = scan.assessment.final_risk,
        "saved scan"
    );
    Ok(())
}

pub async fn load_scan(client: &Client, bucket: &str, id: Uuid) -> Result<SavedScan, StorageError> {
    objects::get_json(client, bucket, &s3_keys::scan(id)).await
}

/// Ids of every saved scan in the bucket.
pub async fn list_scan_ids(client: &Client, bucket: &str) -> Result<Vec<Uuid>, StorageError> {
    let keys = objects::list_objects(client, bucket, s3_keys::SCANS_PREFIX).await?;

    let mut ids = Vec::with_capacity(keys.len());
    for key in &keys {
        match s3_keys::scan_id_from_key(key) {
            Ok(id) => ids.push(id),
            Err(e) => tracing::warn!(key = %key, "skipping foreign object: {e}"),
        }
    }
    Ok(ids)
}

/// Every saved scan, newest first.
pub async fn list_scans(client: &Client, bucket: &str) -> Result<Vec<SavedScan>, StorageError> {
    let mut scans = Vec::new();
    for id in list_scan_ids(client, bucket).await? {
        scans.push(load_scan(client, bucket, id).await?);
    }
    scans.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
    Ok(scans)
}

pub async fn delete_scan(client: &Client, bucket: &str, id: Uuid) -> Result<(), StorageError> {
    objects::delete_object(client, bucket, &s3_keys::scan(id)).await?;
    tracing::info!(scan = %id, "deleted scan");
    Ok(())
}

//! S3 key/path conventions.
//!
//! Pure string functions, no AWS SDK dependency. These define the canonical
//! layout of objects in the DermaScan bucket.

use uuid::Uuid;

use crate::error::CoreError;

pub const SCANS_PREFIX: &str = "scans/";

pub fn scan(id: Uuid) -> String {
    format!("{SCANS_PREFIX}{id}.json")
}

/// Recover the saved-scan id from a key produced by [`scan`].
pub fn scan_id_from_key(key: &str) -> Result<Uuid, CoreError> {
    let stem = key
        .strip_prefix(SCANS_PREFIX)
        .and_then(|rest| rest.strip_suffix(".json"))
        .ok_or_else(|| CoreError::InvalidKey {
            prefix: SCANS_PREFIX.to_string(),
            key: key.to_string(),
        })?;
    Ok(Uuid::parse_str(stem)?)
}

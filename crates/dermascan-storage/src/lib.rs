//! dermascan-storage
//!
//! S3 persistence for saved scans. Thin wrapper around the AWS S3 SDK.

pub mod client;
pub mod error;
pub mod objects;
pub mod scans;

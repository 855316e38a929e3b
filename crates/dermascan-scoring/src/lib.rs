//! dermascan-scoring
//!
//! The assessment workflow. Pure logic, no AWS dependency. Reduces
//! classifier output to scan evidence, blends it with the symptom
//! questionnaire into a single risk, and tracks one scan cycle at a time.

pub mod aggregate;
pub mod combine;
pub mod error;
pub mod intake;
pub mod questionnaire;
pub mod session;

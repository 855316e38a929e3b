pub mod health;
pub mod questionnaire;
pub mod scans;
pub mod sessions;

pub mod classification;
pub mod image;
pub mod risk;
pub mod scan;
pub mod symptom;

use dermascan_core::models::classification::{ClassificationResult, Label};
use dermascan_core::models::image::{ModelVariant, SkinTone};
use dermascan_core::models::risk::CombinedRiskAssessment;
use dermascan_core::models::symptom::{SymptomAssessmentReport, UserType};
use dermascan_core::s3_keys;
use uuid::Uuid;

#[test]
fn label_parses_known_tags() {
    let labels: Vec<Label> = serde_json::from_str(r#"["ad", "not_ad", "unknown"]"#).unwrap();
    assert_eq!(labels, vec![Label::Ad, Label::NotAd, Label::Unknown]);
}

#[test]
fn unrecognized_label_is_unknown() {
    let label: Label = serde_json::from_str(r#""eczema""#).unwrap();
    assert_eq!(label, Label::Unknown);
    assert!(!label.is_ad());
}

#[test]
fn label_match_is_exact() {
    assert_eq!(Label::from_tag("AD"), Label::Unknown);
    assert!(Label::from_tag("ad").is_ad());
}

#[test]
fn user_type_falls_back_to_patient() {
    let user: UserType = serde_json::from_str(r#""dermatologist""#).unwrap();
    assert_eq!(user, UserType::Patient);

    let user: UserType = serde_json::from_str("null").unwrap();
    assert_eq!(user, UserType::Patient);

    let user: UserType = serde_json::from_str(r#""clinician""#).unwrap();
    assert_eq!(user, UserType::Clinician);
}

#[test]
fn non_string_tags_fall_back_instead_of_failing() {
    let report: SymptomAssessmentReport =
        serde_json::from_str(r#"{"final_confidence": 0.42, "user_type": 1}"#).unwrap();
    assert_eq!(report.user_type, UserType::Patient);

    let user: UserType = serde_json::from_str(r#"{"role": "clinician"}"#).unwrap();
    assert_eq!(user, UserType::Patient);

    let label: Label = serde_json::from_str("7").unwrap();
    assert_eq!(label, Label::Unknown);
}

#[test]
fn report_defaults_missing_lists_and_role() {
    let report: SymptomAssessmentReport =
        serde_json::from_str(r#"{"final_confidence": 0.42}"#).unwrap();
    assert_eq!(report.user_type, UserType::Patient);
    assert!(report.recommendations.is_empty());
    assert!(report.next_steps.is_empty());
}

#[test]
fn classification_result_serializes_snake_case() {
    let result = ClassificationResult {
        index: 1,
        image_id: None,
        label: Label::NotAd,
        score: 0.3,
        model_used: Some("dark".to_string()),
    };
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["label"], "not_ad");
    assert_eq!(json["model_used"], "dark");
    assert!(json.get("image_id").is_none());
}

#[test]
fn skin_tone_from_model_name_is_case_insensitive() {
    assert_eq!(SkinTone::from_model_name("EfficientNet-Dark-v2"), SkinTone::Dark);
    assert_eq!(SkinTone::from_model_name("general"), SkinTone::Light);
    assert_eq!(ModelVariant::Dark.skin_tone(), SkinTone::Dark);
}

#[test]
fn risk_percent_rounds_to_whole_number() {
    let assessment = CombinedRiskAssessment {
        scan_confidence: 0.8,
        symptom_confidence: 0.2,
        has_ad_classification: true,
        final_risk: 0.6 * 0.8 + 0.4 * 0.2,
        user_type: UserType::Patient,
    };
    assert_eq!(assessment.risk_percent(), "56%");
}

#[test]
fn scan_key_round_trips_id() {
    let id = Uuid::new_v4();
    let key = s3_keys::scan(id);
    assert!(key.starts_with(s3_keys::SCANS_PREFIX));
    assert_eq!(s3_keys::scan_id_from_key(&key).unwrap(), id);
}

#[test]
fn foreign_key_is_rejected() {
    assert!(s3_keys::scan_id_from_key("reports/abc.json").is_err());
    assert!(s3_keys::scan_id_from_key("scans/not-a-uuid.json").is_err());
}

use dermascan_core::models::classification::Label;
use dermascan_core::models::image::ImageUpload;
use dermascan_core::models::symptom::UserType;
use dermascan_scoring::intake::{
    normalize_classification, normalize_report, validate_batch, BatchViolation,
    RawClassificationResponse, RawSymptomReport, MAX_IMAGE_BYTES,
};

fn image(id: &str, content_type: &str, size_bytes: u64) -> ImageUpload {
    ImageUpload {
        id: id.to_string(),
        filename: format!("{id}.jpg"),
        content_type: content_type.to_string(),
        size_bytes,
    }
}

#[test]
fn valid_batch_passes() {
    let images = vec![
        image("a", "image/jpeg", 1024),
        image("b", "image/png", MAX_IMAGE_BYTES),
    ];
    assert!(validate_batch(&images).is_empty());
}

#[test]
fn empty_batch_is_rejected() {
    assert_eq!(validate_batch(&[]), vec![BatchViolation::Empty]);
}

#[test]
fn oversized_batch_is_rejected() {
    let images: Vec<_> = (0..11)
        .map(|i| image(&format!("img{i}"), "image/jpeg", 10))
        .collect();
    assert_eq!(
        validate_batch(&images),
        vec![BatchViolation::TooMany { count: 11, max: 10 }]
    );
}

#[test]
fn every_bad_image_is_reported() {
    let images = vec![
        image("a", "image/gif", 10),
        image("b", "image/png", MAX_IMAGE_BYTES + 1),
        image("a", "image/jpeg", 10),
    ];
    let violations = validate_batch(&images);
    assert_eq!(violations.len(), 3);
    assert!(violations.contains(&BatchViolation::UnsupportedType {
        image_id: "a".to_string(),
        content_type: "image/gif".to_string(),
    }));
    assert!(violations.contains(&BatchViolation::TooLarge {
        image_id: "b".to_string(),
        size_bytes: MAX_IMAGE_BYTES + 1,
        max_bytes: MAX_IMAGE_BYTES,
    }));
    assert!(violations.contains(&BatchViolation::DuplicateId {
        image_id: "a".to_string(),
    }));
}

#[test]
fn malformed_entries_degrade_to_defaults() {
    let raw: RawClassificationResponse = serde_json::from_str(
        r#"{
            "scan_id": 3,
            "results": [
                {"label": "ad", "confidence": 0.7, "model_used": "light"},
                {"label": "ad", "score": "high"},
                {"score": 0.9},
                {"label": 7, "score": 0.4},
                {"index": 9, "label": "ad", "score": 1.7, "image_id": "img-9"}
            ]
        }"#,
    )
    .unwrap();

    let response = normalize_classification(raw);
    assert_eq!(response.scan_id, 3);
    let results = &response.results;
    assert_eq!(results.len(), 5);

    assert_eq!(results[0].index, 1);
    assert_eq!(results[0].label, Label::Ad);
    assert_eq!(results[0].score, 0.7);
    assert_eq!(results[0].model_used.as_deref(), Some("light"));

    assert_eq!(results[1].label, Label::Ad);
    assert_eq!(results[1].score, 0.0);

    assert_eq!(results[2].label, Label::Unknown);
    assert_eq!(results[3].label, Label::Unknown);

    assert_eq!(results[4].index, 9);
    assert_eq!(results[4].score, 1.0);
    assert_eq!(results[4].image_id.as_deref(), Some("img-9"));
}

#[test]
fn failed_images_are_excluded() {
    let raw: RawClassificationResponse = serde_json::from_str(
        r#"{
            "scan_id": 1,
            "results": [
                {"index": 1, "label": "ad", "score": 0.8},
                {"index": 2, "label": "not_ad", "score": 0.1}
            ],
            "errors": [
                {"index": 2, "filename": "blurry.png", "error": "decode failed"}
            ]
        }"#,
    )
    .unwrap();

    let response = normalize_classification(raw);
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].index, 1);
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].filename, "blurry.png");
    assert_eq!(response.errors[0].details, None);
}

#[test]
fn mistyped_fields_do_not_reject_the_batch() {
    let raw: RawClassificationResponse = serde_json::from_str(
        r#"{
            "scan_id": 4,
            "results": [
                {"index": 1, "label": "ad", "score": 0.6, "image_id": "img-1"},
                {"index": -1, "label": "ad", "score": 0.8, "model_used": 7},
                {"index": 3, "label": "not_ad", "score": 0.2, "image_id": 5}
            ],
            "errors": [
                {"index": "two", "filename": 12, "error": "timeout"}
            ]
        }"#,
    )
    .unwrap();

    let response = normalize_classification(raw);
    assert_eq!(response.results.len(), 3);

    assert_eq!(response.results[0].image_id.as_deref(), Some("img-1"));

    assert_eq!(response.results[1].index, 2);
    assert_eq!(response.results[1].label, Label::Ad);
    assert_eq!(response.results[1].model_used, None);

    assert_eq!(response.results[2].index, 3);
    assert_eq!(response.results[2].image_id, None);

    assert!(response.errors.is_empty());
}

#[test]
fn error_entries_with_loose_fields_still_exclude_their_image() {
    let raw: RawClassificationResponse = serde_json::from_str(
        r#"{
            "scan_id": 1,
            "results": [
                {"index": 1, "label": "ad", "score": 0.8},
                {"index": 2, "label": "ad", "score": 0.9}
            ],
            "errors": [
                {"index": 2, "filename": null, "details": ["oom"]}
            ]
        }"#,
    )
    .unwrap();

    let response = normalize_classification(raw);
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].index, 1);
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].index, 2);
    assert_eq!(response.errors[0].filename, "");
    assert_eq!(response.errors[0].details, None);
}

#[test]
fn report_normalization_applies_defaults() {
    let raw: RawSymptomReport = serde_json::from_str(
        r#"{
            "final_confidence": "n/a",
            "user_type": "nurse",
            "recommendations": ["See a dermatologist", 4],
            "next_steps": "none"
        }"#,
    )
    .unwrap();

    let report = normalize_report(&raw);
    assert_eq!(report.final_confidence, 0.0);
    assert_eq!(report.user_type, UserType::Patient);
    assert_eq!(report.recommendations, vec!["See a dermatologist".to_string()]);
    assert!(report.next_steps.is_empty());
}

#[test]
fn well_formed_report_passes_through() {
    let raw: RawSymptomReport = serde_json::from_str(
        r#"{
            "final_confidence": 0.62,
            "user_type": "clinician",
            "recommendations": ["Emollients"],
            "next_steps": ["Follow up in 2 weeks"]
        }"#,
    )
    .unwrap();

    let report = normalize_report(&raw);
    assert_eq!(report.final_confidence, 0.62);
    assert_eq!(report.user_type, UserType::Clinician);
    assert_eq!(report.next_steps, vec!["Follow up in 2 weeks".to_string()]);
}

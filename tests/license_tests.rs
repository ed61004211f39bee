use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;

use hie_registry::banner::HealthWorkerBanner;
use hie_registry::license::{evaluate, latest_license, LicenseEvaluator, NoticeKind};
use hie_registry::tags::{classify, Category, StatusFlag, TagType};
use hie_registry::types::practitioner::{PractitionerLicense, PractitionerMessage};

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn licenses(value: serde_json::Value) -> Vec<PractitionerLicense> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn valid_license_among_expired_ones_suppresses_error() {
    let list = licenses(json!([
        {"id": "1", "license_type": "Private Practice", "license_end": "2022-12-31"},
        {"id": "2", "license_type": "Private Practice", "license_end": "2023-06-30"},
        {"id": "3", "license_type": "Private Practice", "license_end": "2024-12-31"}
    ]));

    let eval = evaluate(&list, at(2024, 1, 1));
    assert!(eval.any_valid);
    assert_eq!(eval.most_recently_expired, None);
    assert!(eval.nearing_expiry.is_empty());
    assert!(eval.notice().is_none());
}

#[test]
fn all_expired_names_the_most_recent() {
    let list = licenses(json!([
        {"id": "1", "license_type": "Private Practice", "license_end": "2023-06-30"},
        {"id": "2", "license_type": "Public Practice", "license_end": "2023-11-30"},
        {"id": "3", "license_type": "Private Practice", "license_end": "not a date"}
    ]));

    let eval = evaluate(&list, at(2024, 1, 1));
    assert!(!eval.any_valid);

    let notice = eval.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.license_id, "2");
    assert!(notice.subtitle.contains("Nov 30, 2023"));
}

#[test]
fn warning_names_soonest_of_several_expiring() {
    let list = licenses(json!([
        {"id": "10", "license_type": "Private Practice", "license_end": "2024-01-25"},
        {"id": "11", "license_type": "Public Practice", "license_end": "2024-01-05"},
        {"id": "12", "license_type": "Private Practice", "license_end": "2025-01-01"}
    ]));

    let eval = evaluate(&list, at(2024, 1, 1));
    let ids: Vec<&str> = eval.nearing_expiry.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["10", "11"]);

    let notice = eval.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Warning);
    assert_eq!(notice.license_id, "11");
    assert!(notice.subtitle.contains("1 other license"));
}

#[test]
fn configurable_warning_window() {
    let list = licenses(json!([
        {"id": "1", "license_type": "Private Practice", "license_end": "2024-02-20"}
    ]));

    let default = LicenseEvaluator::default().evaluate(&list, at(2024, 1, 1));
    assert!(default.nearing_expiry.is_empty());

    let wide = LicenseEvaluator::new(Duration::days(60)).evaluate(&list, at(2024, 1, 1));
    assert_eq!(wide.nearing_expiry.len(), 1);
}

#[test]
fn null_end_date_is_expired_without_losing_other_licenses() {
    let list = licenses(json!([
        {"id": "1", "external_reference_id": null, "license_type": "Private Practice",
         "license_start": "2023-01-01", "license_end": null},
        {"id": "2", "license_type": "Private Practice", "license_start": "2023-01-01",
         "license_end": "2099-01-01"}
    ]));

    let eval = evaluate(&list, at(2024, 1, 1));
    assert!(eval.any_valid);
    assert!(eval.nearing_expiry.is_empty());
    assert_eq!(latest_license(&list).map(|l| l.id.as_str()), Some("2"));

    let expired_only = &list[..1];
    let eval = evaluate(expired_only, at(2024, 1, 1));
    assert!(!eval.any_valid);
    assert_eq!(eval.most_recently_expired, None);
    assert!(eval.notice().is_none());
}

#[test]
fn latest_license_prefers_larger_numeric_id_on_tie() {
    let list = licenses(json!([
        {"id": "9", "license_end": "2024-12-31"},
        {"id": "10", "license_end": "2024-12-31"},
        {"id": "8", "license_end": "2024-06-30"}
    ]));
    assert_eq!(latest_license(&list).map(|l| l.id.as_str()), Some("10"));
}

#[test]
fn practitioner_record_drives_the_banner() {
    let practitioner: PractitionerMessage = serde_json::from_value(json!({
        "membership": {
            "id": "PUB-9",
            "status": "Not Licensed",
            "full_name": "Peter Otieno",
            "first_name": "Peter",
            "last_name": "Otieno",
            "registration_id": "B9/2020",
            "licensing_body": "NCK",
            "is_active": "0",
            "is_withdrawn": false
        },
        "licenses": [
            {"id": "5", "license_type": "Nursing", "license_start": "2023-01-01", "license_end": "2023-12-31"}
        ],
        "professional_details": {"professional_cadre": "Nurse", "practice_type": "Public"},
        "contacts": {"phone": "", "email": "", "postal_address": ""},
        "identifiers": {"identification_type": "National ID", "identification_number": "2222"}
    }))
    .unwrap();

    let banner = HealthWorkerBanner::build(&practitioner, &LicenseEvaluator::default(), at(2024, 1, 1));

    let kinds: Vec<TagType> = banner.tags.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TagType::Blue, TagType::Red, TagType::Red, TagType::Blue, TagType::Red]
    );
    assert_eq!(banner.notice.map(|n| n.kind), Some(NoticeKind::Error));
}

#[test]
fn status_flags_from_mixed_wire_types() {
    let flags: Vec<StatusFlag> = serde_json::from_value(json!([true, 1, "1", false, 0, "0", "yes"])).unwrap();
    let categories: Vec<Category> = flags.iter().map(|f| classify(Some(f))).collect();
    assert_eq!(
        categories,
        vec![
            Category::Positive,
            Category::Positive,
            Category::Positive,
            Category::Negative,
            Category::Negative,
            Category::Negative,
            Category::Negative,
        ]
    );
    assert_eq!(classify(None), Category::Negative);
}

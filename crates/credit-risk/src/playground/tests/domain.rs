use super::common::*;
use crate::playground::domain::{
    ApplicantProfile, ApplicantSubmission, CardUsageCategory, District, MonthlyExpensesBucket,
    ProfileError, ProfileOptions, Region,
};

#[test]
fn submission_round_trips_into_the_same_profile() {
    let profile = risky_profile();
    let parsed = ApplicantProfile::try_from(submission(profile)).expect("valid submission");
    assert_eq!(parsed, profile);
}

#[test]
fn labels_are_matched_exactly_after_trimming() {
    assert_eq!(
        District::from_label("  Ostrava - mesto "),
        Some(District::OstravaMesto)
    );
    assert_eq!(Region::from_label("north moravia"), None);
    assert_eq!(
        CardUsageCategory::from_label("No Usage"),
        Some(CardUsageCategory::NoUsage)
    );
}

#[test]
fn missing_fields_are_reported_by_name() {
    let mut raw = submission(baseline_profile());
    raw.tech_adoption_flag = None;

    let error = ApplicantProfile::try_from(raw).expect_err("flag is required");
    assert_eq!(
        error,
        ProfileError::MissingField {
            field: "tech_adoption_flag"
        }
    );

    let error = ApplicantProfile::try_from(ApplicantSubmission::default()).expect_err("empty");
    assert_eq!(error.field(), "age");
}

#[test]
fn unknown_vocabulary_is_rejected() {
    let mut raw = submission(baseline_profile());
    raw.monthly_expenses_bucket = Some("Huge_Expenses".to_string());

    let error = ApplicantProfile::try_from(raw).expect_err("unknown bucket");
    assert_eq!(
        error,
        ProfileError::UnknownValue {
            field: "monthly_expenses_bucket",
            value: "Huge_Expenses".to_string(),
        }
    );
}

#[test]
fn age_must_fall_inside_the_form_range() {
    for age in [17, 81, -3] {
        let mut raw = submission(baseline_profile());
        raw.age = Some(age);
        match ApplicantProfile::try_from(raw) {
            Err(ProfileError::AgeOutOfRange { value, .. }) => assert_eq!(value, age),
            other => panic!("expected age rejection for {age}, got {other:?}"),
        }
    }

    for age in [18, 80] {
        let mut raw = submission(baseline_profile());
        raw.age = Some(age);
        assert!(ApplicantProfile::try_from(raw).is_ok());
    }
}

#[test]
fn submission_accepts_feature_frame_column_names() {
    let raw: ApplicantSubmission = serde_json::from_value(serde_json::json!({
        "age": 28,
        "gender": "Male",
        "region": "Prague",
        "district_name": "Hl.m. Praha",
        "loan_amount": "low_amount",
        "loan_duration": "short_term",
        "total_monthly_order": "High_Expenses",
        "tech_adoption_flag": true,
        "card_usage_cat": "High Usage"
    }))
    .expect("deserializes");

    let profile = ApplicantProfile::try_from(raw).expect("valid");
    assert_eq!(profile.monthly_expenses_bucket, MonthlyExpensesBucket::High);
    assert_eq!(profile.card_usage_category, CardUsageCategory::HighUsage);
}

#[test]
fn profile_serializes_with_wire_labels() {
    let value = serde_json::to_value(risky_profile()).expect("serializes");
    assert_eq!(value["region"], "north Bohemia");
    assert_eq!(value["district_name"], "Most");
    assert_eq!(value["card_usage_category"], "No Usage");
}

#[test]
fn options_cover_every_closed_vocabulary() {
    let options = ProfileOptions::catalog();

    assert_eq!(options.age_range, [18, 80]);
    assert_eq!(options.region.len(), 8);
    assert_eq!(options.district_name.len(), 77);
    assert_eq!(options.card_usage_category, vec!["No Usage", "Low Usage", "High Usage"]);
    assert!(options.district_name.contains(&"Hl.m. Praha"));
}

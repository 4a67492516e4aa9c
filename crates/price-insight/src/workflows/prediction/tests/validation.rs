use super::common::*;
use crate::reference::{EnergyRating, PropertyType, Tenure};
use crate::workflows::prediction::domain::{FormValue, PredictionSubmission, SaleMonth};
use crate::workflows::prediction::RequestValidator;

fn validator() -> RequestValidator {
    RequestValidator::default()
}

#[test]
fn accepts_well_formed_submission() {
    let mut submission = submission();
    submission.full_address = Some("  221 Mile End Road, London  ".into());
    submission.outcode = Some(" e1 ".into());

    let request = validator()
        .request_from_submission(submission)
        .expect("submission is valid");

    assert_eq!(request.full_address, "221 Mile End Road, London");
    assert_eq!(request.outcode, "E1");
    assert_eq!(request.bedrooms, 3);
    assert_eq!(request.tenure, Tenure::Freehold);
    assert_eq!(request.property_type, PropertyType::Terraced);
    assert_eq!(request.current_energy_rating, EnergyRating::D);
    assert_eq!(
        request.month_of_sale,
        SaleMonth::new(2025, 1).expect("valid month")
    );
}

#[test]
fn reports_every_violation_instead_of_the_first() {
    let mut submission = submission();
    submission.bedrooms = Some(FormValue::Valid(11.0));
    submission.area = Some(FormValue::Valid(-5.0));
    submission.month_of_sale = Some("2024-13".into());

    let errors = validator()
        .request_from_submission(submission)
        .expect_err("three violations");

    assert_eq!(errors.fields(), ["bedrooms", "area", "monthOfSale"]);
    let messages: Vec<&str> = errors
        .violations()
        .iter()
        .map(|violation| violation.message.as_str())
        .collect();
    assert_eq!(
        messages,
        [
            "Bedrooms must be between 0 and 10",
            "Area must be greater than 0",
            "Month of sale must use the YYYY-MM format",
        ]
    );
    assert_eq!(errors.to_string(), "prediction request has 3 invalid field(s)");
}

#[test]
fn lists_missing_required_fields() {
    let errors = validator()
        .request_from_submission(PredictionSubmission::default())
        .expect_err("empty submission rejected");

    assert_eq!(
        errors.fields(),
        [
            "fullAddress",
            "outcode",
            "bedrooms",
            "bathrooms",
            "receptionRooms",
            "area",
            "tenure",
            "propertyType",
            "currentEnergyRating",
            "monthOfSale",
        ]
    );
    assert!(errors
        .violations()
        .iter()
        .all(|violation| violation.message.ends_with("is required")));
}

#[test]
fn rejects_values_outside_fixed_tables() {
    let mut submission = submission();
    submission.tenure = Some("Commonhold".into());
    submission.property_type = Some("Castle".into());
    submission.current_energy_rating = Some("H".into());

    let errors = validator()
        .request_from_submission(submission)
        .expect_err("enum violations");

    assert_eq!(
        errors.fields(),
        ["tenure", "propertyType", "currentEnergyRating"]
    );
    assert_eq!(
        errors.violations()[0].message,
        "Tenure must be one of Freehold, Leasehold"
    );
    assert!(errors.violations()[1].message.contains("Semi-detached"));
    assert_eq!(
        errors.violations()[2].message,
        "Energy rating must be one of A, B, C, D, E, F, G"
    );
}

#[test]
fn enforces_minimum_lengths() {
    let mut submission = submission();
    submission.full_address = Some("1 St".into());
    submission.outcode = Some(" E ".into());

    let errors = validator()
        .request_from_submission(submission)
        .expect_err("too short");

    assert_eq!(errors.fields(), ["fullAddress", "outcode"]);
    assert_eq!(
        errors.violations()[0].message,
        "Full address must be at least 5 characters"
    );
    assert_eq!(
        errors.violations()[1].message,
        "Outcode must be at least 2 characters"
    );
}

#[test]
fn room_counts_must_be_whole_and_in_range() {
    let mut submission = submission();
    submission.bedrooms = Some(FormValue::Valid(2.5));
    submission.bathrooms = Some(FormValue::Valid(-1.0));
    submission.reception_rooms = Some(FormValue::Valid(10.0));

    let errors = validator()
        .request_from_submission(submission)
        .expect_err("room violations");

    assert_eq!(errors.fields(), ["bedrooms", "bathrooms"]);
    assert_eq!(
        errors.violations()[0].message,
        "Bedrooms must be a whole number"
    );
    assert_eq!(
        errors.violations()[1].message,
        "Bathrooms must be between 0 and 10"
    );
}

#[test]
fn zero_rooms_are_allowed() {
    let mut submission = submission();
    submission.bedrooms = Some(FormValue::Valid(0.0));
    submission.bathrooms = Some(FormValue::Valid(0.0));
    submission.reception_rooms = Some(FormValue::Valid(0.0));

    let request = validator()
        .request_from_submission(submission)
        .expect("zero rooms valid");
    assert_eq!(request.reception_rooms, 0);
}

#[test]
fn month_of_sale_requires_exact_format() {
    for raw in ["2024-1", "24-01", "2024/01", "2024-00", "2024-012", "Jan 2024"] {
        let mut submission = submission();
        submission.month_of_sale = Some(raw.into());
        let errors = validator()
            .request_from_submission(submission)
            .expect_err("malformed month rejected");
        assert_eq!(errors.fields(), ["monthOfSale"], "input {raw}");
    }

    let mut submission = submission();
    submission.month_of_sale = Some("1999-12".into());
    let request = validator()
        .request_from_submission(submission)
        .expect("december accepted");
    assert_eq!(request.month_of_sale.to_string(), "1999-12");
}

#[test]
fn coordinates_are_optional_but_bounded() {
    let mut submission = submission();
    submission.longitude = None;
    submission.latitude = None;
    assert!(validator().request_from_submission(submission).is_ok());

    let mut submission = super::common::submission();
    submission.latitude = Some(FormValue::Valid(91.0));
    let errors = validator()
        .request_from_submission(submission)
        .expect_err("latitude out of range");
    assert_eq!(errors.fields(), ["latitude"]);
    assert_eq!(
        errors.violations()[0].message,
        "Latitude must be between -90 and 90"
    );
}

#[test]
fn area_must_be_finite() {
    let mut submission = submission();
    submission.area = Some(FormValue::Valid(f64::NAN));
    let errors = validator()
        .request_from_submission(submission)
        .expect_err("nan rejected");
    assert_eq!(errors.fields(), ["area"]);
}

#[test]
fn area_is_capped_at_the_largest_supported_floor_space() {
    let mut submission = submission();
    submission.area = Some(FormValue::Valid(100_000.0));
    let request = validator()
        .request_from_submission(submission)
        .expect("largest area accepted");
    assert_eq!(request.area, 100_000.0);

    for area in [100_000.5, 1e17, 1e306] {
        let mut submission = super::common::submission();
        submission.area = Some(FormValue::Valid(area));
        let errors = validator()
            .request_from_submission(submission)
            .expect_err("oversized area rejected");
        assert_eq!(errors.fields(), ["area"], "area {area}");
        assert_eq!(
            errors.violations()[0].message,
            "Area must be at most 100000 square meters"
        );
    }
}

#[test]
fn mistyped_fields_are_reported_alongside_other_violations() {
    let mut submission = submission();
    submission.bedrooms = Some(FormValue::Mistyped(serde_json::json!("3")));
    submission.latitude = Some(FormValue::Mistyped(serde_json::json!(true)));
    submission.area = Some(FormValue::Valid(-5.0));
    submission.tenure = Some(FormValue::Mistyped(serde_json::json!(1)));
    submission.month_of_sale = Some("2024-13".into());

    let errors = validator()
        .request_from_submission(submission)
        .expect_err("every problem reported");

    assert_eq!(
        errors.fields(),
        ["latitude", "bedrooms", "area", "tenure", "monthOfSale"]
    );
    let messages: Vec<&str> = errors
        .violations()
        .iter()
        .map(|violation| violation.message.as_str())
        .collect();
    assert_eq!(
        messages,
        [
            "Latitude must be a number",
            "Bedrooms must be a number",
            "Area must be greater than 0",
            "Tenure must be text",
            "Month of sale must use the YYYY-MM format",
        ]
    );
}

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::domain::{FormValue, PredictionRequest, PredictionSubmission, SaleMonth};
use crate::reference::{joined_labels, EnergyRating, PropertyType, Tenure};

static MONTH_OF_SALE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-(0[1-9]|1[0-2])$").expect("month of sale regex is valid")
});

const DEFAULT_MIN_ADDRESS_CHARS: usize = 5;
const DEFAULT_MIN_OUTCODE_CHARS: usize = 2;
const DEFAULT_MAX_ROOMS: u8 = 10;
const DEFAULT_MAX_AREA_SQM: f64 = 100_000.0;

const NUMBER: &str = "a number";
const TEXT: &str = "text";

/// A single rejected field with a human readable explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Every violation found in a submission, in field order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("prediction request has {} invalid field(s)", .violations.len())]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.violations
            .iter()
            .map(|violation| violation.field)
            .collect()
    }
}

/// Schema checks applied to every prediction submission before generation.
#[derive(Debug, Clone)]
pub struct RequestValidator {
    min_address_chars: usize,
    min_outcode_chars: usize,
    max_rooms: u8,
    max_area: f64,
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self {
            min_address_chars: DEFAULT_MIN_ADDRESS_CHARS,
            min_outcode_chars: DEFAULT_MIN_OUTCODE_CHARS,
            max_rooms: DEFAULT_MAX_ROOMS,
            max_area: DEFAULT_MAX_AREA_SQM,
        }
    }
}

impl RequestValidator {
    /// Convert a raw submission into a typed request, collecting all violations.
    pub fn request_from_submission(
        &self,
        submission: PredictionSubmission,
    ) -> Result<PredictionRequest, ValidationErrors> {
        let mut violations = Vec::new();

        let full_address = self.text_with_min_length(
            "fullAddress",
            "Full address",
            submission.full_address,
            self.min_address_chars,
            &mut violations,
        );
        let outcode = self
            .text_with_min_length(
                "outcode",
                "Outcode",
                submission.outcode,
                self.min_outcode_chars,
                &mut violations,
            )
            .map(|value| value.to_ascii_uppercase());
        let longitude = coordinate(
            "longitude",
            "Longitude",
            submission.longitude,
            180.0,
            &mut violations,
        );
        let latitude = coordinate(
            "latitude",
            "Latitude",
            submission.latitude,
            90.0,
            &mut violations,
        );
        let bedrooms = self.room_count("bedrooms", "Bedrooms", submission.bedrooms, &mut violations);
        let bathrooms =
            self.room_count("bathrooms", "Bathrooms", submission.bathrooms, &mut violations);
        let reception_rooms = self.room_count(
            "receptionRooms",
            "Reception rooms",
            submission.reception_rooms,
            &mut violations,
        );
        let area = self.floor_area(submission.area, &mut violations);
        let tenure = choice(
            "tenure",
            "Tenure",
            submission.tenure,
            Tenure::from_label,
            || joined_labels(&Tenure::ALL, Tenure::label),
            &mut violations,
        );
        let property_type = choice(
            "propertyType",
            "Property type",
            submission.property_type,
            PropertyType::from_label,
            || joined_labels(&PropertyType::ALL, PropertyType::label),
            &mut violations,
        );
        let current_energy_rating = choice(
            "currentEnergyRating",
            "Energy rating",
            submission.current_energy_rating,
            EnergyRating::from_label,
            || joined_labels(&EnergyRating::ALL, EnergyRating::label),
            &mut violations,
        );
        let month_of_sale = sale_month(submission.month_of_sale, &mut violations);

        let (
            Some(full_address),
            Some(outcode),
            Some(bedrooms),
            Some(bathrooms),
            Some(reception_rooms),
            Some(area),
            Some(tenure),
            Some(property_type),
            Some(current_energy_rating),
            Some(month_of_sale),
        ) = (
            full_address,
            outcode,
            bedrooms,
            bathrooms,
            reception_rooms,
            area,
            tenure,
            property_type,
            current_energy_rating,
            month_of_sale,
        )
        else {
            return Err(ValidationErrors { violations });
        };

        if !violations.is_empty() {
            return Err(ValidationErrors { violations });
        }

        Ok(PredictionRequest {
            full_address,
            outcode,
            longitude,
            latitude,
            bedrooms,
            bathrooms,
            reception_rooms,
            area,
            tenure,
            property_type,
            current_energy_rating,
            month_of_sale,
        })
    }

    fn text_with_min_length(
        &self,
        field: &'static str,
        label: &str,
        value: Option<FormValue<String>>,
        min_chars: usize,
        violations: &mut Vec<FieldViolation>,
    ) -> Option<String> {
        let value = required_value(field, label, value, TEXT, violations)?;

        let trimmed = value.trim();
        if trimmed.chars().count() < min_chars {
            violations.push(FieldViolation {
                field,
                message: format!("{label} must be at least {min_chars} characters"),
            });
            return None;
        }

        Some(trimmed.to_string())
    }

    fn room_count(
        &self,
        field: &'static str,
        label: &str,
        value: Option<FormValue<f64>>,
        violations: &mut Vec<FieldViolation>,
    ) -> Option<u8> {
        let value = required_value(field, label, value, NUMBER, violations)?;

        if !value.is_finite() || value.fract() != 0.0 {
            violations.push(FieldViolation {
                field,
                message: format!("{label} must be a whole number"),
            });
            return None;
        }

        if value < 0.0 || value > f64::from(self.max_rooms) {
            violations.push(FieldViolation {
                field,
                message: format!("{label} must be between 0 and {}", self.max_rooms),
            });
            return None;
        }

        Some(value as u8)
    }

    /// Positive and bounded, so every accepted request prices to a finite, in-range amount.
    fn floor_area(
        &self,
        value: Option<FormValue<f64>>,
        violations: &mut Vec<FieldViolation>,
    ) -> Option<f64> {
        let value = required_value("area", "Area", value, NUMBER, violations)?;

        if !(value.is_finite() && value > 0.0) {
            violations.push(FieldViolation {
                field: "area",
                message: "Area must be greater than 0".to_string(),
            });
            return None;
        }

        if value > self.max_area {
            violations.push(FieldViolation {
                field: "area",
                message: format!("Area must be at most {} square meters", self.max_area),
            });
            return None;
        }

        Some(value)
    }
}

fn required(field: &'static str, label: &str) -> FieldViolation {
    FieldViolation {
        field,
        message: format!("{label} is required"),
    }
}

fn required_value<T>(
    field: &'static str,
    label: &str,
    value: Option<FormValue<T>>,
    expected: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<T> {
    let Some(value) = value else {
        violations.push(required(field, label));
        return None;
    };
    well_typed(field, label, value, expected, violations)
}

fn well_typed<T>(
    field: &'static str,
    label: &str,
    value: FormValue<T>,
    expected: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<T> {
    match value {
        FormValue::Valid(value) => Some(value),
        FormValue::Mistyped(_) => {
            violations.push(FieldViolation {
                field,
                message: format!("{label} must be {expected}"),
            });
            None
        }
    }
}

fn coordinate(
    field: &'static str,
    label: &str,
    value: Option<FormValue<f64>>,
    bound: f64,
    violations: &mut Vec<FieldViolation>,
) -> Option<f64> {
    let value = well_typed(field, label, value?, NUMBER, violations)?;
    if value.is_finite() && (-bound..=bound).contains(&value) {
        Some(value)
    } else {
        violations.push(FieldViolation {
            field,
            message: format!("{label} must be between -{bound} and {bound}"),
        });
        None
    }
}

fn choice<T>(
    field: &'static str,
    label: &str,
    value: Option<FormValue<String>>,
    parse: fn(&str) -> Option<T>,
    allowed: impl FnOnce() -> String,
    violations: &mut Vec<FieldViolation>,
) -> Option<T> {
    let value = required_value(field, label, value, TEXT, violations)?;

    let parsed = parse(value.trim());
    if parsed.is_none() {
        violations.push(FieldViolation {
            field,
            message: format!("{label} must be one of {}", allowed()),
        });
    }
    parsed
}

fn sale_month(
    value: Option<FormValue<String>>,
    violations: &mut Vec<FieldViolation>,
) -> Option<SaleMonth> {
    let value = required_value("monthOfSale", "Month of sale", value, TEXT, violations)?;

    let parsed = MONTH_OF_SALE.captures(value.trim()).and_then(|captures| {
        let year = captures[1].parse::<i32>().ok()?;
        let month = captures[2].parse::<u32>().ok()?;
        SaleMonth::new(year, month)
    });

    if parsed.is_none() {
        violations.push(FieldViolation {
            field: "monthOfSale",
            message: "Month of sale must use the YYYY-MM format".to_string(),
        });
    }
    parsed
}

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::reference::{EnergyRating, PropertyType, Tenure};

/// A single submitted form value: the expected JSON type, or whatever arrived in its place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue<T> {
    Valid(T),
    Mistyped(serde_json::Value),
}

impl<T> From<T> for FormValue<T> {
    fn from(value: T) -> Self {
        Self::Valid(value)
    }
}

impl From<&str> for FormValue<String> {
    fn from(value: &str) -> Self {
        Self::Valid(value.to_string())
    }
}

/// Form payload as received from callers. Fields stay loosely typed so validation can report
/// every problem at once, wrong JSON types included, instead of failing on the first one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionSubmission {
    #[serde(default)]
    pub full_address: Option<FormValue<String>>,
    #[serde(default)]
    pub outcode: Option<FormValue<String>>,
    #[serde(default)]
    pub longitude: Option<FormValue<f64>>,
    #[serde(default)]
    pub latitude: Option<FormValue<f64>>,
    #[serde(default)]
    pub bedrooms: Option<FormValue<f64>>,
    #[serde(default)]
    pub bathrooms: Option<FormValue<f64>>,
    #[serde(default)]
    pub reception_rooms: Option<FormValue<f64>>,
    #[serde(default)]
    pub area: Option<FormValue<f64>>,
    #[serde(default)]
    pub tenure: Option<FormValue<String>>,
    #[serde(default)]
    pub property_type: Option<FormValue<String>>,
    #[serde(default)]
    pub current_energy_rating: Option<FormValue<String>>,
    #[serde(default)]
    pub month_of_sale: Option<FormValue<String>>,
}

/// Validated, strongly typed prediction input. Only produced by
/// [`RequestValidator`](super::RequestValidator).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    pub full_address: String,
    pub outcode: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub reception_rooms: u8,
    pub area: f64,
    pub tenure: Tenure,
    pub property_type: PropertyType,
    pub current_energy_rating: EnergyRating,
    pub month_of_sale: SaleMonth,
}

/// Calendar month in `YYYY-MM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SaleMonth {
    first_day: NaiveDate,
}

impl SaleMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    /// The month `offset` months after this one, rolling over year boundaries.
    pub fn plus_months(self, offset: u32) -> Option<Self> {
        self.first_day
            .checked_add_months(Months::new(offset))
            .map(|first_day| Self { first_day })
    }

    /// Chart label such as `Jan 2025`.
    pub fn label(self) -> String {
        self.first_day.format("%b %Y").to_string()
    }

    pub fn first_day(self) -> NaiveDate {
        self.first_day
    }
}

impl fmt::Display for SaleMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day.format("%Y-%m"))
    }
}

impl Serialize for SaleMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTrend {
    Increasing,
    Decreasing,
    Stable,
}

impl PriceTrend {
    pub const ALL: [Self; 3] = [Self::Increasing, Self::Decreasing, Self::Stable];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

/// One point of the monthly price chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub month: String,
    pub price: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    pub predicted_price: u64,
    pub price_trend: PriceTrend,
    pub average_area_price: u64,
    pub price_history_chart_data: Vec<PricePoint>,
}

use serde::{Deserialize, Serialize};

use super::domain::{PredictionRequest, PredictionResponse, PricePoint, PriceTrend, SaleMonth};
use super::random::RandomSource;
use crate::reference::{EnergyRating, Tenure};

/// How the `priceTrend` label is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMode {
    /// Compare the last and first chart points.
    #[default]
    Derived,
    /// Pick a label uniformly at random, independent of the chart.
    Legacy,
}

impl TrendMode {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "derived" => Some(Self::Derived),
            "legacy" | "random" => Some(Self::Legacy),
            _ => None,
        }
    }
}

/// Location tier matched by outcode prefix. Tiers are checked in order.
#[derive(Debug, Clone)]
pub struct LocationTier {
    pub prefixes: &'static [&'static str],
    pub multiplier: f64,
}

/// Constants of the synthetic pricing formula.
#[derive(Debug, Clone)]
pub struct PricingModel {
    pub base_price: f64,
    pub per_bedroom: f64,
    pub per_bathroom: f64,
    pub per_reception_room: f64,
    pub per_square_meter: f64,
    pub freehold_multiplier: f64,
    /// Indexed A through G.
    pub energy_modifiers: [f64; 7],
    pub location_tiers: Vec<LocationTier>,
    pub history_months: u32,
    pub history_start_ratio: f64,
    pub jitter_span: f64,
    pub jitter_offset: f64,
    pub area_ratio_floor: f64,
    pub area_ratio_span: f64,
    /// Relative first-to-last change below which a derived trend is `stable`.
    pub stable_band: f64,
}

impl Default for PricingModel {
    fn default() -> Self {
        Self {
            base_price: 200_000.0,
            per_bedroom: 70_000.0,
            per_bathroom: 40_000.0,
            per_reception_room: 30_000.0,
            per_square_meter: 1_500.0,
            freehold_multiplier: 1.1,
            energy_modifiers: [1.10, 1.05, 1.00, 0.95, 0.90, 0.85, 0.80],
            location_tiers: vec![
                LocationTier {
                    prefixes: &["SW", "W", "N"],
                    multiplier: 1.20,
                },
                LocationTier {
                    prefixes: &["E", "SE"],
                    multiplier: 1.05,
                },
            ],
            history_months: 12,
            history_start_ratio: 0.98,
            jitter_span: 0.015,
            jitter_offset: 0.004,
            area_ratio_floor: 0.8,
            area_ratio_span: 0.3,
            stable_band: 0.01,
        }
    }
}

impl PricingModel {
    pub fn energy_modifier(&self, rating: EnergyRating) -> f64 {
        let index = EnergyRating::ALL
            .iter()
            .position(|candidate| *candidate == rating)
            .unwrap_or(2);
        self.energy_modifiers[index]
    }

    /// First tier whose prefix list matches the start of the outcode wins.
    pub fn location_multiplier(&self, outcode: &str) -> f64 {
        self.location_tiers
            .iter()
            .find(|tier| {
                tier.prefixes
                    .iter()
                    .any(|prefix| outcode.starts_with(prefix))
            })
            .map(|tier| tier.multiplier)
            .unwrap_or(1.0)
    }

    /// Unrounded price before the chart and area figures are derived.
    pub fn base_estimate(&self, request: &PredictionRequest) -> f64 {
        let mut price = self.base_price;
        price += f64::from(request.bedrooms) * self.per_bedroom;
        price += f64::from(request.bathrooms) * self.per_bathroom;
        price += f64::from(request.reception_rooms) * self.per_reception_room;
        price += request.area * self.per_square_meter;

        if request.tenure == Tenure::Freehold {
            price *= self.freehold_multiplier;
        }

        price *= self.energy_modifier(request.current_energy_rating);
        price *= self.location_multiplier(&request.outcode);
        price
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("estimated price is not a finite number")]
    NonFinitePrice,
    #[error("estimated price {0} exceeds the supported range")]
    PriceOutOfRange(f64),
    #[error("chart month {offset} after {start} is out of range")]
    MonthOutOfRange { start: SaleMonth, offset: u32 },
    #[error("prediction backend unavailable: {0}")]
    Backend(String),
}

/// Headroom for the chart drift and area ratio on top of the estimate, well inside `u64`.
const MAX_ESTIMATE: f64 = 1e15;

pub(crate) fn round_to_thousand(value: f64) -> u64 {
    ((value / 1000.0).round() * 1000.0).max(0.0) as u64
}

/// Produce the synthetic prediction for an already validated request.
pub fn generate_prediction(
    request: &PredictionRequest,
    model: &PricingModel,
    trend_mode: TrendMode,
    random: &dyn RandomSource,
) -> Result<PredictionResponse, GenerationError> {
    let estimate = model.base_estimate(request);
    if !estimate.is_finite() {
        return Err(GenerationError::NonFinitePrice);
    }
    if estimate > MAX_ESTIMATE {
        return Err(GenerationError::PriceOutOfRange(estimate));
    }

    let predicted_price = round_to_thousand(estimate);
    let history = price_history(predicted_price, request.month_of_sale, model, random)?;

    let price_trend = match trend_mode {
        TrendMode::Legacy => {
            let index = (random.next_unit() * PriceTrend::ALL.len() as f64) as usize;
            PriceTrend::ALL[index.min(PriceTrend::ALL.len() - 1)]
        }
        TrendMode::Derived => derived_trend(&history, model.stable_band),
    };

    let area_ratio = model.area_ratio_floor + random.next_unit() * model.area_ratio_span;
    let average_area_price = round_to_thousand(predicted_price as f64 * area_ratio);

    Ok(PredictionResponse {
        predicted_price,
        price_trend,
        average_area_price,
        price_history_chart_data: history,
    })
}

fn price_history(
    predicted_price: u64,
    start: SaleMonth,
    model: &PricingModel,
    random: &dyn RandomSource,
) -> Result<Vec<PricePoint>, GenerationError> {
    let mut last_price = predicted_price as f64 * model.history_start_ratio;
    let mut points = Vec::with_capacity(model.history_months as usize);

    for offset in 0..model.history_months {
        let month = start
            .plus_months(offset)
            .ok_or(GenerationError::MonthOutOfRange { start, offset })?;
        let jitter = random.next_unit() * model.jitter_span - model.jitter_offset;
        last_price *= 1.0 + jitter;

        points.push(PricePoint {
            month: month.label(),
            price: round_to_thousand(last_price),
        });
    }

    Ok(points)
}

fn derived_trend(history: &[PricePoint], stable_band: f64) -> PriceTrend {
    let (Some(first), Some(last)) = (history.first(), history.last()) else {
        return PriceTrend::Stable;
    };
    if first.price == 0 {
        return PriceTrend::Stable;
    }

    let change = (last.price as f64 - first.price as f64) / first.price as f64;
    if change > stable_band {
        PriceTrend::Increasing
    } else if change < -stable_band {
        PriceTrend::Decreasing
    } else {
        PriceTrend::Stable
    }
}

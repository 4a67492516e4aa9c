use crate::infra::ServiceRandom;
use chrono::Local;
use clap::Args;
use price_insight::config::AppConfig;
use price_insight::error::AppError;
use price_insight::reference::ReferenceData;
use price_insight::workflows::insight::{
    format_pounds, RegionInsightService, TemplateTextGenerator,
};
use price_insight::workflows::prediction::{
    FormValue, PredictionResponse, PredictionService, PredictionServiceError, PredictionSettings,
    PredictionSubmission,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// Full street address of the property
    #[arg(long)]
    pub(crate) address: String,
    /// Postcode district, e.g. SW1 or E14
    #[arg(long)]
    pub(crate) outcode: String,
    #[arg(long)]
    pub(crate) bedrooms: f64,
    #[arg(long, default_value_t = 1.0)]
    pub(crate) bathrooms: f64,
    #[arg(long, default_value_t = 1.0)]
    pub(crate) reception_rooms: f64,
    /// Floor area in square meters
    #[arg(long)]
    pub(crate) area: f64,
    /// Freehold or Leasehold
    #[arg(long, default_value = "Freehold")]
    pub(crate) tenure: String,
    /// Flat, Detached, Terraced, Semi-detached, Bungalow or Maisonette
    #[arg(long, default_value = "Flat")]
    pub(crate) property_type: String,
    /// Energy rating A-G
    #[arg(long, default_value = "C")]
    pub(crate) energy_rating: String,
    /// First month of the chart (YYYY-MM). Defaults to the current month.
    #[arg(long)]
    pub(crate) month_of_sale: Option<String>,
    /// Seed the chart jitter for reproducible output
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Print the raw JSON response instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct InsightArgs {
    /// Postcode district to summarize, e.g. SW1
    #[arg(long)]
    pub(crate) region: String,
}

pub(crate) async fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let seed = args.seed.or(config.prediction.random_seed);
    let settings = PredictionSettings {
        trend_mode: config.prediction.trend_mode,
        ..PredictionSettings::immediate()
    };
    let service = PredictionService::new(Arc::new(ServiceRandom::from_seed(seed)), settings);

    let json = args.json;
    let address = args.address.clone();
    let submission = submission_from_args(args);
    let outcode = match &submission.outcode {
        Some(FormValue::Valid(outcode)) => outcode.clone(),
        _ => String::new(),
    };

    let prediction = match service.predict(submission).await {
        Ok(prediction) => prediction,
        Err(PredictionServiceError::Validation(errors)) => {
            eprintln!("Prediction request rejected");
            for violation in errors.violations() {
                eprintln!("- {}: {}", violation.field, violation.message);
            }
            return Err(PredictionServiceError::Validation(errors).into());
        }
        Err(other) => return Err(other.into()),
    };

    if json {
        let rendered = serde_json::to_string_pretty(&prediction)
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
        println!("{rendered}");
    } else {
        render_prediction(&address, &outcode, &prediction);
    }

    Ok(())
}

pub(crate) fn run_insight(args: InsightArgs) -> Result<(), AppError> {
    let reference = Arc::new(ReferenceData::embedded()?);
    let service = RegionInsightService::new(Arc::new(TemplateTextGenerator), reference);

    let insight = service.summarize(&args.region)?;
    println!("Region outlook: {}", insight.region_code);
    println!("{}", insight.summary);
    Ok(())
}

pub(crate) fn run_regions() -> Result<(), AppError> {
    let reference = ReferenceData::embedded()?;

    println!("London outcodes");
    for record in reference.outcodes() {
        println!(
            "- {:<5} {:<24} {:>12}  {}",
            record.id,
            record.name,
            pounds(u64::from(record.average_price)),
            record.price_category
        );
    }
    Ok(())
}

fn submission_from_args(args: PredictArgs) -> PredictionSubmission {
    let month_of_sale = args
        .month_of_sale
        .unwrap_or_else(|| Local::now().format("%Y-%m").to_string());

    PredictionSubmission {
        full_address: Some(args.address.into()),
        outcode: Some(args.outcode.into()),
        longitude: None,
        latitude: None,
        bedrooms: Some(args.bedrooms.into()),
        bathrooms: Some(args.bathrooms.into()),
        reception_rooms: Some(args.reception_rooms.into()),
        area: Some(args.area.into()),
        tenure: Some(args.tenure.into()),
        property_type: Some(args.property_type.into()),
        current_energy_rating: Some(args.energy_rating.into()),
        month_of_sale: Some(month_of_sale.into()),
    }
}

fn pounds(amount: u64) -> String {
    format!("£{}", format_pounds(amount))
}

fn render_prediction(address: &str, outcode: &str, prediction: &PredictionResponse) {
    println!("Synthetic price prediction");
    println!("Property: {} ({})", address, outcode.trim().to_ascii_uppercase());
    println!(
        "Predicted price: {}",
        pounds(prediction.predicted_price)
    );
    println!(
        "Average area price: {}",
        pounds(prediction.average_area_price)
    );
    println!("Price trend: {}", prediction.price_trend.label());

    println!("\n12-month outlook");
    for point in &prediction.price_history_chart_data {
        println!("- {}: {}", point.month, pounds(point.price));
    }
}

use crate::cli::ServeArgs;
use crate::infra::{AppState, ServiceRandom};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use price_insight::config::AppConfig;
use price_insight::error::AppError;
use price_insight::reference::ReferenceData;
use price_insight::telemetry;
use price_insight::workflows::insight::{RegionInsightService, TemplateTextGenerator};
use price_insight::workflows::prediction::{PredictionService, PredictionSettings};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let reference = Arc::new(ReferenceData::embedded()?);
    let random = Arc::new(ServiceRandom::from_seed(config.prediction.random_seed));
    let prediction_service = Arc::new(PredictionService::new(
        random,
        PredictionSettings::from(&config.prediction),
    ));
    let insight_service = Arc::new(RegionInsightService::new(
        Arc::new(TemplateTextGenerator),
        reference.clone(),
    ));

    let app = with_service_routes(prediction_service, insight_service, reference.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        outcodes = reference.outcodes().len(),
        trend_mode = ?config.prediction.trend_mode,
        "price insight service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

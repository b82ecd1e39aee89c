/// Main application entry point with clean architecture
mod clients;
mod config;
mod diagnostics;
mod domain;
mod errors;
mod handlers;
mod mock;
mod normalize;
mod routes;
mod services;
mod utils;
mod validate;
mod vitals;

use crate::clients::{AirQualityClient, SeismicClient, WeatherClient};
use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::routes::build_router;
use crate::services::VitalsService;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!("Configuration loaded successfully");

    // Initialize clients
    let air_client = AirQualityClient::new(
        config.air_quality_url.clone(),
        config.request_timeout_secs,
        config.station_radius_m,
    )?;
    let seismic_client =
        SeismicClient::new(config.seismic_url.clone(), config.request_timeout_secs)?;
    let weather_client = WeatherClient::new(
        config.weather_url.clone(),
        config.weather_api_key.clone(),
        config.request_timeout_secs,
    )?;

    // Initialize services
    let vitals_service = Arc::new(VitalsService::new(
        air_client,
        seismic_client,
        weather_client,
        config.survey_delay_ms,
    ));

    // Initialize application state
    let state = AppState { vitals_service };

    // Build router
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("citypulse service listening on 0.0.0.0:3000");

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Business logic services layer
use crate::clients::{AirQualityClient, SeismicClient, WeatherClient};
use crate::diagnostics::{apply_diagnosis, diagnose};
use crate::domain::{CityVitals, DiagnosticResult, LocationData};
use crate::errors::{ApiError, ApiResult};
use crate::validate::{
    quality_report, validate_air_quality_raw, validate_seismic_raw, validate_vitals,
    validate_weather_raw, QualityReport, ValidationReport,
};
use crate::vitals::compute_vitals;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

/// Everything one location query produces: the assembled vitals, the
/// diagnostic verdict, and the advisory data quality findings.
#[derive(Debug, Serialize)]
pub struct VitalsReport {
    pub vitals: CityVitals,
    pub diagnostic: DiagnosticResult,
    pub validation: ValidationReport,
    pub quality: QualityReport,
}

/// City vitals service: concurrent upstream fetches, normalization,
/// diagnosis, and advisory validation for one location at a time.
pub struct VitalsService {
    air_client: AirQualityClient,
    seismic_client: SeismicClient,
    weather_client: WeatherClient,
    survey_delay: Duration,
}

impl VitalsService {
    pub fn new(
        air_client: AirQualityClient,
        seismic_client: SeismicClient,
        weather_client: WeatherClient,
        survey_delay_ms: u64,
    ) -> Self {
        Self {
            air_client,
            seismic_client,
            weather_client,
            survey_delay: Duration::from_millis(survey_delay_ms),
        }
    }

    /// Run the full pipeline for one location.
    ///
    /// The three fetches start together and are awaited together; each
    /// failure is logged with its classified message and replaced by the
    /// neutral default downstream. Only all three failing at once is an
    /// error. No retries, no cancellation of the other fetches.
    pub async fn query(&self, location: LocationData) -> ApiResult<VitalsReport> {
        let (air, seismic, weather) = tokio::join!(
            self.air_client.fetch_measurements(&location),
            self.seismic_client.fetch_events(&location),
            self.weather_client.fetch_current(&location),
        );

        let air = log_outcome("air_quality", air);
        let seismic = log_outcome("seismic", seismic);
        let weather = log_outcome("weather", weather);

        if air.is_none() && seismic.is_none() && weather.is_none() {
            return Err(ApiError::AllUpstreamsFailed(
                "air_quality, seismic, weather".to_string(),
            ));
        }

        let now_ms = location.timestamp;
        let mut validation = ValidationReport {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        };
        if let Some(raw) = &air {
            validation.merge(validate_air_quality_raw(raw));
        }
        if let Some(raw) = &seismic {
            validation.merge(validate_seismic_raw(raw, now_ms));
        }
        if let Some(raw) = &weather {
            validation.merge(validate_weather_raw(raw));
        }

        let vitals = compute_vitals(location, air.as_ref(), seismic.as_ref(), weather.as_ref());
        let diagnostic = diagnose(&vitals);
        let vitals = apply_diagnosis(vitals, &diagnostic);

        validation.merge(validate_vitals(&vitals, now_ms));
        for finding in validation.errors.iter().chain(validation.warnings.iter()) {
            warn!("data quality finding: {}", finding);
        }
        let quality = quality_report(&validation);

        Ok(VitalsReport {
            vitals,
            diagnostic,
            validation,
            quality,
        })
    }

    /// Multi-location harness: queries each location in turn with a fixed
    /// pacing delay. Failed locations are skipped, successes collected.
    pub async fn survey(&self, locations: Vec<LocationData>) -> Vec<VitalsReport> {
        let mut reports = Vec::new();
        let mut first = true;

        for location in locations {
            if !first {
                tokio::time::sleep(self.survey_delay).await;
            }
            first = false;

            match self.query(location).await {
                Ok(report) => reports.push(report),
                Err(e) => warn!("survey location skipped: {}", e),
            }
        }

        reports
    }
}

fn log_outcome(source: &str, result: ApiResult<Value>) -> Option<Value> {
    match result {
        Ok(raw) => Some(raw),
        Err(e) => {
            warn!("{} fetch failed, substituting defaults: {}", source, e);
            None
        }
    }
}

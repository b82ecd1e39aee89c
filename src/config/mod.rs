/// Application configuration module
use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub air_quality_url: String,
    pub seismic_url: String,
    pub weather_url: String,
    pub weather_api_key: String,
    /// Per-request timeout applied to every upstream fetch.
    pub request_timeout_secs: u64,
    /// Pacing delay between locations in the survey harness.
    pub survey_delay_ms: u64,
    /// Station search radius for air quality queries, meters.
    pub station_radius_m: u64,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let air_quality_url = env::var("AIR_QUALITY_URL")
            .unwrap_or_else(|_| "https://api.openaq.org/v2/measurements".to_string());

        let seismic_url = env::var("SEISMIC_URL").unwrap_or_else(|_| {
            "https://earthquake.usgs.gov/fdsnws/event/1/query".to_string()
        });

        let weather_url = env::var("WEATHER_URL")
            .unwrap_or_else(|_| "https://api.openweathermap.org/data/2.5/weather".to_string());

        let weather_api_key = env::var("WEATHER_API_KEY").unwrap_or_default();

        Ok(Self {
            air_quality_url,
            seismic_url,
            weather_url,
            weather_api_key,
            request_timeout_secs: env_u64("REQUEST_TIMEOUT_SECONDS", 10),
            survey_delay_ms: env_u64("SURVEY_DELAY_MS", 500),
            station_radius_m: env_u64("STATION_RADIUS_M", 10_000),
        })
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// External API clients module
use crate::domain::LocationData;
use crate::errors::ApiResult;
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("citypulse-service/1.0")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// Air quality measurements client (OpenAQ-style station API)
pub struct AirQualityClient {
    http_client: HttpClient,
    base_url: String,
    radius_m: u64,
}

impl AirQualityClient {
    pub fn new(base_url: String, timeout_secs: u64, radius_m: u64) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(timeout_secs)?,
            base_url,
            radius_m,
        })
    }

    /// Fetch raw station measurements near a location
    pub async fn fetch_measurements(&self, location: &LocationData) -> ApiResult<Value> {
        let resp = self
            .http_client
            .get_client()
            .get(&self.base_url)
            .query(&[
                ("coordinates", format!("{},{}", location.lat, location.lon)),
                ("radius", self.radius_m.to_string()),
                ("parameter", "no2,pm25,o3".to_string()),
                ("limit", "100".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let json = resp.json().await?;
        Ok(json)
    }
}

/// Seismic events client (USGS FDSN-style event API)
pub struct SeismicClient {
    http_client: HttpClient,
    base_url: String,
}

impl SeismicClient {
    pub fn new(base_url: String, timeout_secs: u64) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(timeout_secs)?,
            base_url,
        })
    }

    /// Fetch raw seismic events around a location for the last 30 days
    pub async fn fetch_events(&self, location: &LocationData) -> ApiResult<Value> {
        let start = (Utc::now() - chrono::Days::new(30)).date_naive();

        let resp = self
            .http_client
            .get_client()
            .get(&self.base_url)
            .query(&[
                ("format", "geojson".to_string()),
                ("latitude", location.lat.to_string()),
                ("longitude", location.lon.to_string()),
                ("maxradiuskm", "300".to_string()),
                ("starttime", start.to_string()),
                ("minmagnitude", "2.5".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let json = resp.json().await?;
        Ok(json)
    }
}

/// Current-weather client (OpenWeatherMap-style API)
pub struct WeatherClient {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(base_url: String, api_key: String, timeout_secs: u64) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(timeout_secs)?,
            base_url,
            api_key,
        })
    }

    /// Fetch current conditions for a location
    pub async fn fetch_current(&self, location: &LocationData) -> ApiResult<Value> {
        let mut req = self.http_client.get_client().get(&self.base_url).query(&[
            ("lat", location.lat.to_string()),
            ("lon", location.lon.to_string()),
            ("units", "metric".to_string()),
        ]);

        if !self.api_key.is_empty() {
            req = req.query(&[("appid", &self.api_key)]);
        }

        let resp = req.send().await?.error_for_status()?;
        let json = resp.json().await?;
        Ok(json)
    }
}

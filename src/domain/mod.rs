/// Domain models for the application
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic point a query is run against.
///
/// `timestamp` is epoch milliseconds at query creation. Immutable once it
/// enters the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    pub lat: f64,
    pub lon: f64,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl LocationData {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            timestamp: Utc::now().timestamp_millis(),
            city: None,
            country: None,
        }
    }
}

/// Provenance of a metric value. Synthetic and mock values must stay
/// distinguishable from measured data all the way to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Measured,
    Synthetic,
    Mock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AirQualityStatus {
    Healthy,
    Unhealthy,
    Hazardous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureStatus {
    Normal,
    Fever,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeartRateStatus {
    Normal,
    Elevated,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImmuneStatus {
    Strong,
    Weak,
    Compromised,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfectionStatus {
    Clean,
    Infected,
    Critical,
}

/// Heuristic classification of the current sample. There is no time-series
/// store behind these, so "trend" means no more than which band the single
/// observed value falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollutionTrend {
    Improving,
    Stable,
    Worsening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermalTrend {
    Increasing,
    Stable,
    Decreasing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VegetationTrend {
    Improving,
    Stable,
    Declining,
}

/// Mean pollutant concentrations in µg/m³ across reporting stations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pollutants {
    pub no2: f64,
    pub pm25: f64,
    pub o3: f64,
}

impl Pollutants {
    pub fn zero() -> Self {
        Self {
            no2: 0.0,
            pm25: 0.0,
            o3: 0.0,
        }
    }

    pub fn mean(&self) -> f64 {
        (self.no2 + self.pm25 + self.o3) / 3.0
    }
}

/// Urban-activity proxy, modeled as a heart rate in bpm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateMetric {
    pub value: f64,
    pub status: HeartRateStatus,
    pub trend: ThermalTrend,
    pub description: String,
    pub source: DataSource,
}

/// Surface temperature plus the estimated heat-island excess over a rural
/// baseline (approximated from absolute temperature alone).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureMetric {
    pub value: f64,
    pub heat_island_effect: f64,
    pub status: TemperatureStatus,
    pub trend: ThermalTrend,
    pub description: String,
    pub source: DataSource,
}

/// Air quality as "blood oxygen": `value` is the PM2.5-keyed AQI in [0, 500].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodOxygenMetric {
    pub value: f64,
    pub pollutants: Pollutants,
    pub status: AirQualityStatus,
    pub trend: PollutionTrend,
    pub description: String,
    pub source: DataSource,
}

/// Green-space proxy: `value` is vegetation coverage in percent, `ndvi` the
/// satellite vegetation index in [-1, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImmuneSystemMetric {
    pub value: f64,
    pub ndvi: f64,
    pub status: ImmuneStatus,
    pub trend: VegetationTrend,
    pub description: String,
    pub source: DataSource,
}

/// Disaster pressure: recent seismic events plus pollution hotspots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfectionsMetric {
    pub disaster_events: u32,
    pub pollution_hotspots: u32,
    pub status: InfectionStatus,
    pub trend: PollutionTrend,
    pub description: String,
    pub source: DataSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

/// Aggregate verdict. Zero-valued until the diagnostic engine has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallHealth {
    pub score: i64,
    pub status: OverallStatus,
    pub diagnosis: String,
    pub recommendations: Vec<String>,
}

impl OverallHealth {
    /// Placeholder used between assembly and diagnosis.
    pub fn pending() -> Self {
        Self {
            score: 0,
            status: OverallStatus::Critical,
            diagnosis: String::new(),
            recommendations: Vec::new(),
        }
    }
}

/// The five-category patient chart for one location query. Created once per
/// query, immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityVitals {
    pub location: LocationData,
    pub heart_rate: HeartRateMetric,
    pub temperature: TemperatureMetric,
    pub blood_oxygen: BloodOxygenMetric,
    pub immune_system: ImmuneSystemMetric,
    pub infections: InfectionsMetric,
    pub overall_health: OverallHealth,
}

/// One weighted category contribution, consumed only for the overall sum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthScore {
    pub category: &'static str,
    pub score: f64,
    pub weight: f64,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Output of the diagnostic engine. Derived from one CityVitals snapshot,
/// stateless and recomputed on every query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticResult {
    pub overall_score: i64,
    pub category_scores: Vec<HealthScore>,
    pub diagnosis: String,
    pub recommendations: Vec<String>,
    pub severity: Severity,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}

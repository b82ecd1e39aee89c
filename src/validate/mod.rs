/// Advisory data validation. Everything here is pure and never gates the
/// pipeline: errors mark structurally unusable data, warnings mark
/// suspicious-but-usable data, and the caller decides what to log.
use crate::domain::{CityVitals, LocationData};
use crate::utils::{epoch_ms, num};
use serde::Serialize;
use serde_json::Value;

const DAY_MS: i64 = 24 * 3600 * 1000;
const YEAR_MS: i64 = 365 * DAY_MS;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Fold another report's findings into this one.
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.is_valid = self.errors.is_empty();
    }
}

/// Check a location for usable coordinates and a plausible timestamp.
pub fn validate_location(location: &LocationData, now_ms: i64) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if location.lat.is_nan() || !(-90.0..=90.0).contains(&location.lat) {
        errors.push(format!("latitude {} outside [-90, 90]", location.lat));
    }
    if location.lon.is_nan() || !(-180.0..=180.0).contains(&location.lon) {
        errors.push(format!("longitude {} outside [-180, 180]", location.lon));
    }
    if location.timestamp > now_ms {
        warnings.push("location timestamp is in the future".to_string());
    } else if now_ms - location.timestamp > DAY_MS {
        warnings.push("location timestamp is older than 24 hours".to_string());
    }

    ValidationReport::from_parts(errors, warnings)
}

/// Check the raw air quality payload for its minimal expected shape.
pub fn validate_air_quality_raw(raw: &Value) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    match raw.get("results").and_then(|r| r.as_array()) {
        None => errors.push("air quality payload has no results array".to_string()),
        Some(results) => {
            for (i, item) in results.iter().enumerate() {
                match item.get("value").and_then(num) {
                    None => errors.push(format!("measurement {} has no numeric value", i)),
                    Some(v) if v.is_nan() => {
                        errors.push(format!("measurement {} value is NaN", i))
                    }
                    Some(v) if !(0.0..=1000.0).contains(&v) => {
                        warnings.push(format!("measurement {} value {} is implausible", i, v))
                    }
                    Some(_) => {}
                }
            }
        }
    }

    ValidationReport::from_parts(errors, warnings)
}

/// Check the raw seismic payload: feature shape, magnitudes, event age.
pub fn validate_seismic_raw(raw: &Value, now_ms: i64) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    match raw.get("features").and_then(|f| f.as_array()) {
        None => errors.push("seismic payload has no features array".to_string()),
        Some(features) => {
            for (i, feature) in features.iter().enumerate() {
                let props = feature.get("properties");
                match props.and_then(|p| p.get("mag")).and_then(num) {
                    None => errors.push(format!("event {} has no numeric magnitude", i)),
                    Some(mag) if !(0.0..=10.0).contains(&mag) => {
                        warnings.push(format!("event {} magnitude {} is implausible", i, mag))
                    }
                    Some(_) => {}
                }
                if let Some(t) = props.and_then(|p| p.get("time")).and_then(epoch_ms) {
                    if now_ms - t > YEAR_MS {
                        warnings.push(format!("event {} is older than one year", i));
                    }
                }
            }
        }
    }

    ValidationReport::from_parts(errors, warnings)
}

/// Check the raw weather payload for a usable current temperature.
pub fn validate_weather_raw(raw: &Value) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    match raw.get("main").and_then(|m| m.get("temp")).and_then(num) {
        None => errors.push("weather payload has no main.temp field".to_string()),
        Some(t) if t.is_nan() => errors.push("weather temperature is NaN".to_string()),
        Some(t) if !(-90.0..=60.0).contains(&t) => {
            warnings.push(format!("temperature {} °C is outside recorded extremes", t))
        }
        Some(_) => {}
    }

    ValidationReport::from_parts(errors, warnings)
}

/// Check an assembled vitals record against its documented ranges.
pub fn validate_vitals(vitals: &CityVitals, now_ms: i64) -> ValidationReport {
    let mut report = validate_location(&vitals.location, now_ms);
    let mut warnings = Vec::new();

    if !(0.0..=500.0).contains(&vitals.blood_oxygen.value) {
        warnings.push(format!(
            "AQI {} outside [0, 500]",
            vitals.blood_oxygen.value
        ));
    }
    if !(-1.0..=1.0).contains(&vitals.immune_system.ndvi) {
        warnings.push(format!("NDVI {} outside [-1, 1]", vitals.immune_system.ndvi));
    }
    if !(0.0..=100.0).contains(&vitals.immune_system.value) {
        warnings.push(format!(
            "green coverage {}% outside [0, 100]",
            vitals.immune_system.value
        ));
    }
    if !(0.0..=250.0).contains(&vitals.heart_rate.value) {
        warnings.push(format!(
            "heart rate {} bpm outside [0, 250]",
            vitals.heart_rate.value
        ));
    }
    if !(-90.0..=60.0).contains(&vitals.temperature.value) {
        warnings.push(format!(
            "temperature {} °C outside recorded extremes",
            vitals.temperature.value
        ));
    }

    report.merge(ValidationReport::from_parts(Vec::new(), warnings));
    report
}

#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub score: i64,
    pub recommendations: Vec<String>,
}

/// Flat-penalty data quality score: 20 per error, 5 per warning, floored at
/// zero. Informational only.
pub fn quality_report(report: &ValidationReport) -> QualityReport {
    let penalty = 20 * report.errors.len() as i64 + 5 * report.warnings.len() as i64;
    let score = (100 - penalty).max(0);

    let recommendations = if score >= 90 {
        vec!["Data quality is high; no action needed".to_string()]
    } else if score >= 60 {
        vec![
            "Review flagged measurements before publishing derived scores".to_string(),
            "Spot-check upstream station coverage for the query area".to_string(),
        ]
    } else {
        vec![
            "Treat derived scores as indicative only".to_string(),
            "Re-query the upstream sources before acting on this report".to_string(),
            "Investigate recurring schema failures in the raw payloads".to_string(),
        ]
    };

    QualityReport {
        score,
        recommendations,
    }
}

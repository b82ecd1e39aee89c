/// Vitals assembler: merges the per-source normalized metrics into one
/// CityVitals record, substituting neutral defaults for failed sources and
/// synthesizing the two categories with no real upstream wired in.
use crate::domain::{
    CityVitals, DataSource, HeartRateMetric, HeartRateStatus, ImmuneStatus, ImmuneSystemMetric,
    LocationData, OverallHealth, ThermalTrend, VegetationTrend,
};
use crate::normalize::{
    neutral_blood_oxygen, neutral_infections, neutral_temperature, normalize_air_quality,
    normalize_seismic, normalize_weather,
};
use rand::Rng;
use serde_json::Value;

/// Documented plausible range for the synthetic urban-activity pulse, bpm.
pub const HEART_RATE_RANGE: (f64, f64) = (60.0, 100.0);
/// Documented plausible range for synthetic green coverage, percent.
pub const GREEN_COVERAGE_RANGE: (f64, f64) = (20.0, 70.0);
/// Documented plausible range for synthetic NDVI.
pub const NDVI_RANGE: (f64, f64) = (0.3, 0.8);

pub fn determine_heart_status(bpm: f64) -> HeartRateStatus {
    if bpm > 120.0 {
        HeartRateStatus::Critical
    } else if bpm > 90.0 {
        HeartRateStatus::Elevated
    } else {
        HeartRateStatus::Normal
    }
}

pub fn determine_heart_trend(bpm: f64) -> ThermalTrend {
    if bpm > 85.0 {
        ThermalTrend::Increasing
    } else if bpm < 70.0 {
        ThermalTrend::Decreasing
    } else {
        ThermalTrend::Stable
    }
}

pub fn determine_immune_status(coverage_pct: f64, ndvi: f64) -> ImmuneStatus {
    if coverage_pct < 20.0 || ndvi < 0.2 {
        ImmuneStatus::Compromised
    } else if coverage_pct < 40.0 || ndvi < 0.4 {
        ImmuneStatus::Weak
    } else {
        ImmuneStatus::Strong
    }
}

pub fn determine_vegetation_trend(ndvi: f64) -> VegetationTrend {
    if ndvi > 0.6 {
        VegetationTrend::Improving
    } else if ndvi < 0.3 {
        VegetationTrend::Declining
    } else {
        VegetationTrend::Stable
    }
}

/// Build a heart-rate metric from a pulse value, tagging its provenance.
pub fn heart_rate_metric(bpm: f64, source: DataSource) -> HeartRateMetric {
    HeartRateMetric {
        value: bpm,
        status: determine_heart_status(bpm),
        trend: determine_heart_trend(bpm),
        description: format!("Urban activity pulse at {:.0} bpm", bpm),
        source,
    }
}

/// Build an immune-system metric from coverage and NDVI, tagging provenance.
pub fn immune_system_metric(coverage_pct: f64, ndvi: f64, source: DataSource) -> ImmuneSystemMetric {
    ImmuneSystemMetric {
        value: coverage_pct,
        ndvi,
        status: determine_immune_status(coverage_pct, ndvi),
        trend: determine_vegetation_trend(ndvi),
        description: format!(
            "{:.0}% green coverage, NDVI {:.2}",
            coverage_pct, ndvi
        ),
        source,
    }
}

fn synthesize_heart_rate<R: Rng>(rng: &mut R) -> HeartRateMetric {
    let bpm = rng.gen_range(HEART_RATE_RANGE.0..HEART_RATE_RANGE.1);
    heart_rate_metric(bpm, DataSource::Synthetic)
}

fn synthesize_immune_system<R: Rng>(rng: &mut R) -> ImmuneSystemMetric {
    let coverage = rng.gen_range(GREEN_COVERAGE_RANGE.0..GREEN_COVERAGE_RANGE.1);
    let ndvi = rng.gen_range(NDVI_RANGE.0..NDVI_RANGE.1);
    immune_system_metric(coverage, ndvi, DataSource::Synthetic)
}

/// Assemble a CityVitals record from whatever raw responses arrived.
///
/// Any absent or failed source is replaced by its documented neutral default;
/// heart rate and green space have no upstream at all and are sampled
/// uniformly from their documented ranges, tagged `Synthetic`. The overall
/// health field stays a placeholder until [`crate::diagnostics::diagnose`]
/// runs.
pub fn compute_vitals(
    location: LocationData,
    air_quality_raw: Option<&Value>,
    seismic_raw: Option<&Value>,
    weather_raw: Option<&Value>,
) -> CityVitals {
    compute_vitals_with_rng(
        location,
        air_quality_raw,
        seismic_raw,
        weather_raw,
        &mut rand::thread_rng(),
    )
}

pub fn compute_vitals_with_rng<R: Rng>(
    location: LocationData,
    air_quality_raw: Option<&Value>,
    seismic_raw: Option<&Value>,
    weather_raw: Option<&Value>,
    rng: &mut R,
) -> CityVitals {
    let blood_oxygen = air_quality_raw
        .map(normalize_air_quality)
        .unwrap_or_else(neutral_blood_oxygen);

    let infections = seismic_raw
        .map(|raw| normalize_seismic(raw, location.timestamp))
        .unwrap_or_else(neutral_infections);

    let temperature = weather_raw
        .map(normalize_weather)
        .unwrap_or_else(neutral_temperature);

    CityVitals {
        heart_rate: synthesize_heart_rate(rng),
        immune_system: synthesize_immune_system(rng),
        blood_oxygen,
        infections,
        temperature,
        overall_health: OverallHealth::pending(),
        location,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AirQualityStatus, InfectionStatus, PollutionTrend, TemperatureStatus};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn location() -> LocationData {
        LocationData {
            lat: 48.85,
            lon: 2.35,
            timestamp: 1_700_000_000_000,
            city: Some("Paris".to_string()),
            country: Some("FR".to_string()),
        }
    }

    #[test]
    fn test_all_sources_present() {
        let air = json!({"results": [{"parameter": "pm25", "value": 40.0}]});
        let seismic = json!({"features": []});
        let weather = json!({"main": {"temp": 28.0}});
        let mut rng = StdRng::seed_from_u64(7);

        let vitals = compute_vitals_with_rng(
            location(),
            Some(&air),
            Some(&seismic),
            Some(&weather),
            &mut rng,
        );

        assert_eq!(vitals.blood_oxygen.source, DataSource::Measured);
        assert_eq!(vitals.blood_oxygen.status, AirQualityStatus::Unhealthy);
        assert_eq!(vitals.infections.status, InfectionStatus::Clean);
        assert_eq!(vitals.temperature.value, 28.0);
        assert_eq!(vitals.overall_health.score, 0);
    }

    #[test]
    fn test_failed_seismic_source_defaults_clean() {
        let air = json!({"results": [{"parameter": "pm25", "value": 5.0}]});
        let weather = json!({"main": {"temp": 18.0}});
        let mut rng = StdRng::seed_from_u64(7);

        let vitals =
            compute_vitals_with_rng(location(), Some(&air), None, Some(&weather), &mut rng);

        assert_eq!(vitals.infections.disaster_events, 0);
        assert_eq!(vitals.infections.pollution_hotspots, 0);
        assert_eq!(vitals.infections.status, InfectionStatus::Clean);
        assert_eq!(vitals.infections.source, DataSource::Synthetic);
        // Other sources are unaffected by the failure.
        assert_eq!(vitals.blood_oxygen.source, DataSource::Measured);
        assert_eq!(vitals.temperature.source, DataSource::Measured);
    }

    #[test]
    fn test_all_sources_absent_still_assembles() {
        let mut rng = StdRng::seed_from_u64(7);
        let vitals = compute_vitals_with_rng(location(), None, None, None, &mut rng);

        assert_eq!(vitals.blood_oxygen.value, 0.0);
        assert_eq!(vitals.blood_oxygen.trend, PollutionTrend::Stable);
        assert_eq!(vitals.temperature.status, TemperatureStatus::Normal);
        assert_eq!(vitals.infections.status, InfectionStatus::Clean);
    }

    #[test]
    fn test_synthetic_metrics_tagged_and_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let vitals = compute_vitals_with_rng(location(), None, None, None, &mut rng);

        assert_eq!(vitals.heart_rate.source, DataSource::Synthetic);
        assert!(vitals.heart_rate.value >= HEART_RATE_RANGE.0);
        assert!(vitals.heart_rate.value < HEART_RATE_RANGE.1);

        assert_eq!(vitals.immune_system.source, DataSource::Synthetic);
        assert!(vitals.immune_system.value >= GREEN_COVERAGE_RANGE.0);
        assert!(vitals.immune_system.value < GREEN_COVERAGE_RANGE.1);
        assert!(vitals.immune_system.ndvi >= NDVI_RANGE.0);
        assert!(vitals.immune_system.ndvi < NDVI_RANGE.1);
    }

    #[test]
    fn test_heart_status_bands() {
        assert_eq!(determine_heart_status(90.0), HeartRateStatus::Normal);
        assert_eq!(determine_heart_status(91.0), HeartRateStatus::Elevated);
        assert_eq!(determine_heart_status(121.0), HeartRateStatus::Critical);
    }

    #[test]
    fn test_immune_status_bands() {
        assert_eq!(determine_immune_status(55.0, 0.6), ImmuneStatus::Strong);
        assert_eq!(determine_immune_status(35.0, 0.6), ImmuneStatus::Weak);
        assert_eq!(determine_immune_status(55.0, 0.1), ImmuneStatus::Compromised);
        assert_eq!(determine_immune_status(10.0, 0.6), ImmuneStatus::Compromised);
    }
}

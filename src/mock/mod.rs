//! Mock vitals generator for demos and offline tests.
//!
//! No external systems are contacted. Values start from fixed plausible bases
//! and get a small uniform jitter, and every metric is tagged
//! [`DataSource::Mock`] so it can never be mistaken for measured data.

use crate::domain::{
    BloodOxygenMetric, CityVitals, DataSource, InfectionsMetric, LocationData, OverallHealth,
    PollutionTrend, Pollutants, TemperatureMetric,
};
use crate::normalize::{
    determine_air_quality_status, determine_air_trend, determine_infection_status,
    determine_temperature_status, determine_thermal_trend, heat_island_effect,
};
use crate::vitals::{heart_rate_metric, immune_system_metric};
use rand::Rng;

/// Generate a full vitals record for a location without network access.
pub fn mock_vitals(location: LocationData) -> CityVitals {
    mock_vitals_with_rng(location, &mut rand::thread_rng())
}

pub fn mock_vitals_with_rng<R: Rng>(location: LocationData, rng: &mut R) -> CityVitals {
    let pm25 = 15.0 + rng.gen_range(-8.0..8.0);
    let pollutants = Pollutants {
        no2: 18.0 + rng.gen_range(-6.0..6.0),
        pm25,
        o3: 40.0 + rng.gen_range(-12.0..12.0),
    };
    let aqi = crate::normalize::compute_aqi(pm25);
    let blood_oxygen = BloodOxygenMetric {
        value: aqi,
        pollutants,
        status: determine_air_quality_status(aqi),
        trend: determine_air_trend(pollutants.mean()),
        description: format!("AQI {:.0} (mock)", aqi),
        source: DataSource::Mock,
    };

    let temp = 22.0 + rng.gen_range(-6.0..10.0);
    let temperature = TemperatureMetric {
        value: temp,
        heat_island_effect: heat_island_effect(temp),
        status: determine_temperature_status(temp),
        trend: determine_thermal_trend(temp),
        description: format!("{:.1} °C (mock)", temp),
        source: DataSource::Mock,
    };

    let events = rng.gen_range(0..3u32);
    let infections = InfectionsMetric {
        disaster_events: events,
        pollution_hotspots: 0,
        status: determine_infection_status(events),
        trend: if events == 0 {
            PollutionTrend::Stable
        } else {
            PollutionTrend::Worsening
        },
        description: format!("{} seismic events (mock)", events),
        source: DataSource::Mock,
    };

    let mut heart_rate = heart_rate_metric(75.0 + rng.gen_range(-10.0..15.0), DataSource::Mock);
    heart_rate.description.push_str(" (mock)");
    let mut immune_system = immune_system_metric(
        45.0 + rng.gen_range(-15.0..20.0),
        0.5 + rng.gen_range(-0.15..0.2),
        DataSource::Mock,
    );
    immune_system.description.push_str(" (mock)");

    CityVitals {
        location,
        heart_rate,
        temperature,
        blood_oxygen,
        immune_system,
        infections,
        overall_health: OverallHealth::pending(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn location() -> LocationData {
        LocationData {
            lat: 35.68,
            lon: 139.69,
            timestamp: 1_700_000_000_000,
            city: Some("Tokyo".to_string()),
            country: Some("JP".to_string()),
        }
    }

    #[test]
    fn test_every_metric_tagged_mock() {
        let mut rng = StdRng::seed_from_u64(1);
        let vitals = mock_vitals_with_rng(location(), &mut rng);
        assert_eq!(vitals.heart_rate.source, DataSource::Mock);
        assert_eq!(vitals.temperature.source, DataSource::Mock);
        assert_eq!(vitals.blood_oxygen.source, DataSource::Mock);
        assert_eq!(vitals.immune_system.source, DataSource::Mock);
        assert_eq!(vitals.infections.source, DataSource::Mock);
    }

    #[test]
    fn test_mock_values_stay_in_documented_ranges() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let vitals = mock_vitals_with_rng(location(), &mut rng);
            assert!((0.0..=500.0).contains(&vitals.blood_oxygen.value));
            assert!((-1.0..=1.0).contains(&vitals.immune_system.ndvi));
            assert!((0.0..=100.0).contains(&vitals.immune_system.value));
            assert!(vitals.infections.disaster_events < 3);
        }
    }

    #[test]
    fn test_mock_vitals_diagnosable() {
        let mut rng = StdRng::seed_from_u64(7);
        let vitals = mock_vitals_with_rng(location(), &mut rng);
        let result = crate::diagnostics::diagnose(&vitals);
        assert!((0..=100).contains(&result.overall_score));
        assert!(!result.recommendations.is_empty());
        assert!(result.recommendations.len() <= 5);
    }
}

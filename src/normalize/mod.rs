/// Per-source normalizers: each turns one provider's raw JSON into a typed,
/// bounded metric. All functions here are pure and fail open — unusable input
/// yields the documented neutral metric, never an error.
use crate::domain::{
    AirQualityStatus, BloodOxygenMetric, DataSource, InfectionStatus, InfectionsMetric,
    PollutionTrend, Pollutants, TemperatureMetric, TemperatureStatus, ThermalTrend,
};
use crate::utils::{clamp, epoch_ms, num, num_pick};
use serde_json::Value;

const THIRTY_DAYS_MS: i64 = 30 * 24 * 3600 * 1000;

/// PM2.5-keyed AQI via the EPA piecewise-linear breakpoint formula, capped at
/// 500. Continuous at every breakpoint and non-decreasing in PM2.5.
pub fn compute_aqi(pm25: f64) -> f64 {
    let pm25 = pm25.max(0.0);
    if pm25 <= 12.0 {
        (pm25 / 12.0) * 50.0
    } else if pm25 <= 35.4 {
        50.0 + ((pm25 - 12.0) / 23.4) * 50.0
    } else if pm25 <= 55.4 {
        100.0 + ((pm25 - 35.4) / 20.0) * 50.0
    } else if pm25 <= 150.4 {
        150.0 + ((pm25 - 55.4) / 95.0) * 100.0
    } else if pm25 <= 250.4 {
        250.0 + ((pm25 - 150.4) / 100.0) * 100.0
    } else {
        (350.0 + ((pm25 - 250.4) / 149.6) * 150.0).min(500.0)
    }
}

pub fn determine_air_quality_status(aqi: f64) -> AirQualityStatus {
    if aqi <= 50.0 {
        AirQualityStatus::Healthy
    } else if aqi <= 150.0 {
        AirQualityStatus::Unhealthy
    } else {
        AirQualityStatus::Hazardous
    }
}

/// Single-sample heuristic on the mean of the three pollutant averages.
pub fn determine_air_trend(pollutant_mean: f64) -> PollutionTrend {
    if pollutant_mean < 10.0 {
        PollutionTrend::Improving
    } else if pollutant_mean > 30.0 {
        PollutionTrend::Worsening
    } else {
        PollutionTrend::Stable
    }
}

/// Neutral air metric used when the source failed or reported no stations.
/// Zeros, healthy, and stable — deliberately fail open.
pub fn neutral_blood_oxygen() -> BloodOxygenMetric {
    BloodOxygenMetric {
        value: 0.0,
        pollutants: Pollutants::zero(),
        status: AirQualityStatus::Healthy,
        trend: PollutionTrend::Stable,
        description: "No station measurements available".to_string(),
        source: DataSource::Synthetic,
    }
}

/// Normalize a raw station-measurement payload.
///
/// Expected minimal shape: `{"results": [{"parameter": "pm25", "value": 12.3}]}`.
/// Each pollutant is averaged across the stations reporting it; a pollutant
/// nobody reports averages to 0 rather than erroring.
pub fn normalize_air_quality(raw: &Value) -> BloodOxygenMetric {
    let results = match raw.get("results").and_then(|r| r.as_array()) {
        Some(arr) if !arr.is_empty() => arr,
        _ => return neutral_blood_oxygen(),
    };

    let mut sums = [0.0f64; 3];
    let mut counts = [0u32; 3];
    for item in results {
        let parameter = item.get("parameter").and_then(|p| p.as_str());
        let value = item.get("value").and_then(num);
        let (Some(parameter), Some(value)) = (parameter, value) else {
            continue;
        };
        let idx = match parameter {
            "no2" => 0,
            "pm25" => 1,
            "o3" => 2,
            _ => continue,
        };
        sums[idx] += value;
        counts[idx] += 1;
    }

    let avg = |i: usize| {
        if counts[i] == 0 {
            0.0
        } else {
            sums[i] / counts[i] as f64
        }
    };
    let pollutants = Pollutants {
        no2: avg(0),
        pm25: avg(1),
        o3: avg(2),
    };

    build_blood_oxygen(pollutants, results.len(), DataSource::Measured)
}

fn build_blood_oxygen(
    pollutants: Pollutants,
    station_count: usize,
    source: DataSource,
) -> BloodOxygenMetric {
    let aqi = clamp(compute_aqi(pollutants.pm25), 0.0, 500.0);
    let status = determine_air_quality_status(aqi);
    let trend = determine_air_trend(pollutants.mean());
    let description = format!(
        "AQI {:.0} from {} station measurements (PM2.5 {:.1} µg/m³)",
        aqi, station_count, pollutants.pm25
    );
    BloodOxygenMetric {
        value: aqi,
        pollutants,
        status,
        trend,
        description,
        source,
    }
}

pub fn determine_infection_status(event_count: u32) -> InfectionStatus {
    match event_count {
        0 => InfectionStatus::Clean,
        1..=2 => InfectionStatus::Infected,
        _ => InfectionStatus::Critical,
    }
}

/// Neutral seismic metric used when the source failed.
pub fn neutral_infections() -> InfectionsMetric {
    build_infections(0, DataSource::Synthetic)
}

/// Normalize a raw seismic event feed.
///
/// Expected minimal shape: `{"features": [{"properties": {"mag": 4.1,
/// "time": 1700000000000}}]}`. Only events inside the trailing 30-day window
/// (relative to `now_ms`) count; magnitude is not weighted.
pub fn normalize_seismic(raw: &Value, now_ms: i64) -> InfectionsMetric {
    let features = match raw.get("features").and_then(|f| f.as_array()) {
        Some(arr) => arr,
        None => return neutral_infections(),
    };

    let cutoff = now_ms - THIRTY_DAYS_MS;
    let recent = features
        .iter()
        .filter_map(|f| f.get("properties").and_then(|p| p.get("time")))
        .filter_map(epoch_ms)
        .filter(|t| *t >= cutoff && *t <= now_ms)
        .count() as u32;

    build_infections(recent, DataSource::Measured)
}

fn build_infections(disaster_events: u32, source: DataSource) -> InfectionsMetric {
    let status = determine_infection_status(disaster_events);
    let trend = if disaster_events == 0 {
        PollutionTrend::Stable
    } else {
        PollutionTrend::Worsening
    };
    let description = format!(
        "{} seismic events in the last 30 days, 0 pollution hotspots",
        disaster_events
    );
    InfectionsMetric {
        disaster_events,
        // Hotspot detection is a disjoint concern, not wired to this source.
        pollution_hotspots: 0,
        status,
        trend,
        description,
        source,
    }
}

/// Heat-island excess estimated from absolute temperature via a step function.
pub fn heat_island_effect(temp_c: f64) -> f64 {
    if temp_c > 35.0 {
        5.0
    } else if temp_c > 30.0 {
        3.0
    } else if temp_c > 25.0 {
        1.5
    } else if temp_c > 20.0 {
        0.5
    } else {
        0.0
    }
}

/// Strict `>` at both thresholds: 35.0 and 40.0 exactly are one band lower.
pub fn determine_temperature_status(temp_c: f64) -> TemperatureStatus {
    if temp_c > 40.0 {
        TemperatureStatus::Critical
    } else if temp_c > 35.0 {
        TemperatureStatus::Fever
    } else {
        TemperatureStatus::Normal
    }
}

pub fn determine_thermal_trend(temp_c: f64) -> ThermalTrend {
    if temp_c > 30.0 {
        ThermalTrend::Increasing
    } else if temp_c < 15.0 {
        ThermalTrend::Decreasing
    } else {
        ThermalTrend::Stable
    }
}

/// Neutral weather metric used when the source failed: 20 °C sits inside the
/// "else" branch of every step function above.
pub fn neutral_temperature() -> TemperatureMetric {
    build_temperature(20.0, DataSource::Synthetic)
}

/// Normalize a raw current-weather payload. Expected minimal shape:
/// `{"main": {"temp": 23.4}}`.
pub fn normalize_weather(raw: &Value) -> TemperatureMetric {
    let temp = raw
        .get("main")
        .and_then(|m| num_pick(m, &["temp", "temperature"]));
    match temp {
        Some(t) => build_temperature(t, DataSource::Measured),
        None => neutral_temperature(),
    }
}

fn build_temperature(temp_c: f64, source: DataSource) -> TemperatureMetric {
    let heat_island = heat_island_effect(temp_c);
    let status = determine_temperature_status(temp_c);
    let trend = determine_thermal_trend(temp_c);
    let description = format!(
        "{:.1} °C with an estimated heat-island excess of {:.1} °C",
        temp_c, heat_island
    );
    TemperatureMetric {
        value: temp_c,
        heat_island_effect: heat_island,
        status,
        trend,
        description,
        source,
    }
}

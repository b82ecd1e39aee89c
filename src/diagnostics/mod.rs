/// Diagnostic engine: turns one CityVitals snapshot into a weighted overall
/// score, severity band, diagnosis text, and recommendations. Pure and
/// deterministic, no I/O.
///
/// Per-category scoring applies additive adjustments first, then the
/// multiplicative status penalty, then clamps to [0, 100]. That order is
/// load-bearing: reversing it changes results near the boundaries.
use crate::domain::{
    AirQualityStatus, CityVitals, DiagnosticResult, HealthScore, HeartRateStatus, ImmuneStatus,
    InfectionStatus, OverallHealth, OverallStatus, PollutionTrend, Severity, TemperatureStatus,
    ThermalTrend, VegetationTrend,
};
use crate::utils::clamp;

pub const WEIGHT_HEART_RATE: f64 = 0.15;
pub const WEIGHT_TEMPERATURE: f64 = 0.20;
pub const WEIGHT_BLOOD_OXYGEN: f64 = 0.25;
pub const WEIGHT_IMMUNE_SYSTEM: f64 = 0.25;
pub const WEIGHT_INFECTIONS: f64 = 0.15;

fn score_heart_rate(vitals: &CityVitals) -> f64 {
    let m = &vitals.heart_rate;
    let mut score = m.value;
    score += match m.trend {
        ThermalTrend::Increasing => 5.0,
        ThermalTrend::Decreasing => -5.0,
        ThermalTrend::Stable => 0.0,
    };
    score *= match m.status {
        HeartRateStatus::Critical => 0.5,
        HeartRateStatus::Elevated => 0.8,
        HeartRateStatus::Normal => 1.0,
    };
    clamp(score, 0.0, 100.0)
}

fn score_temperature(vitals: &CityVitals) -> f64 {
    let m = &vitals.temperature;
    let mut score = 100.0;
    if m.value > 35.0 {
        score -= 30.0;
    } else if m.value > 30.0 {
        score -= 20.0;
    } else if m.value > 25.0 {
        score -= 10.0;
    }
    if m.heat_island_effect > 5.0 {
        score -= 25.0;
    } else if m.heat_island_effect > 3.0 {
        score -= 15.0;
    } else if m.heat_island_effect > 1.0 {
        score -= 5.0;
    }
    score += match m.trend {
        ThermalTrend::Increasing => -10.0,
        ThermalTrend::Decreasing => 5.0,
        ThermalTrend::Stable => 0.0,
    };
    score *= match m.status {
        TemperatureStatus::Critical => 0.3,
        TemperatureStatus::Fever => 0.6,
        TemperatureStatus::Normal => 1.0,
    };
    clamp(score, 0.0, 100.0)
}

fn score_blood_oxygen(vitals: &CityVitals) -> f64 {
    let m = &vitals.blood_oxygen;
    // Lower AQI is healthier, so the score starts inverted.
    let mut score = 100.0 - m.value;
    let pollutant_mean = m.pollutants.mean();
    if pollutant_mean > 50.0 {
        score -= 30.0;
    } else if pollutant_mean > 30.0 {
        score -= 20.0;
    } else if pollutant_mean > 15.0 {
        score -= 10.0;
    }
    score += match m.trend {
        PollutionTrend::Worsening => -15.0,
        PollutionTrend::Improving => 10.0,
        PollutionTrend::Stable => 0.0,
    };
    score *= match m.status {
        AirQualityStatus::Hazardous => 0.2,
        AirQualityStatus::Unhealthy => 0.5,
        AirQualityStatus::Healthy => 1.0,
    };
    clamp(score, 0.0, 100.0)
}

fn score_immune_system(vitals: &CityVitals) -> f64 {
    let m = &vitals.immune_system;
    let mut score = m.value;
    if m.ndvi > 0.7 {
        score += 20.0;
    } else if m.ndvi > 0.5 {
        score += 10.0;
    }
    if m.ndvi < 0.2 {
        score -= 20.0;
    }
    score += match m.trend {
        VegetationTrend::Improving => 10.0,
        VegetationTrend::Declining => -15.0,
        VegetationTrend::Stable => 0.0,
    };
    score *= match m.status {
        ImmuneStatus::Compromised => 0.4,
        ImmuneStatus::Weak => 0.7,
        ImmuneStatus::Strong => 1.0,
    };
    clamp(score, 0.0, 100.0)
}

fn score_infections(vitals: &CityVitals) -> f64 {
    let m = &vitals.infections;
    let incidents = (m.disaster_events + m.pollution_hotspots) as f64;
    let mut score = 100.0 - 15.0 * incidents;
    score *= match m.status {
        InfectionStatus::Critical => 0.2,
        InfectionStatus::Infected => 0.5,
        InfectionStatus::Clean => 1.0,
    };
    clamp(score, 0.0, 100.0)
}

fn severity_for(score: i64) -> Severity {
    if score >= 75 {
        Severity::Low
    } else if score >= 60 {
        Severity::Medium
    } else if score >= 40 {
        Severity::High
    } else {
        Severity::Critical
    }
}

pub fn overall_status_for(score: i64) -> OverallStatus {
    if score >= 90 {
        OverallStatus::Excellent
    } else if score >= 75 {
        OverallStatus::Good
    } else if score >= 60 {
        OverallStatus::Fair
    } else if score >= 40 {
        OverallStatus::Poor
    } else {
        OverallStatus::Critical
    }
}

fn diagnosis_for(score: i64) -> String {
    let text = if score >= 90 {
        "The city is in excellent health. All vital signs are within optimal ranges."
    } else if score >= 75 {
        "The city is in good health with minor stress indicators worth watching."
    } else if score >= 60 {
        "The city shows moderate strain. Several vital signs are outside their comfortable ranges."
    } else if score >= 40 {
        "The city is under significant stress. Multiple vital signs require intervention."
    } else {
        "The city is in critical condition. Urgent intervention is needed across several systems."
    };
    text.to_string()
}

const MAX_RECOMMENDATIONS: usize = 5;

/// Fixed candidate lists per triggered condition, concatenated in priority
/// order and truncated to five. When nothing triggers, a generic
/// keep-monitoring set of three is returned instead.
fn recommendations_for(vitals: &CityVitals) -> Vec<String> {
    let mut recs: Vec<&str> = Vec::new();

    if vitals.blood_oxygen.status != AirQualityStatus::Healthy {
        recs.push("Limit outdoor exertion while pollutant concentrations stay elevated");
        recs.push("Expand low-emission traffic zones near the worst-reporting stations");
        if vitals.blood_oxygen.status == AirQualityStatus::Hazardous {
            recs.push("Issue a public air quality alert for sensitive groups");
        }
    }

    if vitals.temperature.heat_island_effect > 3.0 {
        recs.push("Increase shaded and reflective surfaces in the hottest districts");
        recs.push("Open cooling centers during peak afternoon hours");
    }

    if vitals.immune_system.status != ImmuneStatus::Strong || vitals.immune_system.value < 30.0 {
        recs.push("Plant street trees along corridors with the lowest canopy cover");
        recs.push("Convert vacant lots into pocket parks to raise green coverage");
    }

    if vitals.infections.disaster_events + vitals.infections.pollution_hotspots > 0 {
        recs.push("Review seismic readiness plans for critical infrastructure");
        recs.push("Audit emergency supply stocks in the affected districts");
    }

    if vitals.heart_rate.status != HeartRateStatus::Normal {
        recs.push("Stagger commute peaks to ease pressure on transit arteries");
    }

    if recs.is_empty() {
        return vec![
            "Keep monitoring all vital signs at the current cadence".to_string(),
            "Maintain existing green space and air quality programs".to_string(),
            "Re-run a full diagnostic after the next data refresh".to_string(),
        ];
    }

    recs.truncate(MAX_RECOMMENDATIONS);
    recs.into_iter().map(str::to_string).collect()
}

fn status_label<S: std::fmt::Debug>(status: S) -> String {
    format!("{:?}", status).to_lowercase()
}

/// Run the full diagnosis for one vitals snapshot.
///
/// The overall score is the weighted sum of the five category scores rounded
/// half-away-from-zero (`f64::round`), so a weighted sum of 74.5 reports 75.
pub fn diagnose(vitals: &CityVitals) -> DiagnosticResult {
    let category_scores = vec![
        HealthScore {
            category: "heart_rate",
            score: score_heart_rate(vitals),
            weight: WEIGHT_HEART_RATE,
            status: status_label(vitals.heart_rate.status),
        },
        HealthScore {
            category: "temperature",
            score: score_temperature(vitals),
            weight: WEIGHT_TEMPERATURE,
            status: status_label(vitals.temperature.status),
        },
        HealthScore {
            category: "blood_oxygen",
            score: score_blood_oxygen(vitals),
            weight: WEIGHT_BLOOD_OXYGEN,
            status: status_label(vitals.blood_oxygen.status),
        },
        HealthScore {
            category: "immune_system",
            score: score_immune_system(vitals),
            weight: WEIGHT_IMMUNE_SYSTEM,
            status: status_label(vitals.immune_system.status),
        },
        HealthScore {
            category: "infections",
            score: score_infections(vitals),
            weight: WEIGHT_INFECTIONS,
            status: status_label(vitals.infections.status),
        },
    ];

    let weighted_sum: f64 = category_scores.iter().map(|c| c.score * c.weight).sum();
    let overall_score = weighted_sum.round() as i64;

    DiagnosticResult {
        overall_score,
        diagnosis: diagnosis_for(overall_score),
        recommendations: recommendations_for(vitals),
        severity: severity_for(overall_score),
        category_scores,
    }
}

/// Copy a diagnostic result into the vitals' overall-health slot, producing
/// the final immutable record handed to callers.
pub fn apply_diagnosis(mut vitals: CityVitals, result: &DiagnosticResult) -> CityVitals {
    vitals.overall_health = OverallHealth {
        score: result.overall_score,
        status: overall_status_for(result.overall_score),
        diagnosis: result.diagnosis.clone(),
        recommendations: result.recommendations.clone(),
    };
    vitals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BloodOxygenMetric, DataSource, HeartRateMetric, ImmuneSystemMetric, InfectionsMetric,
        LocationData, Pollutants, TemperatureMetric,
    };

    fn metric_defaults() -> CityVitals {
        CityVitals {
            location: LocationData {
                lat: 0.0,
                lon: 0.0,
                timestamp: 1_700_000_000_000,
                city: None,
                country: None,
            },
            heart_rate: HeartRateMetric {
                value: 100.0,
                status: HeartRateStatus::Normal,
                trend: ThermalTrend::Stable,
                description: String::new(),
                source: DataSource::Mock,
            },
            temperature: TemperatureMetric {
                value: 20.0,
                heat_island_effect: 0.0,
                status: TemperatureStatus::Normal,
                trend: ThermalTrend::Stable,
                description: String::new(),
                source: DataSource::Mock,
            },
            blood_oxygen: BloodOxygenMetric {
                value: 0.0,
                pollutants: Pollutants::zero(),
                status: AirQualityStatus::Healthy,
                trend: PollutionTrend::Stable,
                description: String::new(),
                source: DataSource::Mock,
            },
            immune_system: ImmuneSystemMetric {
                value: 100.0,
                ndvi: 0.45,
                status: ImmuneStatus::Strong,
                trend: VegetationTrend::Stable,
                description: String::new(),
                source: DataSource::Mock,
            },
            infections: InfectionsMetric {
                disaster_events: 0,
                pollution_hotspots: 0,
                status: InfectionStatus::Clean,
                trend: PollutionTrend::Stable,
                description: String::new(),
                source: DataSource::Mock,
            },
            overall_health: crate::domain::OverallHealth::pending(),
        }
    }

    #[test]
    fn test_all_perfect_categories_score_100() {
        let result = diagnose(&metric_defaults());
        for c in &result.category_scores {
            assert_eq!(c.score, 100.0, "category {} not perfect", c.category);
        }
        assert_eq!(result.overall_score, 100);
        assert_eq!(result.severity, Severity::Low);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total = WEIGHT_HEART_RATE
            + WEIGHT_TEMPERATURE
            + WEIGHT_BLOOD_OXYGEN
            + WEIGHT_IMMUNE_SYSTEM
            + WEIGHT_INFECTIONS;
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_half_sum_rounds_up() {
        // Categories score 80 / 100 / 100 / 70 / 0, weighted sum 74.5.
        let mut vitals = metric_defaults();
        vitals.heart_rate.value = 80.0;
        vitals.immune_system.value = 70.0;
        vitals.infections.disaster_events = 7;
        vitals.infections.status = InfectionStatus::Critical;

        let result = diagnose(&vitals);
        let scores: Vec<f64> = result.category_scores.iter().map(|c| c.score).collect();
        assert_eq!(scores, vec![80.0, 100.0, 100.0, 70.0, 0.0]);
        assert_eq!(result.overall_score, 75);
        assert_eq!(result.severity, Severity::Low);
    }

    #[test]
    fn test_additive_applied_before_multiplicative() {
        // Heart rate 100 with an increasing trend and elevated status must be
        // (100 + 5) * 0.8 = 84, not 100 * 0.8 + 5 = 85.
        let mut vitals = metric_defaults();
        vitals.heart_rate.trend = ThermalTrend::Increasing;
        vitals.heart_rate.status = HeartRateStatus::Elevated;
        let result = diagnose(&vitals);
        assert_eq!(result.category_scores[0].score, 84.0);
    }

    #[test]
    fn test_blood_oxygen_inverts_aqi() {
        let mut vitals = metric_defaults();
        vitals.blood_oxygen.value = 40.0;
        let result = diagnose(&vitals);
        assert_eq!(result.category_scores[2].score, 60.0);
    }

    #[test]
    fn test_blood_oxygen_floor_at_zero() {
        let mut vitals = metric_defaults();
        vitals.blood_oxygen.value = 300.0;
        vitals.blood_oxygen.status = AirQualityStatus::Hazardous;
        vitals.blood_oxygen.trend = PollutionTrend::Worsening;
        let result = diagnose(&vitals);
        assert_eq!(result.category_scores[2].score, 0.0);
    }

    #[test]
    fn test_infection_penalty_per_incident() {
        let mut vitals = metric_defaults();
        vitals.infections.disaster_events = 1;
        vitals.infections.pollution_hotspots = 1;
        vitals.infections.status = InfectionStatus::Infected;
        let result = diagnose(&vitals);
        // (100 - 15 * 2) * 0.5
        assert_eq!(result.category_scores[4].score, 35.0);
    }

    #[test]
    fn test_severity_bands() {
        assert_eq!(severity_for(75), Severity::Low);
        assert_eq!(severity_for(74), Severity::Medium);
        assert_eq!(severity_for(60), Severity::Medium);
        assert_eq!(severity_for(59), Severity::High);
        assert_eq!(severity_for(40), Severity::High);
        assert_eq!(severity_for(39), Severity::Critical);
    }

    #[test]
    fn test_overall_status_bands() {
        assert_eq!(overall_status_for(90), OverallStatus::Excellent);
        assert_eq!(overall_status_for(89), OverallStatus::Good);
        assert_eq!(overall_status_for(60), OverallStatus::Fair);
        assert_eq!(overall_status_for(40), OverallStatus::Poor);
        assert_eq!(overall_status_for(39), OverallStatus::Critical);
    }

    #[test]
    fn test_generic_fallback_is_exactly_three() {
        let result = diagnose(&metric_defaults());
        assert_eq!(result.recommendations.len(), 3);
        assert_eq!(
            result.recommendations[0],
            "Keep monitoring all vital signs at the current cadence"
        );
    }

    #[test]
    fn test_recommendations_truncated_at_five_in_priority_order() {
        let mut vitals = metric_defaults();
        vitals.blood_oxygen.status = AirQualityStatus::Hazardous;
        vitals.temperature.heat_island_effect = 5.0;
        vitals.immune_system.status = ImmuneStatus::Weak;
        vitals.infections.disaster_events = 2;
        vitals.infections.status = InfectionStatus::Infected;
        vitals.heart_rate.status = HeartRateStatus::Elevated;

        let result = diagnose(&vitals);
        assert_eq!(result.recommendations.len(), 5);
        // Air quality candidates outrank heat-island ones.
        assert!(result.recommendations[0].starts_with("Limit outdoor exertion"));
        assert!(result.recommendations[3].starts_with("Increase shaded"));
    }

    #[test]
    fn test_recommendations_never_empty() {
        let mut vitals = metric_defaults();
        vitals.temperature.heat_island_effect = 3.5;
        let result = diagnose(&vitals);
        assert!(!result.recommendations.is_empty());
        assert!(result.recommendations.len() <= 5);
    }

    #[test]
    fn test_diagnose_is_idempotent() {
        let mut vitals = metric_defaults();
        vitals.blood_oxygen.value = 120.0;
        vitals.blood_oxygen.status = AirQualityStatus::Unhealthy;
        vitals.infections.disaster_events = 1;
        vitals.infections.status = InfectionStatus::Infected;

        let a = serde_json::to_string(&diagnose(&vitals)).unwrap();
        let b = serde_json::to_string(&diagnose(&vitals)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_apply_diagnosis_fills_overall_health() {
        let vitals = metric_defaults();
        let result = diagnose(&vitals);
        let finished = apply_diagnosis(vitals, &result);
        assert_eq!(finished.overall_health.score, 100);
        assert_eq!(finished.overall_health.status, OverallStatus::Excellent);
        assert!(!finished.overall_health.diagnosis.is_empty());
        assert_eq!(finished.overall_health.recommendations.len(), 3);
    }
}

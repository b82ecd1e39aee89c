/// HTTP request handlers
use crate::diagnostics::{apply_diagnosis, diagnose};
use crate::domain::{Health, LocationData};
use crate::errors::ApiError;
use crate::mock::mock_vitals;
use crate::services::{VitalsReport, VitalsService};
use crate::validate::validate_location;
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub vitals_service: Arc<VitalsService>,
}

/// Successful response wrapper
#[derive(Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

#[derive(Deserialize)]
pub struct VitalsQuery {
    pub lat: f64,
    pub lon: f64,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl VitalsQuery {
    fn into_location(self) -> Result<LocationData, ApiError> {
        let mut location = LocationData::new(self.lat, self.lon);
        location.city = self.city;
        location.country = self.country;

        let report = validate_location(&location, location.timestamp);
        if !report.is_valid {
            return Err(ApiError::InvalidInput(report.errors.join("; ")));
        }
        Ok(location)
    }
}

#[derive(Deserialize)]
pub struct SurveyRequest {
    pub locations: Vec<VitalsQuery>,
}

#[derive(Serialize)]
pub struct SurveyResponse {
    pub queried: usize,
    pub reports: Vec<VitalsReport>,
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Run the full vitals pipeline for one location
pub async fn get_vitals(
    Query(query): Query<VitalsQuery>,
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<VitalsReport>>, ApiError> {
    let location = query.into_location()?;
    let report = state.vitals_service.query(location).await?;
    Ok(Json(SuccessResponse::new(report)))
}

/// Produce a mock vitals record for a location, no upstream calls
pub async fn get_mock_vitals(
    Query(query): Query<VitalsQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let location = query.into_location()?;
    let vitals = mock_vitals(location);
    let diagnostic = diagnose(&vitals);
    let vitals = apply_diagnosis(vitals, &diagnostic);

    Ok(Json(serde_json::json!(SuccessResponse::new(
        serde_json::json!({
            "vitals": vitals,
            "diagnostic": diagnostic,
        })
    ))))
}

/// Query several locations in sequence with a pacing delay
pub async fn survey(
    State(state): State<AppState>,
    Json(request): Json<SurveyRequest>,
) -> Result<Json<SuccessResponse<SurveyResponse>>, ApiError> {
    if request.locations.is_empty() {
        return Err(ApiError::InvalidInput("no locations provided".to_string()));
    }

    let mut locations = Vec::with_capacity(request.locations.len());
    for query in request.locations {
        locations.push(query.into_location()?);
    }

    let queried = locations.len();
    let reports = state.vitals_service.survey(locations).await;

    Ok(Json(SuccessResponse::new(SurveyResponse {
        queried,
        reports,
    })))
}

//! Reference data handlers

use axum::{extract::State, Json};

use domain_crew::{CountryDto, LicenseSummary, MemberTypeSummary};

use crate::{error::ApiError, AppState};

pub async fn list_licenses(
    State(state): State<AppState>,
) -> Result<Json<Vec<LicenseSummary>>, ApiError> {
    Ok(Json(state.reference_service.list_licenses().await?))
}

pub async fn list_member_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<MemberTypeSummary>>, ApiError> {
    Ok(Json(state.reference_service.list_member_types().await?))
}

/// Every ISO-3166 country, sorted by alpha-3 code
pub async fn list_countries(State(state): State<AppState>) -> Json<Vec<CountryDto>> {
    Json(state.reference_service.list_countries())
}

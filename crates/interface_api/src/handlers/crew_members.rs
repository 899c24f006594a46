//! Crew member handlers

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use core_kernel::CrewMemberId;
use domain_crew::{
    CreateCrewMemberRequest, CrewMemberPage, CrewMemberResponse, UpdateCrewMemberRequest,
};

use crate::dto::{CreatedResponse, ListCrewMembersQuery, RenewLicenseQuery};
use crate::{error::ApiError, AppState};

/// Creates a crew member
pub async fn create_crew_member(
    State(state): State<AppState>,
    body: Result<Json<CreateCrewMemberRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(request) = body?;

    let id = state.crew_service.create(request).await?;
    info!(crew_member_id = %id, "Crew member created");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Lists crew members, optionally one page at a time
pub async fn list_crew_members(
    State(state): State<AppState>,
    Query(query): Query<ListCrewMembersQuery>,
) -> Result<Json<CrewMemberPage>, ApiError> {
    let page = state.crew_service.get_all(query.page_request()).await?;
    Ok(Json(page))
}

/// Gets a crew member by ID
pub async fn get_crew_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CrewMemberResponse>, ApiError> {
    let member = state.crew_service.get_by_id(CrewMemberId::from(id)).await?;
    Ok(Json(member))
}

/// Updates the editable fields of a crew member
pub async fn update_crew_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<UpdateCrewMemberRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = body?;

    state.crew_service.update(CrewMemberId::from(id), request).await?;
    Ok(StatusCode::OK)
}

/// Deletes a crew member
///
/// Answers 201 on success, matching the status existing clients expect.
pub async fn delete_crew_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let id = CrewMemberId::from(id);
    state.crew_service.delete(id).await?;
    info!(crew_member_id = %id, "Crew member deleted");
    Ok(StatusCode::CREATED)
}

/// Records a new certification date and refreshes the status
pub async fn renew_license(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<RenewLicenseQuery>,
) -> Result<StatusCode, ApiError> {
    let date = query
        .certification_date()
        .ok_or_else(|| ApiError::BadRequest("Invalid date.".to_string()))?;

    state
        .crew_service
        .renew_license(CrewMemberId::from(id), date)
        .await?;
    Ok(StatusCode::OK)
}

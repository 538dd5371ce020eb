use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::services::activity_participant_service::{
    self, NewParticipantRequest, UpdateParticipantRequest,
};
use crate::web::error::ApiError;
use crate::web::AppState;

pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewParticipantRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let created = activity_participant_service::create_participant(&state.pool, req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_all_handler(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(activity_participant_service::list_all(&state.pool).await?))
}

pub async fn read_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(found) = activity_participant_service::read_participant(&state.pool, &id).await?
    else {
        return Err(ApiError::not_found());
    };
    Ok(Json(found))
}

pub async fn list_handler(
    State(state): State<AppState>,
    Path(scheduled_activity_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if state.scheduling.read(&scheduled_activity_id).await?.is_none() {
        return Err(ApiError::not_found());
    }
    let participants =
        activity_participant_service::list_participants(&state.pool, &scheduled_activity_id)
            .await?;
    Ok(Json(participants))
}

pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateParticipantRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let Some(updated) =
        activity_participant_service::update_invite_status(&state.pool, &id, req).await?
    else {
        return Err(ApiError::not_found());
    };
    Ok(Json(updated))
}

pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !activity_participant_service::delete_participant(&state.pool, &id).await? {
        return Err(ApiError::not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::services::scheduled_activity_service::{
    CreateMultipleRequest, DeclineRepeatedActivityRequest, NewScheduledActivityRequest,
    RepeatScheduledActivityRequest, UpdateScheduledActivityRequest,
};
use crate::web::error::ApiError;
use crate::web::AppState;

pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewScheduledActivityRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let created = state.scheduling.create(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn create_multiple_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateMultipleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let created = state.scheduling.create_multiple(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn create_recurring_handler(
    State(state): State<AppState>,
    payload: Result<Json<RepeatScheduledActivityRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let created = state.scheduling.create_recurring_series(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn decline_series_handler(
    State(state): State<AppState>,
    payload: Result<Json<DeclineRepeatedActivityRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(req) = payload?;
    state.scheduling.decline_series(req).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_handler(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.scheduling.read_all().await?))
}

pub async fn list_active_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.scheduling.list_by_active(true).await?))
}

pub async fn list_inactive_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.scheduling.list_by_active(false).await?))
}

pub async fn read_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(found) = state.scheduling.read(&id).await? else {
        return Err(ApiError::not_found());
    };
    Ok(Json(found))
}

pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateScheduledActivityRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let Some(updated) = state.scheduling.update(&id, req).await? else {
        return Err(ApiError::not_found());
    };
    Ok(Json(updated))
}

pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.scheduling.delete(&id).await? {
        return Err(ApiError::not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

pub mod activity_participants;
pub mod scheduled_activities;

use axum::{
    routing::{get, post},
    Router,
};

use crate::web::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/scheduled_activity",
            get(scheduled_activities::list_handler).post(scheduled_activities::create_handler),
        )
        .route(
            "/scheduled_activity/active",
            get(scheduled_activities::list_active_handler),
        )
        .route(
            "/scheduled_activity/inactive",
            get(scheduled_activities::list_inactive_handler),
        )
        .route(
            "/scheduled_activity/repeat",
            post(scheduled_activities::create_recurring_handler),
        )
        .route(
            "/scheduled_activity/repeat/decline",
            post(scheduled_activities::decline_series_handler),
        )
        .route(
            "/scheduled_activities",
            post(scheduled_activities::create_multiple_handler),
        )
        .route(
            "/scheduled_activities/:id",
            get(scheduled_activities::read_handler)
                .put(scheduled_activities::update_handler)
                .delete(scheduled_activities::delete_handler),
        )
        .route(
            "/scheduled_activities/:id/participants",
            get(activity_participants::list_handler),
        )
        .route(
            "/activity_participant",
            post(activity_participants::create_handler),
        )
        .route(
            "/activity_participants",
            get(activity_participants::list_all_handler),
        )
        .route(
            "/activity_participant/:id",
            get(activity_participants::read_handler)
                .put(activity_participants::update_handler)
                .delete(activity_participants::delete_handler),
        )
}

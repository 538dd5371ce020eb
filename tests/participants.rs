mod common;

use common::*;
use friendsocial::models::InviteStatus;
use friendsocial::services::activity_participant_service::{
    self as participants, NewParticipantRequest, UpdateParticipantRequest,
};
use friendsocial::services::scheduled_activity_service::NewScheduledActivityRequest;
use friendsocial::SchedulingError;

async fn seeded_occurrence(pool: &sqlx::SqlitePool) -> String {
    insert_activity(pool, "a1", 60).await;
    service_at(pool, utc(2024, 6, 1, 0, 0))
        .create(NewScheduledActivityRequest {
            activity_id: "a1".to_string(),
            scheduled_at: utc(2024, 6, 10, 14, 0),
            is_active: true,
        })
        .await
        .unwrap()
        .id
}

fn join(user_id: &str, scheduled_activity_id: &str) -> NewParticipantRequest {
    NewParticipantRequest {
        user_id: user_id.to_string(),
        scheduled_activity_id: scheduled_activity_id.to_string(),
        invite_status: InviteStatus::default(),
    }
}

#[tokio::test]
async fn participant_lifecycle() {
    let pool = setup_pool().await;
    let occurrence = seeded_occurrence(&pool).await;

    let created = participants::create_participant(&pool, join("u1", &occurrence))
        .await
        .unwrap();
    assert_eq!(created.invite_status, InviteStatus::Pending);

    let updated = participants::update_invite_status(
        &pool,
        &created.id,
        UpdateParticipantRequest {
            invite_status: InviteStatus::Accepted,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.invite_status, InviteStatus::Accepted);

    let listed = participants::list_participants(&pool, &occurrence).await.unwrap();
    assert_eq!(listed, vec![updated]);

    assert!(participants::delete_participant(&pool, &created.id).await.unwrap());
    assert!(!participants::delete_participant(&pool, &created.id).await.unwrap());
    assert!(participants::list_participants(&pool, &occurrence)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn duplicate_participation_is_rejected() {
    let pool = setup_pool().await;
    let occurrence = seeded_occurrence(&pool).await;

    participants::create_participant(&pool, join("u1", &occurrence))
        .await
        .unwrap();
    let err = participants::create_participant(&pool, join("u1", &occurrence))
        .await
        .unwrap_err();

    assert!(matches!(err, SchedulingError::Validation(_)), "{err}");
    assert_eq!(count_participations(&pool, "u1").await, 1);
}

#[tokio::test]
async fn participation_needs_user_and_occurrence() {
    let pool = setup_pool().await;
    let occurrence = seeded_occurrence(&pool).await;

    let err = participants::create_participant(&pool, join("  ", &occurrence))
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulingError::Validation(_)));

    let err = participants::create_participant(&pool, join("u1", "missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulingError::NotFound(_)));

    assert_eq!(count(&pool, "activity_participants").await, 0);
}

#[tokio::test]
async fn updating_unknown_participant_is_none() {
    let pool = setup_pool().await;

    let res = participants::update_invite_status(
        &pool,
        "missing",
        UpdateParticipantRequest {
            invite_status: InviteStatus::Rejected,
        },
    )
    .await
    .unwrap();
    assert!(res.is_none());
}

#[tokio::test]
async fn participant_can_be_read_back_by_id() {
    let pool = setup_pool().await;
    let occurrence = seeded_occurrence(&pool).await;

    let first = participants::create_participant(&pool, join("u1", &occurrence))
        .await
        .unwrap();
    let second = participants::create_participant(&pool, join("u2", &occurrence))
        .await
        .unwrap();

    let found = participants::read_participant(&pool, &second.id).await.unwrap();
    assert_eq!(found, Some(second.clone()));

    let all = participants::list_all(&pool).await.unwrap();
    assert_eq!(all, vec![first, second]);
}

#[tokio::test]
async fn reading_unknown_participant_is_none() {
    let pool = setup_pool().await;

    assert!(participants::read_participant(&pool, "missing")
        .await
        .unwrap()
        .is_none());
    assert!(participants::list_all(&pool).await.unwrap().is_empty());
}

use chrono::{Duration, Utc};

use crate::server::{
    error::AppError,
    model::{
        event::{Event, SaveEventParams},
        user::User,
    },
    service::event::EventService,
};
use test_utils::{
    builder::TestBuilder,
    factory::{self, event::EventFactory, helpers::create_community_with_members},
};

fn params(max_participants: Option<i32>) -> SaveEventParams {
    SaveEventParams {
        title: "Game night".to_string(),
        description: "Bring snacks".to_string(),
        location: Some("Cafe Ludo".to_string()),
        starts_at: Utc::now() + Duration::days(3),
        max_participants,
    }
}

/// Tests creating an event.
///
/// Verifies that the organizer is registered as the first participant.
///
/// Expected: Ok with one participant, joined by the organizer
#[tokio::test]
async fn create_registers_organizer() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, member, community) = create_community_with_members(db).await?;

    let summary = EventService::new(db)
        .create(community.id, member.id, params(Some(4)), Utc::now())
        .await?;

    assert_eq!(summary.event.organizer_id, member.id);
    assert_eq!(summary.participant_count, 1);
    assert!(summary.joined);

    Ok(())
}

/// Tests joining an event that is full or already joined.
///
/// Expected: Conflict for a second registration, BadRequest once the limit is reached
#[tokio::test]
async fn join_checks_duplicates_and_capacity() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, member, community) = create_community_with_members(db).await?;
    let late = factory::create_user(db).await?;
    factory::add_member(db, community.id, late.id, "member").await?;
    let event = EventFactory::new(db, community.id, admin.id)
        .max_participants(Some(1))
        .build()
        .await?;
    let event = Event::from_entity(event);
    let service = EventService::new(db);

    let summary = service.join(&event, member.id, Utc::now()).await?;
    assert_eq!(summary.participant_count, 1);

    let result = service.join(&event, member.id, Utc::now()).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let result = service.join(&event, late.id, Utc::now()).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

#[tokio::test]
async fn join_started_event_fails() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, member, community) = create_community_with_members(db).await?;
    let event = EventFactory::new(db, community.id, admin.id)
        .starts_at(Utc::now() - Duration::hours(1))
        .build()
        .await?;

    let result = EventService::new(db)
        .join(&Event::from_entity(event), member.id, Utc::now())
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests updating an event as a plain member who did not organize it.
///
/// Expected: Err(AppError::Forbidden)
#[tokio::test]
async fn update_requires_organizer_or_group_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, member, community) = create_community_with_members(db).await?;
    let event = EventFactory::new(db, community.id, admin.id).build().await?;
    let event = Event::from_entity(event);
    let service = EventService::new(db);

    let result = service
        .update(&event, &User::from_entity(member), params(None), Utc::now())
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    let summary = service
        .update(&event, &User::from_entity(admin), params(None), Utc::now())
        .await?;
    assert_eq!(summary.event.title, "Game night");

    Ok(())
}

#[tokio::test]
async fn leave_without_registration_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, member, community) = create_community_with_members(db).await?;
    let event = EventFactory::new(db, community.id, admin.id).build().await?;

    let result = EventService::new(db)
        .leave(&Event::from_entity(event), member.id)
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

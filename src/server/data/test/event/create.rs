use super::*;

/// Tests creating an event.
///
/// Verifies that the organizer is registered as the first participant.
///
/// Expected: Ok with one participant who is the organizer
#[tokio::test]
async fn registers_organizer() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, _, community) = factory::helpers::create_community_with_members(db).await?;

    let repo = EventRepository::new(db);
    let event = repo
        .create(
            community.id,
            admin.id,
            SaveEventParams {
                title: "Gloomhaven campaign".to_string(),
                description: "Session 12".to_string(),
                location: Some("Café Spielwiese".to_string()),
                starts_at: Utc::now() + Duration::days(3),
                max_participants: Some(4),
            },
        )
        .await?;

    assert_eq!(event.organizer_id, admin.id);
    assert_eq!(repo.participant_count(event.id).await?, 1);

    let summary = repo.get_summary(event.id, admin.id).await?.unwrap();
    assert!(summary.joined);
    assert!(!summary.is_full());

    Ok(())
}

/// Tests deleting an event with participants.
///
/// Expected: Ok and neither the event nor its participants remain
#[tokio::test]
async fn delete_removes_participants() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, member, community) = factory::helpers::create_community_with_members(db).await?;
    let event = factory::event::EventFactory::new(db, community.id, admin.id)
        .build()
        .await?;
    factory::event::add_participant(db, event.id, member.id).await?;

    let repo = EventRepository::new(db);
    repo.delete(event.id).await?;

    assert!(repo.find_by_id(event.id).await?.is_none());
    assert_eq!(repo.participant_count(event.id).await?, 0);

    Ok(())
}

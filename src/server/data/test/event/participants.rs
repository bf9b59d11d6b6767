use super::*;

/// Tests joining and leaving an event.
///
/// Expected: counts follow the joins, leaving twice reports false
#[tokio::test]
async fn add_and_remove_participant() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, member, community) = factory::helpers::create_community_with_members(db).await?;
    let event = factory::event::EventFactory::new(db, community.id, admin.id)
        .max_participants(Some(1))
        .build()
        .await?;

    let repo = EventRepository::new(db);
    repo.add_participant(event.id, member.id).await?;

    let summary = repo.get_summary(event.id, admin.id).await?.unwrap();
    assert_eq!(summary.participant_count, 1);
    assert!(!summary.joined);
    assert!(summary.is_full());

    assert!(repo.remove_participant(event.id, member.id).await?);
    assert!(!repo.remove_participant(event.id, member.id).await?);

    Ok(())
}

/// Tests joining the same event twice.
///
/// Expected: Err from the unique (event_id, user_id) index
#[tokio::test]
async fn rejects_duplicate_participant() -> Result<(), DbErr> {
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

    let repo = EventRepository::new(db);
    repo.add_participant(event.id, member.id).await?;

    assert!(repo.add_participant(event.id, member.id).await.is_err());

    Ok(())
}

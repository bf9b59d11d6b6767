use super::*;

/// Tests the group's upcoming events.
///
/// Verifies that past events are excluded and that the rest is ordered by start time.
///
/// Expected: Ok with [soon, later]
#[tokio::test]
async fn excludes_past_and_orders_by_start() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, _, community) = factory::helpers::create_community_with_members(db).await?;
    let now = Utc::now();

    let later = factory::event::EventFactory::new(db, community.id, admin.id)
        .starts_at(now + Duration::days(10))
        .build()
        .await?;
    factory::event::EventFactory::new(db, community.id, admin.id)
        .starts_at(now - Duration::days(1))
        .build()
        .await?;
    let soon = factory::event::EventFactory::new(db, community.id, admin.id)
        .starts_at(now + Duration::hours(2))
        .build()
        .await?;

    let events = EventRepository::new(db)
        .get_upcoming_by_community(community.id, admin.id, now)
        .await?;
    let ids: Vec<i32> = events.iter().map(|e| e.event.id).collect();

    assert_eq!(ids, vec![soon.id, later.id]);

    Ok(())
}

/// Tests the user's own upcoming events.
///
/// Expected: Ok with only the event the user joined, marked as joined
#[tokio::test]
async fn for_user_lists_joined_events_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, member, community) = factory::helpers::create_community_with_members(db).await?;
    let joined = factory::event::EventFactory::new(db, community.id, admin.id)
        .build()
        .await?;
    factory::event::EventFactory::new(db, community.id, admin.id)
        .build()
        .await?;
    factory::event::add_participant(db, joined.id, member.id).await?;

    let events = EventRepository::new(db)
        .get_upcoming_for_user(member.id, Utc::now())
        .await?;

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.id, joined.id);
    assert!(events[0].joined);

    Ok(())
}

use super::*;

/// Tests closing polls past their deadline.
///
/// Verifies that only open polls whose `closes_at` has passed are closed, and that their
/// ids are returned with their group ids.
///
/// Expected: Ok with the expired poll closed and the others untouched
#[tokio::test]
async fn closes_only_expired_open_polls() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, _, community) = factory::helpers::create_community_with_members(db).await?;
    let now = Utc::now();

    let (expired, _) = factory::poll::PollFactory::new(db, community.id, admin.id)
        .closes_at(Some(now - Duration::minutes(5)))
        .build()
        .await?;
    let (future, _) = factory::poll::PollFactory::new(db, community.id, admin.id)
        .closes_at(Some(now + Duration::hours(1)))
        .build()
        .await?;
    let (already_closed, _) = factory::poll::PollFactory::new(db, community.id, admin.id)
        .closes_at(Some(now - Duration::hours(1)))
        .closed(true)
        .build()
        .await?;
    let (open_ended, _) = factory::poll::create_poll(db, community.id, admin.id).await?;

    let repo = PollRepository::new(db);
    let closed = repo.close_expired(now).await?;

    assert_eq!(closed, vec![(expired.id, community.id)]);
    assert!(repo.find_by_id(expired.id).await?.unwrap().closed);
    assert!(!repo.find_by_id(future.id).await?.unwrap().closed);
    assert!(repo.find_by_id(already_closed.id).await?.unwrap().closed);
    assert!(!repo.find_by_id(open_ended.id).await?.unwrap().closed);

    Ok(())
}

/// Tests deleting a poll with votes.
///
/// Expected: Ok and the poll no longer found
#[tokio::test]
async fn delete_removes_poll_with_votes() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, _, community) = factory::helpers::create_community_with_members(db).await?;
    let (poll, options) = factory::poll::create_poll(db, community.id, admin.id).await?;

    let repo = PollRepository::new(db);
    repo.vote(poll.id, options[0].id, admin.id).await?;
    repo.delete(poll.id).await?;

    assert!(repo.find_by_id(poll.id).await?.is_none());
    assert!(repo.find_vote(poll.id, admin.id).await?.is_none());

    Ok(())
}

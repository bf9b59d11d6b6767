use super::*;

/// Tests deleting a group with content.
///
/// Verifies that members, join requests, polls with votes and events with participants
/// are removed along with the group.
///
/// Expected: Ok(true) and every child table empty
#[tokio::test]
async fn deletes_group_and_children() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, member, community) =
        factory::helpers::create_community_with_members(db).await?;
    let outsider = factory::create_user(db).await?;
    factory::join_request::create_pending_request(db, community.id, outsider.id).await?;

    let (poll, options) = factory::poll::create_poll(db, community.id, admin.id).await?;
    crate::server::data::poll::PollRepository::new(db)
        .vote(poll.id, options[0].id, member.id)
        .await?;

    let event = factory::event::EventFactory::new(db, community.id, admin.id)
        .build()
        .await?;
    factory::event::add_participant(db, event.id, member.id).await?;

    let deleted = CommunityRepository::new(db).delete(community.id).await?;

    assert!(deleted);
    assert_eq!(entity::prelude::Community::find().count(db).await?, 0);
    assert_eq!(entity::prelude::CommunityMember::find().count(db).await?, 0);
    assert_eq!(entity::prelude::JoinRequest::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Poll::find().count(db).await?, 0);
    assert_eq!(entity::prelude::PollOption::find().count(db).await?, 0);
    assert_eq!(entity::prelude::PollVote::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Event::find().count(db).await?, 0);
    assert_eq!(entity::prelude::EventParticipant::find().count(db).await?, 0);

    Ok(())
}

/// Tests deleting a group that does not exist.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_missing_group() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(!CommunityRepository::new(db).delete(3).await?);

    Ok(())
}

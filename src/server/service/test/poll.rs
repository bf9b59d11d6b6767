use chrono::{Duration, Utc};

use crate::server::{
    error::AppError,
    model::{
        poll::{CreatePollParams, Poll},
        user::User,
    },
    service::poll::PollService,
};
use test_utils::{
    builder::TestBuilder,
    factory::{self, helpers::create_community_with_members, poll::PollFactory},
};

/// Tests creating a poll.
///
/// Verifies that options keep their order and start without votes.
///
/// Expected: Ok with two options and zero total votes
#[tokio::test]
async fn create_returns_empty_results() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, member, community) = create_community_with_members(db).await?;

    let results = PollService::new(db)
        .create(
            CreatePollParams {
                community_id: community.id,
                creator_id: member.id,
                question: "Next game?".to_string(),
                options: vec!["Azul".to_string(), "Wingspan".to_string()],
                closes_at: None,
            },
            Utc::now(),
        )
        .await?;

    let labels: Vec<&str> = results.options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["Azul", "Wingspan"]);
    assert_eq!(results.total_votes(), 0);
    assert_eq!(results.my_vote, None);

    Ok(())
}

/// Tests voting twice on the same poll.
///
/// Expected: first vote counted, second Err(AppError::Conflict)
#[tokio::test]
async fn second_vote_conflicts() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, member, community) = create_community_with_members(db).await?;
    let (poll, options) = factory::poll::create_poll(db, community.id, admin.id).await?;
    let poll = Poll::from_entity(poll);
    let service = PollService::new(db);

    let results = service
        .vote(&poll, options[0].id, member.id, Utc::now())
        .await?;
    assert_eq!(results.options[0].votes, 1);
    assert_eq!(results.my_vote, Some(options[0].id));

    let result = service
        .vote(&poll, options[1].id, member.id, Utc::now())
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests voting on a poll whose deadline has passed and with a foreign option.
///
/// Expected: Err(AppError::BadRequest) in both cases
#[tokio::test]
async fn vote_rejects_closed_poll_and_foreign_option() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, member, community) = create_community_with_members(db).await?;
    let (expired, expired_options) = PollFactory::new(db, community.id, admin.id)
        .closes_at(Some(Utc::now() - Duration::minutes(5)))
        .build()
        .await?;
    let (open, _) = factory::poll::create_poll(db, community.id, admin.id).await?;
    let service = PollService::new(db);

    let result = service
        .vote(
            &Poll::from_entity(expired),
            expired_options[0].id,
            member.id,
            Utc::now(),
        )
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = service
        .vote(
            &Poll::from_entity(open),
            expired_options[0].id,
            member.id,
            Utc::now(),
        )
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests who may close a poll.
///
/// Verifies that a plain member who did not create the poll is refused while the group
/// admin may close it.
///
/// Expected: Forbidden for the member, closed results for the admin
#[tokio::test]
async fn close_requires_creator_or_group_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, member, community) = create_community_with_members(db).await?;
    let creator = factory::create_user(db).await?;
    factory::add_member(db, community.id, creator.id, "member").await?;
    let (poll, _) = factory::poll::create_poll(db, community.id, creator.id).await?;
    let poll = Poll::from_entity(poll);
    let service = PollService::new(db);

    let result = service
        .close(&poll, &User::from_entity(member))
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    let results = service.close(&poll, &User::from_entity(admin)).await?;
    assert!(results.poll.closed);

    Ok(())
}

#[tokio::test]
async fn close_expired_reports_closed_polls() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, _, community) = create_community_with_members(db).await?;
    let (expired, _) = PollFactory::new(db, community.id, admin.id)
        .closes_at(Some(Utc::now() - Duration::seconds(1)))
        .build()
        .await?;

    let service = PollService::new(db);
    assert_eq!(
        service.close_expired(Utc::now()).await?,
        vec![(expired.id, community.id)]
    );
    assert!(service.close_expired(Utc::now()).await?.is_empty());

    Ok(())
}

use super::*;

/// Tests vote counting.
///
/// Verifies per-option counts, the total and the viewer's own vote.
///
/// Expected: Ok with counts [2, 0] and the viewer's option
#[tokio::test]
async fn counts_votes_per_option() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, member, community) = factory::helpers::create_community_with_members(db).await?;
    let (poll, options) = factory::poll::create_poll(db, community.id, admin.id).await?;

    let repo = PollRepository::new(db);
    repo.vote(poll.id, options[0].id, admin.id).await?;
    repo.vote(poll.id, options[0].id, member.id).await?;

    let results = repo.get_results(poll.id, member.id).await?.unwrap();
    let counts: Vec<u64> = results.options.iter().map(|o| o.votes).collect();

    assert_eq!(counts, vec![2, 0]);
    assert_eq!(results.total_votes(), 2);
    assert_eq!(results.my_vote, Some(options[0].id));
    assert_eq!(repo.find_vote(poll.id, admin.id).await?, Some(options[0].id));

    Ok(())
}

/// Tests voting twice in the same poll.
///
/// Expected: Err from the unique (poll_id, user_id) index
#[tokio::test]
async fn rejects_second_vote() -> Result<(), DbErr> {
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
    let result = repo.vote(poll.id, options[1].id, admin.id).await;

    assert!(result.is_err());

    Ok(())
}

/// Tests option ownership checks.
///
/// Expected: true for the poll's option, false for another poll's option
#[tokio::test]
async fn option_belongs_to_its_poll_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, _, community) = factory::helpers::create_community_with_members(db).await?;
    let (first, first_options) = factory::poll::create_poll(db, community.id, admin.id).await?;
    let (_, second_options) = factory::poll::create_poll(db, community.id, admin.id).await?;

    let repo = PollRepository::new(db);

    assert!(repo.option_belongs_to(first.id, first_options[1].id).await?);
    assert!(!repo.option_belongs_to(first.id, second_options[0].id).await?);

    Ok(())
}

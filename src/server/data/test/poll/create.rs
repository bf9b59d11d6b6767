use super::*;

/// Tests creating a poll with options.
///
/// Verifies that options are stored in the submitted order and start with zero votes.
///
/// Expected: Ok with three options in order, no votes and no viewer vote
#[tokio::test]
async fn stores_options_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, _, community) = factory::helpers::create_community_with_members(db).await?;

    let repo = PollRepository::new(db);
    let poll = repo
        .create(CreatePollParams {
            community_id: community.id,
            creator_id: admin.id,
            question: "Next game?".to_string(),
            options: vec!["Azul".to_string(), "Brass".to_string(), "Root".to_string()],
            closes_at: None,
        })
        .await?;

    let results = repo.get_results(poll.id, admin.id).await?.unwrap();
    let labels: Vec<&str> = results.options.iter().map(|o| o.label.as_str()).collect();

    assert_eq!(labels, vec!["Azul", "Brass", "Root"]);
    assert_eq!(results.total_votes(), 0);
    assert!(results.my_vote.is_none());
    assert!(!results.poll.closed);

    Ok(())
}

/// Tests listing a group's polls.
///
/// Expected: Ok with only the polls of the requested group
#[tokio::test]
async fn lists_polls_of_community() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, _, community) = factory::helpers::create_community_with_members(db).await?;
    let other = factory::create_community(db, admin.id).await?;

    factory::poll::create_poll(db, community.id, admin.id).await?;
    factory::poll::create_poll(db, community.id, admin.id).await?;
    factory::poll::create_poll(db, other.id, admin.id).await?;

    let polls = PollRepository::new(db)
        .get_results_by_community(community.id, admin.id)
        .await?;

    assert_eq!(polls.len(), 2);
    assert!(polls.iter().all(|p| p.poll.community_id == community.id));

    Ok(())
}

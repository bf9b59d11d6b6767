use super::*;

/// Tests listing accepted friendships.
///
/// Verifies that accepted relations are returned whichever side sent the request, and
/// that pending ones are not.
///
/// Expected: Ok with two friendships
#[tokio::test]
async fn accepted_includes_both_directions() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Friendship)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let me = factory::create_user(db).await?;
    let sent = factory::create_user(db).await?;
    let received = factory::create_user(db).await?;
    let pending = factory::create_user(db).await?;

    factory::friendship::create_friendship(db, me.id, sent.id, "accepted").await?;
    factory::friendship::create_friendship(db, received.id, me.id, "accepted").await?;
    factory::friendship::create_friendship(db, me.id, pending.id, "pending").await?;

    let friends = FriendshipRepository::new(db).get_accepted(me.id).await?;
    let mut others: Vec<i32> = friends.iter().map(|f| f.other_party(me.id)).collect();
    others.sort();

    assert_eq!(others, vec![sent.id, received.id]);

    Ok(())
}

/// Tests incoming and outgoing pending requests.
///
/// Expected: Ok with one request in each list
#[tokio::test]
async fn splits_pending_by_direction() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Friendship)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let me = factory::create_user(db).await?;
    let asker = factory::create_user(db).await?;
    let target = factory::create_user(db).await?;

    factory::friendship::create_friendship(db, asker.id, me.id, "pending").await?;
    factory::friendship::create_friendship(db, me.id, target.id, "pending").await?;

    let repo = FriendshipRepository::new(db);
    let incoming = repo.get_incoming(me.id).await?;
    let outgoing = repo.get_outgoing(me.id).await?;

    assert_eq!(incoming.len(), 1);
    assert_eq!(incoming[0].requester_id, asker.id);
    assert_eq!(outgoing.len(), 1);
    assert_eq!(outgoing[0].addressee_id, target.id);

    Ok(())
}

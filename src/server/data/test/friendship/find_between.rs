use super::*;

/// Tests looking up a relation in both directions.
///
/// Verifies that a request sent by A to B is found when querying (A, B) and (B, A).
///
/// Expected: Ok(Some) for both orders, Ok(None) for an unrelated pair
#[tokio::test]
async fn finds_relation_in_either_direction() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Friendship)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let a = factory::create_user(db).await?;
    let b = factory::create_user(db).await?;
    let c = factory::create_user(db).await?;

    let repo = FriendshipRepository::new(db);
    let created = repo.create(a.id, b.id).await?;

    assert_eq!(created.status, FriendshipStatus::Pending);
    assert_eq!(repo.find_between(a.id, b.id).await?.map(|f| f.id), Some(created.id));
    assert_eq!(repo.find_between(b.id, a.id).await?.map(|f| f.id), Some(created.id));
    assert!(repo.find_between(a.id, c.id).await?.is_none());

    Ok(())
}

/// Tests accepting a request.
///
/// Expected: Ok with status accepted after the update
#[tokio::test]
async fn accept_marks_relation_accepted() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Friendship)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let a = factory::create_user(db).await?;
    let b = factory::create_user(db).await?;

    let repo = FriendshipRepository::new(db);
    let created = repo.create(a.id, b.id).await?;
    repo.accept(created.id).await?;

    let stored = repo.find_by_id(created.id).await?.unwrap();
    assert_eq!(stored.status, FriendshipStatus::Accepted);

    Ok(())
}

/// Tests inserting a second relation for the same pair of users.
///
/// Verifies that neither a repeated request nor a request in the opposite direction can be
/// inserted once the pair has a row, and that the violation maps to a conflict.
///
/// Expected: Err(AppError::Conflict) for both inserts, one row for the pair
#[tokio::test]
async fn pair_allows_one_row_in_either_direction() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Friendship)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let a = factory::create_user(db).await?;
    let b = factory::create_user(db).await?;

    let repo = FriendshipRepository::new(db);
    let created = repo.create(a.id, b.id).await?;

    for (requester, addressee) in [(a.id, b.id), (b.id, a.id)] {
        let err = repo
            .create(requester, addressee)
            .await
            .map_err(|e| map_app_unique_violation(e, "pending"))
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    assert_eq!(repo.find_between(b.id, a.id).await?.map(|f| f.id), Some(created.id));

    Ok(())
}

use super::*;

/// Tests replacing an avatar path.
///
/// Verifies that the previous path is returned so the caller can delete the old file.
///
/// Expected: Ok(None) for the first avatar, then Ok(Some(first path))
#[tokio::test]
async fn returns_previous_path() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = UserRepository::new(db);

    let first = repo
        .set_avatar_path(user.id, Some("avatars/1-a.png".to_string()))
        .await?;
    let second = repo
        .set_avatar_path(user.id, Some("avatars/1-b.png".to_string()))
        .await?;

    assert!(first.is_none());
    assert_eq!(second.as_deref(), Some("avatars/1-a.png"));

    let stored = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(stored.avatar_path.as_deref(), Some("avatars/1-b.png"));

    Ok(())
}

/// Tests setting an avatar for a user that does not exist.
///
/// Expected: Err(DbErr::RecordNotFound)
#[tokio::test]
async fn fails_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserRepository::new(db)
        .set_avatar_path(42, Some("avatars/42-x.png".to_string()))
        .await;

    assert!(matches!(result, Err(DbErr::RecordNotFound(_))));

    Ok(())
}

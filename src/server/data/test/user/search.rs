use super::*;

/// Tests searching by username and display name.
///
/// Verifies that a user matches when either the username or the display name contains
/// the query, and that unrelated users are excluded.
///
/// Expected: Ok with the two matching users
#[tokio::test]
async fn matches_username_or_display_name() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .username("dicelord")
        .display_name("Anna")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .username("anna_b")
        .display_name("Someone")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .username("bob")
        .display_name("Bob")
        .build()
        .await?;

    let users = UserRepository::new(db).search("nna", 20).await?;
    let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();

    assert_eq!(names, vec!["anna_b", "dicelord"]);

    Ok(())
}

/// Tests that `%` and `_` in the query are matched literally instead of as wildcards.
///
/// Expected: Ok with no match for "%%" and only the username containing "a_i" for "a_i"
#[tokio::test]
async fn treats_like_wildcards_literally() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .username("alice")
        .display_name("Alice")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .username("mika_ito")
        .display_name("Mika")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    assert!(repo.search("%%", 20).await?.is_empty());

    let users = repo.search("a_i", 20).await?;
    let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["mika_ito"]);

    Ok(())
}

/// Tests the result limit.
///
/// Expected: Ok with at most `limit` users
#[tokio::test]
async fn respects_limit() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..4 {
        factory::create_user(db).await?;
    }

    let users = UserRepository::new(db).search("user", 3).await?;

    assert_eq!(users.len(), 3);

    Ok(())
}

/// Tests updating profile fields.
///
/// Verifies that display name, bio and location are replaced and that a missing user
/// yields `None`.
///
/// Expected: Ok with updated user, then Ok(None)
#[tokio::test]
async fn updates_profile_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = UserRepository::new(db);

    let updated = repo
        .update_profile(UpdateProfileParams {
            user_id: user.id,
            display_name: "Meeple Master".to_string(),
            bio: Some("Euro games only".to_string()),
            location: Some("Essen".to_string()),
        })
        .await?
        .unwrap();

    assert_eq!(updated.display_name, "Meeple Master");
    assert_eq!(updated.bio.as_deref(), Some("Euro games only"));
    assert_eq!(updated.location.as_deref(), Some("Essen"));

    let missing = repo
        .update_profile(UpdateProfileParams {
            user_id: user.id + 100,
            display_name: "Nobody".to_string(),
            bio: None,
            location: None,
        })
        .await?;
    assert!(missing.is_none());

    Ok(())
}

use super::*;

fn param(provider_id: &str, username: &str, is_admin: Option<bool>) -> UpsertUserParam {
    UpsertUserParam {
        provider_id: provider_id.to_string(),
        username: username.to_string(),
        display_name: username.to_string(),
        is_admin,
    }
}

/// Tests creating a user on first login.
///
/// Verifies that an unknown provider id creates a new user with the requested username
/// and without admin privileges.
///
/// Expected: Ok with new non-admin user
#[tokio::test]
async fn creates_new_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.upsert(param("p-1", "meeple", None)).await?;

    assert_eq!(user.username, "meeple");
    assert_eq!(user.display_name, "meeple");
    assert!(!user.admin);

    Ok(())
}

/// Tests username de-duplication.
///
/// Verifies that a second user asking for a taken username gets the first free numeric
/// suffix starting at 2.
///
/// Expected: Ok with usernames "meeple", "meeple2" and "meeple3"
#[tokio::test]
async fn appends_numeric_suffix_to_taken_username() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let first = repo.upsert(param("p-1", "meeple", None)).await?;
    let second = repo.upsert(param("p-2", "meeple", None)).await?;
    let third = repo.upsert(param("p-3", "meeple", None)).await?;

    assert_eq!(first.username, "meeple");
    assert_eq!(second.username, "meeple2");
    assert_eq!(third.username, "meeple3");

    Ok(())
}

/// Tests logging in again with the same provider id.
///
/// Verifies that the existing row is reused and its username is kept even when the
/// provider now reports a different name.
///
/// Expected: Ok with the same id and the original username
#[tokio::test]
async fn reuses_existing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let created = repo.upsert(param("p-1", "meeple", None)).await?;
    let again = repo.upsert(param("p-1", "renamed", None)).await?;

    assert_eq!(created.id, again.id);
    assert_eq!(again.username, "meeple");

    Ok(())
}

/// Tests admin flag handling on upsert.
///
/// Verifies that `Some(true)` grants admin to an existing user while `None` leaves the
/// flag untouched.
///
/// Expected: Ok with admin granted and kept
#[tokio::test]
async fn updates_admin_only_when_provided() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.upsert(param("p-1", "meeple", None)).await?;

    let promoted = repo.upsert(param("p-1", "meeple", Some(true))).await?;
    assert!(promoted.admin);

    let unchanged = repo.upsert(param("p-1", "meeple", None)).await?;
    assert!(unchanged.admin);
    assert!(repo.admin_exists().await?);

    Ok(())
}

use super::*;

/// Tests pagination over several pages.
///
/// Verifies that the repository returns the requested slice and the total number of
/// users, not the number of pages.
///
/// Expected: Ok with 2 users per page and total of 5
#[tokio::test]
async fn returns_requested_page_and_total() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..5 {
        factory::create_user(db).await?;
    }

    let repo = UserRepository::new(db);
    let (first, total) = repo.get_all_paginated(0, 2).await?;
    let (last, _) = repo.get_all_paginated(2, 2).await?;

    assert_eq!(first.len(), 2);
    assert_eq!(last.len(), 1);
    assert_eq!(total, 5);

    Ok(())
}

/// Tests ordering of the user list.
///
/// Verifies that users are sorted by username regardless of creation order.
///
/// Expected: Ok with alphabetical usernames
#[tokio::test]
async fn orders_by_username() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for name in ["carcassonne", "azul", "brass"] {
        factory::user::UserFactory::new(db).username(name).build().await?;
    }

    let repo = UserRepository::new(db);
    let (users, _) = repo.get_all_paginated(0, 10).await?;
    let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();

    assert_eq!(names, vec!["azul", "brass", "carcassonne"]);

    Ok(())
}

/// Tests pagination on an empty table.
///
/// Expected: Ok with no users and a total of 0
#[tokio::test]
async fn returns_empty_for_no_users() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (users, total) = UserRepository::new(db).get_all_paginated(0, 10).await?;

    assert!(users.is_empty());
    assert_eq!(total, 0);

    Ok(())
}

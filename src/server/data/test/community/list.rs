use super::*;

/// Tests listing groups with search.
///
/// Verifies that the search matches name, description or location and that member
/// counts are attached.
///
/// Expected: Ok with the matching group and its member count
#[tokio::test]
async fn filters_by_search_and_counts_members() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_user(db).await?;
    let member = factory::create_user(db).await?;
    let repo = CommunityRepository::new(db);

    let hamburg = repo
        .create(
            admin.id,
            SaveCommunityParams {
                location: Some("Hamburg".to_string()),
                ..params("North Gamers")
            },
        )
        .await?;
    repo.create(admin.id, params("Meeple Berlin")).await?;
    factory::add_member(db, hamburg.id, member.id, "member").await?;

    let found = repo.list(Some("hamburg")).await?;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, hamburg.id);
    assert_eq!(found[0].member_count, 2);

    assert_eq!(repo.list(None).await?.len(), 2);

    Ok(())
}

/// Tests listing the groups a user belongs to.
///
/// Expected: Ok with only the groups with a membership row
#[tokio::test]
async fn lists_groups_for_member() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_user(db).await?;
    let member = factory::create_user(db).await?;
    let joined = factory::create_community(db, admin.id).await?;
    factory::create_community(db, admin.id).await?;
    factory::add_member(db, joined.id, member.id, "member").await?;

    let repo = CommunityRepository::new(db);
    let mine = repo.list_for_user(member.id).await?;

    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, joined.id);
    assert_eq!(repo.list_for_user(admin.id).await?.len(), 2);

    Ok(())
}

/// Tests that an underscore in the search is not a single-character wildcard.
///
/// Expected: Ok with no groups for "North_Gamers"
#[tokio::test]
async fn search_treats_underscore_literally() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_user(db).await?;
    let repo = CommunityRepository::new(db);
    repo.create(admin.id, params("North Gamers")).await?;

    assert!(repo.list(Some("North_Gamers")).await?.is_empty());
    assert_eq!(repo.list(Some("North Gamers")).await?.len(), 1);

    Ok(())
}

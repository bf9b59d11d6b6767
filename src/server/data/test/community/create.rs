use super::*;

/// Tests creating a group.
///
/// Verifies that the creator is inserted as the group's first admin in the same
/// operation and that the member count reflects it.
///
/// Expected: Ok with one admin member
#[tokio::test]
async fn inserts_creator_as_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let creator = factory::create_user(db).await?;
    let community = CommunityRepository::new(db)
        .create(creator.id, params("Meeple Berlin"))
        .await?;

    assert_eq!(community.name, "Meeple Berlin");
    assert_eq!(community.creator_id, creator.id);
    assert_eq!(community.member_count, 1);

    let membership = MembershipRepository::new(db)
        .find(community.id, creator.id)
        .await?
        .unwrap();
    assert_eq!(membership.role, MemberRole::Admin);

    Ok(())
}

/// Tests the name uniqueness check.
///
/// Verifies that a group's own name is not reported as taken when excluded, which is
/// what an update without a rename needs.
///
/// Expected: taken for other groups, free when excluding itself
#[tokio::test]
async fn name_taken_respects_exclusion() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let creator = factory::create_user(db).await?;
    let repo = CommunityRepository::new(db);
    let community = repo.create(creator.id, params("Dice Club")).await?;

    assert!(repo.name_taken("Dice Club", None).await?);
    assert!(!repo.name_taken("Dice Club", Some(community.id)).await?);
    assert!(!repo.name_taken("Other Club", None).await?);

    Ok(())
}

/// Tests creating two groups with the same name.
///
/// Expected: Err from the unique index on the name column
#[tokio::test]
async fn rejects_duplicate_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let creator = factory::create_user(db).await?;
    let repo = CommunityRepository::new(db);
    repo.create(creator.id, params("Dice Club")).await?;

    let result = repo.create(creator.id, params("Dice Club")).await;

    assert!(result.is_err());
    assert_eq!(entity::prelude::Community::find().count(db).await?, 1);

    Ok(())
}

use super::*;

/// Tests adding a member.
///
/// Expected: Ok with a member role and an increased count
#[tokio::test]
async fn adds_member() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_user(db).await?;
    let user = factory::create_user(db).await?;
    let community = factory::create_community(db, admin.id).await?;

    let repo = MembershipRepository::new(db);
    let membership = repo.add(community.id, user.id, MemberRole::Member).await?;

    assert_eq!(membership.community_id, community.id);
    assert_eq!(membership.role, MemberRole::Member);
    assert_eq!(repo.count(community.id).await?, 2);

    Ok(())
}

/// Tests adding the same user twice.
///
/// Verifies that the unique (community_id, user_id) index rejects the second row.
///
/// Expected: Err with a unique constraint violation
#[tokio::test]
async fn rejects_duplicate_membership() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, member, community) = factory::helpers::create_community_with_members(db).await?;

    let result = MembershipRepository::new(db)
        .add(community.id, member.id, MemberRole::Member)
        .await;

    assert!(matches!(
        result,
        Err(AppError::DbErr(ref err))
            if matches!(err.sql_err(), Some(sea_orm::SqlErr::UniqueConstraintViolation(_)))
    ));

    Ok(())
}

/// Tests removing members.
///
/// Expected: Ok(true) for a member, Ok(false) when no row exists
#[tokio::test]
async fn remove_reports_whether_row_existed() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, member, community) = factory::helpers::create_community_with_members(db).await?;
    let repo = MembershipRepository::new(db);

    assert!(repo.remove(community.id, member.id).await?);
    assert!(!repo.remove(community.id, member.id).await?);
    assert!(repo.find(community.id, member.id).await?.is_none());

    Ok(())
}

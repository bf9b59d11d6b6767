use super::*;

/// Tests member ordering.
///
/// Verifies that admins are listed before members, and that join order is kept within
/// each role.
///
/// Expected: Ok with [creator, promoted admin, first member, second member]
#[tokio::test]
async fn lists_admins_first_then_by_join_date() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let creator = factory::create_user(db).await?;
    let first = factory::create_user(db).await?;
    let late_admin = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let community = factory::create_community(db, creator.id).await?;

    factory::add_member(db, community.id, first.id, "member").await?;
    factory::add_member(db, community.id, late_admin.id, "admin").await?;
    factory::add_member(db, community.id, second.id, "member").await?;

    let members = MembershipRepository::new(db)
        .get_members(community.id)
        .await?;
    let ids: Vec<i32> = members.iter().map(|m| m.user.id).collect();

    assert_eq!(ids, vec![creator.id, late_admin.id, first.id, second.id]);

    Ok(())
}

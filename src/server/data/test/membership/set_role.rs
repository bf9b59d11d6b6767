use super::*;

/// Tests promoting a member.
///
/// Expected: Ok with two admins after the update
#[tokio::test]
async fn promotes_member_to_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, member, community) = factory::helpers::create_community_with_members(db).await?;
    let repo = MembershipRepository::new(db);

    assert_eq!(repo.count_admins(community.id).await?, 1);

    repo.set_role(community.id, member.id, MemberRole::Admin)
        .await?;

    let membership = repo.find(community.id, member.id).await?.unwrap();
    assert_eq!(membership.role, MemberRole::Admin);
    assert_eq!(repo.count_admins(community.id).await?, 2);

    Ok(())
}

use super::*;

mod require_admin;
mod require_community;

/// Tests that an empty permission list only requires a logged-in user.
///
/// Expected: Ok(User) for any user in the session
#[tokio::test]
async fn empty_permissions_require_login_only() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let returned = AuthGuard::new(db, session).require(&[]).await?;
    assert_eq!(returned.id, user.id);

    Ok(())
}

/// Tests multiple permissions are all checked.
///
/// Verifies that a group member passes a membership check but fails when group admin is
/// required as well.
///
/// Expected: Ok for the member check, AccessDenied for the combined check
#[tokio::test]
async fn requires_all_permissions() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (_, member, community) = create_community_with_members(db).await?;
    AuthSession::new(session).set_user_id(member.id).await?;

    let guard = AuthGuard::new(db, session);
    guard
        .require(&[Permission::CommunityMember(community.id)])
        .await?;

    let result = guard
        .require(&[
            Permission::CommunityMember(community.id),
            Permission::CommunityAdmin(community.id),
        ])
        .await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

use super::*;

/// Tests approving a join request.
///
/// Verifies that the request is resolved by the approving admin and that the requester
/// becomes a member.
///
/// Expected: Ok with status approved, resolved_by set and a member row
#[tokio::test]
async fn resolves_request_and_adds_member() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_user(db).await?;
    let applicant = factory::create_user(db).await?;
    let community = factory::community::CommunityFactory::new(db, admin.id)
        .approval_mode("moderated")
        .build()
        .await?;

    let repo = JoinRequestRepository::new(db);
    let request = repo
        .create(community.id, applicant.id, Some("I bring snacks".to_string()))
        .await?;
    assert_eq!(request.status, JoinRequestStatus::Pending);

    let membership = repo.approve(&request, admin.id).await?.unwrap();
    assert_eq!(membership.user_id, applicant.id);
    assert_eq!(membership.role, MemberRole::Member);

    let stored = repo.find_by_id(request.id).await?.unwrap();
    assert_eq!(stored.status, JoinRequestStatus::Approved);
    assert_eq!(stored.resolved_by, Some(admin.id));
    assert!(stored.resolved_at.is_some());
    assert!(repo.find_pending(community.id, applicant.id).await?.is_none());

    assert!(MembershipRepository::new(db)
        .find(community.id, applicant.id)
        .await?
        .is_some());

    Ok(())
}

/// Tests rejecting a join request.
///
/// Expected: Ok with status rejected and no membership
#[tokio::test]
async fn reject_leaves_user_outside() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_user(db).await?;
    let applicant = factory::create_user(db).await?;
    let community = factory::create_community(db, admin.id).await?;
    let request =
        factory::join_request::create_pending_request(db, community.id, applicant.id).await?;

    let repo = JoinRequestRepository::new(db);
    assert!(repo.reject(request.id, admin.id).await?);

    let stored = repo.find_by_id(request.id).await?.unwrap();
    assert_eq!(stored.status, JoinRequestStatus::Rejected);
    assert!(MembershipRepository::new(db)
        .find(community.id, applicant.id)
        .await?
        .is_none());

    Ok(())
}

/// Tests resolving a request through a copy loaded before another admin rejected it.
///
/// Verifies that the stale approval writes nothing and that rejecting twice is reported.
///
/// Expected: Ok(None) from approve, Ok(false) from the second reject, request stays rejected
#[tokio::test]
async fn resolves_only_pending_requests() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_user(db).await?;
    let applicant = factory::create_user(db).await?;
    let community = factory::community::CommunityFactory::new(db, admin.id)
        .approval_mode("moderated")
        .build()
        .await?;

    let repo = JoinRequestRepository::new(db);
    let stale = repo.create(community.id, applicant.id, None).await?;

    assert!(repo.reject(stale.id, admin.id).await?);
    assert!(repo.approve(&stale, admin.id).await?.is_none());
    assert!(!repo.reject(stale.id, admin.id).await?);

    let stored = repo.find_by_id(stale.id).await?.unwrap();
    assert_eq!(stored.status, JoinRequestStatus::Rejected);
    assert!(MembershipRepository::new(db)
        .find(community.id, applicant.id)
        .await?
        .is_none());

    Ok(())
}

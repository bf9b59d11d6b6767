use super::*;

/// Tests the admin's queue of pending requests.
///
/// Verifies that only pending requests of the group are listed with their users.
///
/// Expected: Ok with the single pending request
#[tokio::test]
async fn pending_for_community_excludes_resolved() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_user(db).await?;
    let waiting = factory::create_user(db).await?;
    let rejected = factory::create_user(db).await?;
    let community = factory::create_community(db, admin.id).await?;

    factory::join_request::create_pending_request(db, community.id, waiting.id).await?;
    let other =
        factory::join_request::create_pending_request(db, community.id, rejected.id).await?;

    let repo = JoinRequestRepository::new(db);
    repo.reject(other.id, admin.id).await?;

    let pending = repo.get_pending_for_community(community.id).await?;

    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].user.id, waiting.id);
    assert_eq!(pending[0].community_name, community.name);

    Ok(())
}

/// Tests the requester's own list.
///
/// Verifies that requests across groups are returned with each group's name.
///
/// Expected: Ok with two requests carrying their group names
#[tokio::test]
async fn for_user_includes_community_names() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_community_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_user(db).await?;
    let applicant = factory::create_user(db).await?;
    let first = factory::create_community(db, admin.id).await?;
    let second = factory::create_community(db, admin.id).await?;

    factory::join_request::create_pending_request(db, first.id, applicant.id).await?;
    factory::join_request::create_pending_request(db, second.id, applicant.id).await?;

    let requests = JoinRequestRepository::new(db)
        .get_for_user(applicant.id)
        .await?;
    let mut names: Vec<&str> = requests.iter().map(|r| r.community_name.as_str()).collect();
    names.sort();
    let mut expected = vec![first.name.as_str(), second.name.as_str()];
    expected.sort();

    assert_eq!(names, expected);
    assert!(requests.iter().all(|r| r.user.id == applicant.id));

    Ok(())
}

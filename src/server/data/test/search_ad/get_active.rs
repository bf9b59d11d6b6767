use super::*;

/// Tests creating and listing search ads.
///
/// Verifies type and title filters and that closed ads are hidden.
///
/// Expected: Ok with the matching open ad only
#[tokio::test]
async fn filters_and_hides_closed_ads() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = SearchAdRepository::new(db);

    let wanted = repo
        .create(CreateSearchAdParams {
            user_id: user.id,
            game_title: "Terraforming Mars".to_string(),
            ad_type: AdType::Buy,
            max_price_cents: Some(4000),
            description: String::new(),
        })
        .await?;
    let closed = factory::search_ad::SearchAdFactory::new(db, user.id)
        .game_title("Terraforming Mars: Ares")
        .build()
        .await?;
    factory::search_ad::SearchAdFactory::new(db, user.id)
        .game_title("Mars Open")
        .ad_type("rent")
        .build()
        .await?;

    repo.set_active(closed.id, false).await?;

    let listings = repo
        .get_active(SearchAdFilter {
            ad_type: Some(AdType::Buy),
            title: Some("mars".to_string()),
        })
        .await?;

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].ad.id, wanted.id);
    assert_eq!(listings[0].user.id, user.id);

    let own = repo.get_by_user(user.id).await?;
    assert_eq!(own.len(), 3);

    Ok(())
}

/// Tests deleting an ad.
///
/// Expected: Ok and the ad no longer found
#[tokio::test]
async fn delete_removes_ad() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let ad = factory::search_ad::SearchAdFactory::new(db, user.id)
        .build()
        .await?;

    let repo = SearchAdRepository::new(db);
    repo.delete(ad.id).await?;

    assert!(repo.find_by_id(ad.id).await?.is_none());

    Ok(())
}

use super::*;

/// Tests creating an offer.
///
/// Expected: Ok with an active offer found by game and type
#[tokio::test]
async fn creates_active_offer() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let game = factory::create_game(db, owner.id).await?;

    let repo = OfferRepository::new(db);
    let offer = repo
        .create(CreateOfferParams {
            owner_id: owner.id,
            game_id: game.id,
            offer_type: OfferType::Sell,
            price_cents: Some(2500),
            description: "Sleeved, like new".to_string(),
        })
        .await?;

    assert!(offer.active);
    assert_eq!(offer.offer_type, OfferType::Sell);
    assert_eq!(offer.price_cents, Some(2500));

    let found = repo.find_active_for_game(game.id, OfferType::Sell).await?;
    assert_eq!(found.map(|o| o.id), Some(offer.id));
    assert!(repo
        .find_active_for_game(game.id, OfferType::Lend)
        .await?
        .is_none());

    Ok(())
}

/// Tests deactivating an offer through an update.
///
/// Expected: Ok(Some) with the new price and inactive, so it is no longer found as active
#[tokio::test]
async fn update_can_deactivate() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let game = factory::create_game(db, owner.id).await?;
    let offer = factory::marketplace_offer::OfferFactory::new(db, game.id, owner.id)
        .build()
        .await?;

    let repo = OfferRepository::new(db);
    let updated = repo
        .update(
            offer.id,
            UpdateOfferParams {
                price_cents: Some(500),
                description: "Deposit required".to_string(),
                active: false,
            },
        )
        .await?
        .unwrap();

    assert!(!updated.active);
    assert_eq!(updated.price_cents, Some(500));
    assert!(repo
        .find_active_for_game(game.id, OfferType::Lend)
        .await?
        .is_none());

    Ok(())
}

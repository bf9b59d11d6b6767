use super::*;

/// Tests filtering active offers.
///
/// Verifies the offer type filter, the game title filter, and that inactive offers are
/// never listed.
///
/// Expected: Ok with the single active sell offer for "Catan"
#[tokio::test]
async fn filters_by_type_and_title() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let catan = factory::game::GameFactory::new(db, owner.id)
        .title("Catan")
        .build()
        .await?;
    let azul = factory::game::GameFactory::new(db, owner.id)
        .title("Azul")
        .build()
        .await?;

    let wanted = factory::marketplace_offer::OfferFactory::new(db, catan.id, owner.id)
        .offer_type("sell")
        .price_cents(Some(1500))
        .build()
        .await?;
    factory::marketplace_offer::OfferFactory::new(db, catan.id, owner.id)
        .build()
        .await?;
    factory::marketplace_offer::OfferFactory::new(db, azul.id, owner.id)
        .offer_type("sell")
        .price_cents(Some(900))
        .build()
        .await?;
    factory::marketplace_offer::OfferFactory::new(db, catan.id, owner.id)
        .offer_type("trade")
        .active(false)
        .build()
        .await?;

    let repo = OfferRepository::new(db);
    let listings = repo
        .get_active(OfferFilter {
            offer_type: Some(OfferType::Sell),
            title: Some("cat".to_string()),
        })
        .await?;

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].offer.id, wanted.id);
    assert_eq!(listings[0].game_title, "Catan");
    assert_eq!(listings[0].owner.id, owner.id);

    assert_eq!(repo.get_active(OfferFilter::default()).await?.len(), 3);

    Ok(())
}

/// Tests the owner's list.
///
/// Expected: Ok with active and inactive offers of the owner only
#[tokio::test]
async fn by_owner_includes_inactive() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let game = factory::create_game(db, owner.id).await?;
    let other_game = factory::create_game(db, other.id).await?;

    factory::marketplace_offer::OfferFactory::new(db, game.id, owner.id)
        .build()
        .await?;
    factory::marketplace_offer::OfferFactory::new(db, game.id, owner.id)
        .offer_type("trade")
        .active(false)
        .build()
        .await?;
    factory::marketplace_offer::OfferFactory::new(db, other_game.id, other.id)
        .build()
        .await?;

    let listings = OfferRepository::new(db).get_by_owner(owner.id).await?;

    assert_eq!(listings.len(), 2);
    assert!(listings.iter().all(|l| l.owner.id == owner.id));

    Ok(())
}

/// Tests that a `%` in the title filter only matches titles containing a percent sign.
///
/// Expected: Ok with the "100% Orange Juice" offer only
#[tokio::test]
async fn title_filter_treats_percent_literally() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let juice = factory::game::GameFactory::new(db, owner.id)
        .title("100% Orange Juice")
        .build()
        .await?;
    let catan = factory::game::GameFactory::new(db, owner.id)
        .title("Catan")
        .build()
        .await?;

    let wanted = factory::marketplace_offer::OfferFactory::new(db, juice.id, owner.id)
        .build()
        .await?;
    factory::marketplace_offer::OfferFactory::new(db, catan.id, owner.id)
        .build()
        .await?;

    let listings = OfferRepository::new(db)
        .get_active(OfferFilter {
            offer_type: None,
            title: Some("%".to_string()),
        })
        .await?;

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].offer.id, wanted.id);

    Ok(())
}

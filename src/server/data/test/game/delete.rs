use super::*;

/// Tests deleting a game with marketplace offers.
///
/// Verifies that the game's offers are removed with it while offers for other games stay.
///
/// Expected: Ok(true) and one remaining offer
#[tokio::test]
async fn deletes_game_and_its_offers() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let game = factory::create_game(db, owner.id).await?;
    let kept = factory::create_game(db, owner.id).await?;
    factory::marketplace_offer::OfferFactory::new(db, game.id, owner.id)
        .build()
        .await?;
    factory::marketplace_offer::OfferFactory::new(db, kept.id, owner.id)
        .build()
        .await?;

    let repo = GameRepository::new(db);
    let deleted = repo.delete(game.id).await?;

    assert!(deleted);
    assert!(repo.find_by_id(game.id).await?.is_none());
    let remaining = entity::prelude::MarketplaceOffer::find().count(db).await?;
    assert_eq!(remaining, 1);

    Ok(())
}

/// Tests deleting a game that does not exist.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_missing_game() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(!GameRepository::new(db).delete(7).await?);

    Ok(())
}

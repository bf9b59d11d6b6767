use super::*;

/// Tests listing a user's library.
///
/// Verifies that only the owner's games are returned, newest first.
///
/// Expected: Ok with the owner's two games in descending creation order
#[tokio::test]
async fn returns_owner_games_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_library_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let now = Utc::now();

    factory::game::GameFactory::new(db, owner.id)
        .title("Older")
        .created_at(now - Duration::days(2))
        .build()
        .await?;
    factory::game::GameFactory::new(db, owner.id)
        .title("Newer")
        .created_at(now)
        .build()
        .await?;
    factory::create_game(db, other.id).await?;

    let repo = GameRepository::new(db);
    let games = repo.get_by_owner(owner.id).await?;
    let titles: Vec<&str> = games.iter().map(|g| g.title.as_str()).collect();

    assert_eq!(titles, vec!["Newer", "Older"]);
    assert_eq!(repo.count_by_owner(owner.id).await?, 2);

    Ok(())
}

/// Tests creating a game.
///
/// Expected: Ok with every submitted field stored
#[tokio::test]
async fn creates_game_for_owner() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_library_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let game = GameRepository::new(db)
        .create(owner.id, params("Pandemic"))
        .await?;

    assert_eq!(game.owner_id, owner.id);
    assert_eq!(game.title, "Pandemic");
    assert_eq!(game.publisher.as_deref(), Some("Z-Man"));
    assert_eq!((game.min_players, game.max_players), (2, 4));
    assert!(game.image_path.is_none());

    Ok(())
}

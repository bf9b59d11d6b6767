use super::*;

/// Tests updating a game.
///
/// Expected: Ok(Some) with the new title and player counts
#[tokio::test]
async fn replaces_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_library_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let game = factory::create_game(db, owner.id).await?;

    let mut changed = params("Pandemic Legacy");
    changed.max_players = 5;
    let updated = GameRepository::new(db)
        .update(game.id, changed)
        .await?
        .unwrap();

    assert_eq!(updated.id, game.id);
    assert_eq!(updated.title, "Pandemic Legacy");
    assert_eq!(updated.max_players, 5);

    Ok(())
}

/// Tests updating a game that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_game() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_library_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = GameRepository::new(db).update(999, params("Ghost")).await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests replacing the cover image path.
///
/// Expected: Ok with the previous path returned
#[tokio::test]
async fn returns_previous_image_path() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_library_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let game = factory::create_game(db, owner.id).await?;
    let repo = GameRepository::new(db);

    repo.set_image_path(game.id, Some("games/a.png".to_string()))
        .await?;
    let previous = repo
        .set_image_path(game.id, Some("games/b.png".to_string()))
        .await?;

    assert_eq!(previous.as_deref(), Some("games/a.png"));

    Ok(())
}

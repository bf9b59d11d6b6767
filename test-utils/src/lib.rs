//! Meeple Hub Test Utils
//!
//! Shared helpers for the application's database tests. Tests describe the tables they need
//! with `TestBuilder`, get back a `TestContext` holding an in-memory SQLite connection (and a
//! session backed by the same database), then seed rows with the `factory` modules.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn creates_game() -> Result<(), sea_orm::DbErr> {
//!     let test = TestBuilder::new().with_library_tables().build().await.unwrap();
//!     let db = test.db.as_ref().unwrap();
//!
//!     let user = factory::user::create_user(db).await?;
//!     let game = factory::game::create_game(db, user.id).await?;
//!
//!     assert_eq!(game.owner_id, user.id);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;

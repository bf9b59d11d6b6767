//! Factory methods for creating test data.
//!
//! Each entity has a module with a `Factory` builder for customized rows and a `create_*`
//! shorthand using defaults. Defaults are made unique with `helpers::next_id()` so repeated
//! calls never collide on unique columns.
//!
//! ```rust,ignore
//! let admin = factory::user::create_user(db).await?;
//! let community = factory::community::CommunityFactory::new(db, admin.id)
//!     .approval_mode("moderated")
//!     .max_members(Some(5))
//!     .build()
//!     .await?;
//! ```

pub mod community;
pub mod event;
pub mod friendship;
pub mod game;
pub mod helpers;
pub mod join_request;
pub mod marketplace_offer;
pub mod poll;
pub mod search_ad;
pub mod user;

pub use community::{add_member, create_community};
pub use game::create_game;
pub use user::create_user;

//! Wire types shared by the API handlers.
//!
//! Every struct here is serialized as JSON and documented through `utoipa::ToSchema`.
//! Server-side domain models convert into these through their `into_dto` methods.

pub mod api;
pub mod change;
pub mod community;
pub mod event;
pub mod friend;
pub mod game;
pub mod marketplace;
pub mod poll;
pub mod user;

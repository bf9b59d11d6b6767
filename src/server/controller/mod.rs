//! Axum handlers, one module per API area.
//!
//! Handlers re-validate the session through `AuthGuard`, call a service, publish a change
//! notification after successful mutations and convert the result into a DTO.

pub mod admin;
pub mod auth;
pub mod changes;
pub mod community;
pub mod event;
pub mod friend;
pub mod game;
pub mod marketplace;
pub mod param;
pub mod poll;
pub mod storage;
pub mod user;

//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the repositories. They validate input, enforce
//! ownership and group rules that go beyond the `AuthGuard` permission check, coordinate
//! several repositories, and translate storage failures such as unique violations into
//! `AppError` variants the client understands.

pub mod admin;
pub mod auth;
pub mod change_feed;
pub mod community;
pub mod event;
pub mod friend;
pub mod library;
pub mod marketplace;
pub mod poll;
pub mod storage;
pub mod user;

#[cfg(test)]
mod test;

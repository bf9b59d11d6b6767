//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to keep entity types out of the business logic layer. Multi-row writes
//! that must succeed together (creating a group with its first admin, approving a join
//! request) run inside a single transaction owned by the repository method.

pub mod community;
pub mod event;
pub mod friendship;
pub mod game;
pub mod join_request;
pub mod membership;
pub mod offer;
pub mod poll;
pub mod search_ad;
pub mod user;

#[cfg(test)]
mod test;

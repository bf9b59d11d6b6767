//! Domain models and operation parameter types.
//!
//! Repositories convert SeaORM entity models into these types with `from_entity`, services
//! pass them around, and controllers convert them into wire DTOs with `into_dto`. Status
//! and type columns are stored as strings and parsed into enums here, so an unknown stored
//! value surfaces as an internal error instead of leaking into the API.

pub mod community;
pub mod event;
pub mod friend;
pub mod game;
pub mod marketplace;
pub mod poll;
pub mod storage;
pub mod user;

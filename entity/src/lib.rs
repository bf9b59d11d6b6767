//! SeaORM entity models for every table owned by the application.

pub mod prelude;

pub mod community;
pub mod community_member;
pub mod event;
pub mod event_participant;
pub mod friendship;
pub mod game;
pub mod join_request;
pub mod marketplace_offer;
pub mod poll;
pub mod poll_option;
pub mod poll_vote;
pub mod search_ad;
pub mod user;

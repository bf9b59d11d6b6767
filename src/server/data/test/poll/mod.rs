use crate::server::{data::poll::PollRepository, model::poll::CreatePollParams};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod close_expired;
mod create;
mod vote;

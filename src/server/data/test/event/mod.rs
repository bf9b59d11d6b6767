use crate::server::{data::event::EventRepository, model::event::SaveEventParams};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod participants;
mod upcoming;

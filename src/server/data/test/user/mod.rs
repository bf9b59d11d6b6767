use crate::server::{
    data::user::UserRepository,
    model::user::{UpdateProfileParams, UpsertUserParam},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_all_paginated;
mod search;
mod set_avatar_path;
mod upsert;

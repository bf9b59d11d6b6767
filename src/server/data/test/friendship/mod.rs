use crate::server::{
    data::friendship::FriendshipRepository, error::AppError, model::friend::FriendshipStatus,
    util::db::map_app_unique_violation,
};
use entity::prelude::*;
use test_utils::{builder::TestBuilder, factory};

mod find_between;
mod lists;

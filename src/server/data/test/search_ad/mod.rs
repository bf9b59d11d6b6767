use crate::server::{
    data::search_ad::SearchAdRepository,
    error::AppError,
    model::marketplace::{AdType, CreateSearchAdParams, SearchAdFilter},
};
use test_utils::{builder::TestBuilder, factory};

mod get_active;

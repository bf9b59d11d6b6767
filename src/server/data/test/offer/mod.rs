use crate::server::{
    data::offer::OfferRepository,
    error::AppError,
    model::marketplace::{CreateOfferParams, OfferFilter, OfferType, UpdateOfferParams},
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_active;

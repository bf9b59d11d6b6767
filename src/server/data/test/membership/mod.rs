use crate::server::{
    data::membership::MembershipRepository, error::AppError, model::community::MemberRole,
};
use test_utils::{builder::TestBuilder, factory};

mod add;
mod get_members;
mod set_role;

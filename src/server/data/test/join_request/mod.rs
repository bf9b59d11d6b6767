use crate::server::{
    data::{join_request::JoinRequestRepository, membership::MembershipRepository},
    error::AppError,
    model::community::{JoinRequestStatus, MemberRole},
};
use test_utils::{builder::TestBuilder, factory};

mod approve;
mod lists;

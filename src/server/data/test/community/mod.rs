use crate::server::{
    data::{community::CommunityRepository, membership::MembershipRepository},
    error::AppError,
    model::community::{ApprovalMode, MemberRole, SaveCommunityParams},
};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod list;

fn params(name: &str) -> SaveCommunityParams {
    SaveCommunityParams {
        name: name.to_string(),
        description: "Weekly board game nights".to_string(),
        location: Some("Berlin".to_string()),
        approval_mode: ApprovalMode::Open,
        max_members: None,
    }
}

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{auth::AuthGuard, auth::Permission, session::AuthSession},
};
use test_utils::{
    builder::TestBuilder,
    factory::{self, helpers::create_community_with_members},
};

mod require;

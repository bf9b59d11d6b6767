//! Join request factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a pending join request from `user_id` for `community_id`.
pub async fn create_pending_request(
    db: &DatabaseConnection,
    community_id: i32,
    user_id: i32,
) -> Result<entity::join_request::Model, DbErr> {
    entity::join_request::ActiveModel {
        community_id: ActiveValue::Set(community_id),
        user_id: ActiveValue::Set(user_id),
        message: ActiveValue::Set(None),
        status: ActiveValue::Set("pending".to_string()),
        created_at: ActiveValue::Set(Utc::now()),
        resolved_at: ActiveValue::Set(None),
        resolved_by: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}

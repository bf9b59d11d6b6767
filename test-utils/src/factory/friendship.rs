//! Friendship factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts a friendship row with the given status (`pending` or `accepted`).
pub async fn create_friendship(
    db: &DatabaseConnection,
    requester_id: i32,
    addressee_id: i32,
    status: &str,
) -> Result<entity::friendship::Model, DbErr> {
    entity::friendship::ActiveModel {
        requester_id: ActiveValue::Set(requester_id),
        addressee_id: ActiveValue::Set(addressee_id),
        user_low: ActiveValue::Set(requester_id.min(addressee_id)),
        user_high: ActiveValue::Set(requester_id.max(addressee_id)),
        status: ActiveValue::Set(status.to_string()),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

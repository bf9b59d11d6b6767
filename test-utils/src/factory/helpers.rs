//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates an admin user, a group they administer and a second user who is a plain member.
///
/// # Returns
/// - `Ok((admin, member, community))` - The created rows
/// - `Err(DbErr)` - Database error during creation
pub async fn create_community_with_members(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::user::Model,
        entity::community::Model,
    ),
    DbErr,
> {
    let admin = crate::factory::user::create_user(db).await?;
    let member = crate::factory::user::create_user(db).await?;
    let community = crate::factory::community::create_community(db, admin.id).await?;
    crate::factory::community::add_member(db, community.id, member.id, "member").await?;

    Ok((admin, member, community))
}

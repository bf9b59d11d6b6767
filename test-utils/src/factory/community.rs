//! Community factory. Creating a community also inserts its creator as an admin member.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct CommunityFactory<'a> {
    db: &'a DatabaseConnection,
    creator_id: i32,
    name: String,
    approval_mode: String,
    max_members: Option<i32>,
}

impl<'a> CommunityFactory<'a> {
    /// Defaults: name `"Community {id}"`, `open` approval, no member limit.
    pub fn new(db: &'a DatabaseConnection, creator_id: i32) -> Self {
        Self {
            db,
            creator_id,
            name: format!("Community {}", next_id()),
            approval_mode: "open".to_string(),
            max_members: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the approval mode, `open` or `moderated`.
    pub fn approval_mode(mut self, mode: impl Into<String>) -> Self {
        self.approval_mode = mode.into();
        self
    }

    pub fn max_members(mut self, max_members: Option<i32>) -> Self {
        self.max_members = max_members;
        self
    }

    pub async fn build(self) -> Result<entity::community::Model, DbErr> {
        let community = entity::community::ActiveModel {
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set("A place to play".to_string()),
            location: ActiveValue::Set(None),
            approval_mode: ActiveValue::Set(self.approval_mode),
            max_members: ActiveValue::Set(self.max_members),
            creator_id: ActiveValue::Set(self.creator_id),
            image_path: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        add_member(self.db, community.id, self.creator_id, "admin").await?;

        Ok(community)
    }
}

/// Creates an open community administered by `creator_id`.
pub async fn create_community(
    db: &DatabaseConnection,
    creator_id: i32,
) -> Result<entity::community::Model, DbErr> {
    CommunityFactory::new(db, creator_id).build().await
}

/// Inserts a membership row with the given role (`admin` or `member`).
pub async fn add_member(
    db: &DatabaseConnection,
    community_id: i32,
    user_id: i32,
    role: &str,
) -> Result<entity::community_member::Model, DbErr> {
    entity::community_member::ActiveModel {
        community_id: ActiveValue::Set(community_id),
        user_id: ActiveValue::Set(user_id),
        role: ActiveValue::Set(role.to_string()),
        joined_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::TestBuilder, factory};
    use entity::prelude::*;
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

    #[tokio::test]
    async fn creator_becomes_admin_member() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_community_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let user = factory::user::create_user(db).await?;
        let community = create_community(db, user.id).await?;

        let members = CommunityMember::find()
            .filter(entity::community_member::Column::CommunityId.eq(community.id))
            .all(db)
            .await?;

        assert_eq!(members.len(), 1);
        assert_eq!(members[0].user_id, user.id);
        assert_eq!(members[0].role, "admin");

        Ok(())
    }
}

//! Poll factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct PollFactory<'a> {
    db: &'a DatabaseConnection,
    community_id: i32,
    creator_id: i32,
    question: String,
    options: Vec<String>,
    closes_at: Option<DateTime<Utc>>,
    closed: bool,
}

impl<'a> PollFactory<'a> {
    /// Defaults: question `"Poll {id}?"`, options `Yes` and `No`, open with no deadline.
    pub fn new(db: &'a DatabaseConnection, community_id: i32, creator_id: i32) -> Self {
        Self {
            db,
            community_id,
            creator_id,
            question: format!("Poll {}?", next_id()),
            options: vec!["Yes".to_string(), "No".to_string()],
            closes_at: None,
            closed: false,
        }
    }

    pub fn options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|o| o.to_string()).collect();
        self
    }

    pub fn closes_at(mut self, closes_at: Option<DateTime<Utc>>) -> Self {
        self.closes_at = closes_at;
        self
    }

    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Inserts the poll and its options.
    ///
    /// # Returns
    /// - `Ok((poll, options))` - Options in insertion order
    pub async fn build(
        self,
    ) -> Result<(entity::poll::Model, Vec<entity::poll_option::Model>), DbErr> {
        let poll = entity::poll::ActiveModel {
            community_id: ActiveValue::Set(self.community_id),
            creator_id: ActiveValue::Set(self.creator_id),
            question: ActiveValue::Set(self.question),
            closes_at: ActiveValue::Set(self.closes_at),
            closed: ActiveValue::Set(self.closed),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let mut options = Vec::with_capacity(self.options.len());
        for (position, label) in self.options.into_iter().enumerate() {
            let option = entity::poll_option::ActiveModel {
                poll_id: ActiveValue::Set(poll.id),
                label: ActiveValue::Set(label),
                position: ActiveValue::Set(position as i32),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
            options.push(option);
        }

        Ok((poll, options))
    }
}

/// Creates an open yes/no poll.
pub async fn create_poll(
    db: &DatabaseConnection,
    community_id: i32,
    creator_id: i32,
) -> Result<(entity::poll::Model, Vec<entity::poll_option::Model>), DbErr> {
    PollFactory::new(db, community_id, creator_id).build().await
}

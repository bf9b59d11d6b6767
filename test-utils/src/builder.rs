use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Tables are generated from the SeaORM entities with the SQLite backend, so foreign keys
/// declared as entity relations are created too. Add tables in dependency order.
///
/// # Example
///
/// ```rust,ignore
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Game)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order by `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create the table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the tables backing a user's game library: `User`, `Game`.
    pub fn with_library_tables(self) -> Self {
        self.with_table(User).with_table(Game)
    }

    /// Adds every table used by groups: users, communities, memberships, join requests,
    /// polls and events.
    pub fn with_community_tables(self) -> Self {
        self.with_table(User)
            .with_table(Community)
            .with_table(CommunityMember)
            .with_table(JoinRequest)
            .with_table(Poll)
            .with_table(PollOption)
            .with_table(PollVote)
            .with_table(Event)
            .with_table(EventParticipant)
    }

    /// Adds the marketplace tables on top of the library tables.
    pub fn with_marketplace_tables(self) -> Self {
        self.with_library_tables()
            .with_table(MarketplaceOffer)
            .with_table(SearchAd)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context whose database already contains every configured table
    /// - `Err(TestError::Database)` - Failed to connect or to create a table
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

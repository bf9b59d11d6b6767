pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_user_table;
mod m20260301_000002_create_game_table;
mod m20260301_000003_create_friendship_table;
mod m20260302_000004_create_community_table;
mod m20260302_000005_create_community_member_table;
mod m20260302_000006_create_join_request_table;
mod m20260303_000007_create_poll_table;
mod m20260303_000008_create_poll_option_table;
mod m20260303_000009_create_poll_vote_table;
mod m20260304_000010_create_event_table;
mod m20260304_000011_create_event_participant_table;
mod m20260305_000012_create_marketplace_offer_table;
mod m20260305_000013_create_search_ad_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_user_table::Migration),
            Box::new(m20260301_000002_create_game_table::Migration),
            Box::new(m20260301_000003_create_friendship_table::Migration),
            Box::new(m20260302_000004_create_community_table::Migration),
            Box::new(m20260302_000005_create_community_member_table::Migration),
            Box::new(m20260302_000006_create_join_request_table::Migration),
            Box::new(m20260303_000007_create_poll_table::Migration),
            Box::new(m20260303_000008_create_poll_option_table::Migration),
            Box::new(m20260303_000009_create_poll_vote_table::Migration),
            Box::new(m20260304_000010_create_event_table::Migration),
            Box::new(m20260304_000011_create_event_participant_table::Migration),
            Box::new(m20260305_000012_create_marketplace_offer_table::Migration),
            Box::new(m20260305_000013_create_search_ad_table::Migration),
        ]
    }
}

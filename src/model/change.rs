use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Table whose rows changed.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTable {
    User,
    Game,
    Friendship,
    Community,
    CommunityMember,
    JoinRequest,
    Poll,
    Event,
    MarketplaceOffer,
    SearchAd,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Insert,
    Update,
    Delete,
}

/// Notification pushed to `/api/changes` subscribers after a successful mutation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ChangeEventDto {
    pub table: ChangeTable,
    pub action: ChangeAction,
    pub id: i32,
    pub community_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_tables_and_actions_in_snake_case() {
        let change = ChangeEventDto {
            table: ChangeTable::MarketplaceOffer,
            action: ChangeAction::Delete,
            id: 7,
            community_id: None,
        };

        let value = serde_json::to_value(&change).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "table": "marketplace_offer",
                "action": "delete",
                "id": 7,
                "community_id": null,
            })
        );
    }
}

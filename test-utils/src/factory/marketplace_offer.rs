//! Marketplace offer factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct OfferFactory<'a> {
    db: &'a DatabaseConnection,
    game_id: i32,
    owner_id: i32,
    offer_type: String,
    price_cents: Option<i64>,
    active: bool,
}

impl<'a> OfferFactory<'a> {
    /// Defaults: an active `lend` offer without price.
    pub fn new(db: &'a DatabaseConnection, game_id: i32, owner_id: i32) -> Self {
        Self {
            db,
            game_id,
            owner_id,
            offer_type: "lend".to_string(),
            price_cents: None,
            active: true,
        }
    }

    /// Sets the offer type, `lend`, `trade` or `sell`.
    pub fn offer_type(mut self, offer_type: impl Into<String>) -> Self {
        self.offer_type = offer_type.into();
        self
    }

    pub fn price_cents(mut self, price_cents: Option<i64>) -> Self {
        self.price_cents = price_cents;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub async fn build(self) -> Result<entity::marketplace_offer::Model, DbErr> {
        entity::marketplace_offer::ActiveModel {
            game_id: ActiveValue::Set(self.game_id),
            owner_id: ActiveValue::Set(self.owner_id),
            offer_type: ActiveValue::Set(self.offer_type),
            price_cents: ActiveValue::Set(self.price_cents),
            description: ActiveValue::Set(String::new()),
            active: ActiveValue::Set(self.active),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

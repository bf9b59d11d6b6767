//! Search ad factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct SearchAdFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    game_title: String,
    ad_type: String,
    max_price_cents: Option<i64>,
}

impl<'a> SearchAdFactory<'a> {
    /// Defaults: an active `buy` ad for `"Catan"` without price limit.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            game_title: "Catan".to_string(),
            ad_type: "buy".to_string(),
            max_price_cents: None,
        }
    }

    pub fn game_title(mut self, title: impl Into<String>) -> Self {
        self.game_title = title.into();
        self
    }

    /// Sets the ad type, `buy`, `rent` or `trade`.
    pub fn ad_type(mut self, ad_type: impl Into<String>) -> Self {
        self.ad_type = ad_type.into();
        self
    }

    pub fn max_price_cents(mut self, max: Option<i64>) -> Self {
        self.max_price_cents = max;
        self
    }

    pub async fn build(self) -> Result<entity::search_ad::Model, DbErr> {
        entity::search_ad::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            game_title: ActiveValue::Set(self.game_title),
            ad_type: ActiveValue::Set(self.ad_type),
            max_price_cents: ActiveValue::Set(self.max_price_cents),
            description: ActiveValue::Set(String::new()),
            active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

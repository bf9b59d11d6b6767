use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::UserSummaryDto;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OfferTypeDto {
    Lend,
    Trade,
    Sell,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdTypeDto {
    Buy,
    Rent,
    Trade,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct OfferDto {
    pub id: i32,
    pub game_id: i32,
    pub game_title: String,
    pub game_image_url: Option<String>,
    pub owner: UserSummaryDto,
    pub offer_type: OfferTypeDto,
    pub price_cents: Option<i64>,
    pub description: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreateOfferDto {
    pub game_id: i32,
    pub offer_type: OfferTypeDto,
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UpdateOfferDto {
    pub price_cents: Option<i64>,
    pub description: String,
    pub active: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct OfferSearchDto {
    pub offer_type: Option<OfferTypeDto>,
    pub search: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct SearchAdDto {
    pub id: i32,
    pub user: UserSummaryDto,
    pub game_title: String,
    pub ad_type: AdTypeDto,
    pub max_price_cents: Option<i64>,
    pub description: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreateSearchAdDto {
    pub game_title: String,
    pub ad_type: AdTypeDto,
    pub max_price_cents: Option<i64>,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SearchAdSearchDto {
    pub ad_type: Option<AdTypeDto>,
    pub search: Option<String>,
}

//! Marketplace domain models: offers on owned games and search ads for wanted games.

use chrono::{DateTime, Utc};

use crate::{
    model::marketplace::{
        AdTypeDto, CreateOfferDto, CreateSearchAdDto, OfferDto, OfferSearchDto, OfferTypeDto,
        SearchAdDto, SearchAdSearchDto, UpdateOfferDto,
    },
    server::{
        error::{internal::InternalError, AppError},
        model::{storage::storage_url, user::User},
        util::text::normalize_optional,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferType {
    Lend,
    Trade,
    Sell,
}

impl OfferType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lend => "lend",
            Self::Trade => "trade",
            Self::Sell => "sell",
        }
    }

    pub fn from_column(value: &str) -> Result<Self, InternalError> {
        match value {
            "lend" => Ok(Self::Lend),
            "trade" => Ok(Self::Trade),
            "sell" => Ok(Self::Sell),
            _ => Err(InternalError::UnknownColumnValue {
                column: "marketplace_offer.offer_type",
                value: value.to_string(),
            }),
        }
    }

    pub fn from_dto(dto: OfferTypeDto) -> Self {
        match dto {
            OfferTypeDto::Lend => Self::Lend,
            OfferTypeDto::Trade => Self::Trade,
            OfferTypeDto::Sell => Self::Sell,
        }
    }

    pub fn into_dto(self) -> OfferTypeDto {
        match self {
            Self::Lend => OfferTypeDto::Lend,
            Self::Trade => OfferTypeDto::Trade,
            Self::Sell => OfferTypeDto::Sell,
        }
    }

    /// Checks the price rules of this offer type.
    ///
    /// `sell` needs a positive price, `trade` takes none, `lend` takes an optional
    /// non-negative deposit.
    pub fn validate_price(&self, price_cents: Option<i64>) -> Result<(), AppError> {
        match (self, price_cents) {
            (Self::Sell, Some(p)) if p > 0 => Ok(()),
            (Self::Sell, _) => Err(AppError::BadRequest(
                "A sale needs a price above zero".to_string(),
            )),
            (Self::Trade, Some(_)) => Err(AppError::BadRequest(
                "A trade offer cannot have a price".to_string(),
            )),
            (Self::Lend, Some(p)) if p < 0 => Err(AppError::BadRequest(
                "Deposit cannot be negative".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdType {
    Buy,
    Rent,
    Trade,
}

impl AdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Rent => "rent",
            Self::Trade => "trade",
        }
    }

    pub fn from_column(value: &str) -> Result<Self, InternalError> {
        match value {
            "buy" => Ok(Self::Buy),
            "rent" => Ok(Self::Rent),
            "trade" => Ok(Self::Trade),
            _ => Err(InternalError::UnknownColumnValue {
                column: "search_ad.ad_type",
                value: value.to_string(),
            }),
        }
    }

    pub fn from_dto(dto: AdTypeDto) -> Self {
        match dto {
            AdTypeDto::Buy => Self::Buy,
            AdTypeDto::Rent => Self::Rent,
            AdTypeDto::Trade => Self::Trade,
        }
    }

    pub fn into_dto(self) -> AdTypeDto {
        match self {
            Self::Buy => AdTypeDto::Buy,
            Self::Rent => AdTypeDto::Rent,
            Self::Trade => AdTypeDto::Trade,
        }
    }

    /// Offer type that satisfies an ad of this type.
    pub fn matching_offer_type(&self) -> OfferType {
        match self {
            Self::Buy => OfferType::Sell,
            Self::Rent => OfferType::Lend,
            Self::Trade => OfferType::Trade,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    pub id: i32,
    pub game_id: i32,
    pub owner_id: i32,
    pub offer_type: OfferType,
    pub price_cents: Option<i64>,
    pub description: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Offer {
    pub fn from_entity(entity: entity::marketplace_offer::Model) -> Result<Self, InternalError> {
        Ok(Self {
            offer_type: OfferType::from_column(&entity.offer_type)?,
            id: entity.id,
            game_id: entity.game_id,
            owner_id: entity.owner_id,
            price_cents: entity.price_cents,
            description: entity.description,
            active: entity.active,
            created_at: entity.created_at,
        })
    }
}

/// Offer with the game title and image and the owner, as listed on the marketplace.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferListing {
    pub offer: Offer,
    pub game_title: String,
    pub game_image_path: Option<String>,
    pub owner: User,
}

impl OfferListing {
    pub fn into_dto(self) -> OfferDto {
        OfferDto {
            id: self.offer.id,
            game_id: self.offer.game_id,
            game_title: self.game_title,
            game_image_url: storage_url(self.game_image_path.as_deref()),
            owner: self.owner.to_summary_dto(),
            offer_type: self.offer.offer_type.into_dto(),
            price_cents: self.offer.price_cents,
            description: self.offer.description,
            active: self.offer.active,
            created_at: self.offer.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchAd {
    pub id: i32,
    pub user_id: i32,
    pub game_title: String,
    pub ad_type: AdType,
    pub max_price_cents: Option<i64>,
    pub description: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl SearchAd {
    pub fn from_entity(entity: entity::search_ad::Model) -> Result<Self, InternalError> {
        Ok(Self {
            ad_type: AdType::from_column(&entity.ad_type)?,
            id: entity.id,
            user_id: entity.user_id,
            game_title: entity.game_title,
            max_price_cents: entity.max_price_cents,
            description: entity.description,
            active: entity.active,
            created_at: entity.created_at,
        })
    }

    /// Whether `offer` satisfies this ad: compatible type, another owner, and a price within
    /// the limit when both sides name one. Title matching is done by the query.
    pub fn is_matched_by(&self, offer: &Offer) -> bool {
        if offer.owner_id == self.user_id || !offer.active {
            return false;
        }
        if offer.offer_type != self.ad_type.matching_offer_type() {
            return false;
        }
        match (self.max_price_cents, offer.price_cents) {
            (Some(max), Some(price)) => price <= max,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchAdListing {
    pub ad: SearchAd,
    pub user: User,
}

impl SearchAdListing {
    pub fn into_dto(self) -> SearchAdDto {
        SearchAdDto {
            id: self.ad.id,
            user: self.user.to_summary_dto(),
            game_title: self.ad.game_title,
            ad_type: self.ad.ad_type.into_dto(),
            max_price_cents: self.ad.max_price_cents,
            description: self.ad.description,
            active: self.ad.active,
            created_at: self.ad.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateOfferParams {
    pub owner_id: i32,
    pub game_id: i32,
    pub offer_type: OfferType,
    pub price_cents: Option<i64>,
    pub description: String,
}

impl CreateOfferParams {
    pub fn from_dto(owner_id: i32, dto: CreateOfferDto) -> Self {
        Self {
            owner_id,
            game_id: dto.game_id,
            offer_type: OfferType::from_dto(dto.offer_type),
            price_cents: dto.price_cents,
            description: dto.description.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateOfferParams {
    pub price_cents: Option<i64>,
    pub description: String,
    pub active: bool,
}

impl UpdateOfferParams {
    pub fn from_dto(dto: UpdateOfferDto) -> Self {
        Self {
            price_cents: dto.price_cents,
            description: dto.description.trim().to_string(),
            active: dto.active,
        }
    }
}

/// Filter for active offers.
#[derive(Debug, Clone, Default)]
pub struct OfferFilter {
    pub offer_type: Option<OfferType>,
    /// Substring of the game title.
    pub title: Option<String>,
}

impl OfferFilter {
    pub fn from_dto(dto: OfferSearchDto) -> Self {
        Self {
            offer_type: dto.offer_type.map(OfferType::from_dto),
            title: normalize_optional(dto.search),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateSearchAdParams {
    pub user_id: i32,
    pub game_title: String,
    pub ad_type: AdType,
    pub max_price_cents: Option<i64>,
    pub description: String,
}

impl CreateSearchAdParams {
    pub fn from_dto(user_id: i32, dto: CreateSearchAdDto) -> Self {
        Self {
            user_id,
            game_title: dto.game_title,
            ad_type: AdType::from_dto(dto.ad_type),
            max_price_cents: dto.max_price_cents,
            description: dto.description,
        }
    }
}

/// Filter for active search ads.
#[derive(Debug, Clone, Default)]
pub struct SearchAdFilter {
    pub ad_type: Option<AdType>,
    pub title: Option<String>,
}

impl SearchAdFilter {
    pub fn from_dto(dto: SearchAdSearchDto) -> Self {
        Self {
            ad_type: dto.ad_type.map(AdType::from_dto),
            title: normalize_optional(dto.search),
        }
    }
}

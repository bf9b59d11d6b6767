//! Marketplace offer repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::{
    data::user::UserRepository,
    error::{internal::InternalError, AppError},
    model::marketplace::{CreateOfferParams, Offer, OfferFilter, OfferListing, OfferType, UpdateOfferParams},
    util::db::contains_literal,
};

pub struct OfferRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OfferRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateOfferParams) -> Result<Offer, AppError> {
        let entity = entity::marketplace_offer::ActiveModel {
            game_id: ActiveValue::Set(params.game_id),
            owner_id: ActiveValue::Set(params.owner_id),
            offer_type: ActiveValue::Set(params.offer_type.as_str().to_string()),
            price_cents: ActiveValue::Set(params.price_cents),
            description: ActiveValue::Set(params.description),
            active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Offer::from_entity(entity)?)
    }

    pub async fn find_by_id(&self, offer_id: i32) -> Result<Option<Offer>, AppError> {
        let entity = entity::prelude::MarketplaceOffer::find_by_id(offer_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Offer::from_entity).transpose()?)
    }

    /// Offer with its game and owner, as shown in listings.
    pub async fn find_listing(&self, offer_id: i32) -> Result<Option<OfferListing>, AppError> {
        let rows = entity::prelude::MarketplaceOffer::find_by_id(offer_id)
            .find_also_related(entity::prelude::Game)
            .all(self.db)
            .await?;

        Ok(self.listings(rows).await?.pop())
    }

    /// Finds an active offer of `offer_type` for `game_id`.
    pub async fn find_active_for_game(
        &self,
        game_id: i32,
        offer_type: OfferType,
    ) -> Result<Option<Offer>, AppError> {
        let entity = entity::prelude::MarketplaceOffer::find()
            .filter(entity::marketplace_offer::Column::GameId.eq(game_id))
            .filter(entity::marketplace_offer::Column::OfferType.eq(offer_type.as_str()))
            .filter(entity::marketplace_offer::Column::Active.eq(true))
            .one(self.db)
            .await?;

        Ok(entity.map(Offer::from_entity).transpose()?)
    }

    /// Active offers matching `filter`, newest first, with game and owner.
    pub async fn get_active(&self, filter: OfferFilter) -> Result<Vec<OfferListing>, AppError> {
        let mut query = entity::prelude::MarketplaceOffer::find()
            .find_also_related(entity::prelude::Game)
            .filter(entity::marketplace_offer::Column::Active.eq(true));

        if let Some(offer_type) = filter.offer_type {
            query = query
                .filter(entity::marketplace_offer::Column::OfferType.eq(offer_type.as_str()));
        }
        if let Some(title) = filter.title {
            query = query.filter(contains_literal(entity::game::Column::Title, &title));
        }

        let rows = query
            .order_by_desc(entity::marketplace_offer::Column::CreatedAt)
            .order_by_desc(entity::marketplace_offer::Column::Id)
            .all(self.db)
            .await?;

        self.listings(rows).await
    }

    /// All offers of `owner_id`, active or not, newest first.
    pub async fn get_by_owner(&self, owner_id: i32) -> Result<Vec<OfferListing>, AppError> {
        let rows = entity::prelude::MarketplaceOffer::find()
            .find_also_related(entity::prelude::Game)
            .filter(entity::marketplace_offer::Column::OwnerId.eq(owner_id))
            .order_by_desc(entity::marketplace_offer::Column::CreatedAt)
            .order_by_desc(entity::marketplace_offer::Column::Id)
            .all(self.db)
            .await?;

        self.listings(rows).await
    }

    async fn listings(
        &self,
        rows: Vec<(entity::marketplace_offer::Model, Option<entity::game::Model>)>,
    ) -> Result<Vec<OfferListing>, AppError> {
        let owner_ids: Vec<i32> = rows.iter().map(|(offer, _)| offer.owner_id).collect();
        let owners = UserRepository::new(self.db).find_by_ids(&owner_ids).await?;

        rows.into_iter()
            .map(|(offer, game)| -> Result<OfferListing, AppError> {
                let game = game.ok_or(InternalError::MissingRelation {
                    table: "game",
                    id: offer.game_id,
                })?;
                let owner = owners.get(&offer.owner_id).cloned().ok_or(
                    InternalError::MissingRelation {
                        table: "user",
                        id: offer.owner_id,
                    },
                )?;
                Ok(OfferListing {
                    offer: Offer::from_entity(offer)?,
                    game_title: game.title,
                    game_image_path: game.image_path,
                    owner,
                })
            })
            .collect()
    }

    /// Replaces price, description and the active flag.
    pub async fn update(
        &self,
        offer_id: i32,
        params: UpdateOfferParams,
    ) -> Result<Option<Offer>, AppError> {
        let Some(offer) = entity::prelude::MarketplaceOffer::find_by_id(offer_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::marketplace_offer::ActiveModel = offer.into();
        active.price_cents = ActiveValue::Set(params.price_cents);
        active.description = ActiveValue::Set(params.description);
        active.active = ActiveValue::Set(params.active);
        let updated = active.update(self.db).await?;

        Ok(Some(Offer::from_entity(updated)?))
    }

    pub async fn delete(&self, offer_id: i32) -> Result<(), DbErr> {
        entity::prelude::MarketplaceOffer::delete_by_id(offer_id)
            .exec(self.db)
            .await?;
        Ok(())
    }
}

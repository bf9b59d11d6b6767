//! Marketplace of game offers and search ads, plus matching between the two.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{game::GameRepository, offer::OfferRepository, search_ad::SearchAdRepository},
    error::AppError,
    model::{
        marketplace::{
            CreateOfferParams, CreateSearchAdParams, Offer, OfferFilter, OfferListing, SearchAd,
            SearchAdFilter, SearchAdListing, UpdateOfferParams,
        },
        user::User,
    },
};

const MAX_TITLE_LENGTH: usize = 200;
const DUPLICATE_OFFER: &str = "This game already has an active offer of this type";

pub struct MarketplaceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MarketplaceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Puts one of the caller's games on the marketplace.
    ///
    /// # Returns
    /// - `Ok(OfferListing)` - Created offer with game and owner
    /// - `Err(AppError::NotFound)` - Game does not exist
    /// - `Err(AppError::Forbidden)` - Game belongs to someone else
    /// - `Err(AppError::BadRequest)` - Price does not fit the offer type
    /// - `Err(AppError::Conflict)` - An active offer of the same type exists for the game
    pub async fn create_offer(&self, params: CreateOfferParams) -> Result<OfferListing, AppError> {
        let game = GameRepository::new(self.db)
            .find_by_id(params.game_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))?;
        if game.owner_id != params.owner_id {
            return Err(AppError::Forbidden(
                "You can only offer games from your own library".to_string(),
            ));
        }
        params.offer_type.validate_price(params.price_cents)?;

        let repo = OfferRepository::new(self.db);
        if repo
            .find_active_for_game(params.game_id, params.offer_type)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(DUPLICATE_OFFER.to_string()));
        }

        let offer = repo.create(params).await?;
        tracing::debug!(
            "User {} offered game {} ({})",
            offer.owner_id,
            offer.game_id,
            offer.offer_type.as_str()
        );

        self.offer_listing(offer.id).await
    }

    pub async fn list_offers(&self, filter: OfferFilter) -> Result<Vec<OfferListing>, AppError> {
        OfferRepository::new(self.db).get_active(filter).await
    }

    pub async fn list_my_offers(&self, owner_id: i32) -> Result<Vec<OfferListing>, AppError> {
        OfferRepository::new(self.db).get_by_owner(owner_id).await
    }

    pub async fn get_offer(&self, offer_id: i32) -> Result<Offer, AppError> {
        OfferRepository::new(self.db)
            .find_by_id(offer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Offer not found".to_string()))
    }

    /// Changes price, description or the active flag of the caller's offer.
    ///
    /// Reactivating an offer is subject to the same one-active-offer-per-type rule as
    /// creating one.
    pub async fn update_offer(
        &self,
        user_id: i32,
        offer_id: i32,
        params: UpdateOfferParams,
    ) -> Result<OfferListing, AppError> {
        let offer = self.get_offer(offer_id).await?;
        if offer.owner_id != user_id {
            return Err(AppError::Forbidden(
                "You can only edit your own offers".to_string(),
            ));
        }
        offer.offer_type.validate_price(params.price_cents)?;

        let repo = OfferRepository::new(self.db);
        if params.active && !offer.active {
            let existing = repo
                .find_active_for_game(offer.game_id, offer.offer_type)
                .await?;
            if existing.is_some_and(|other| other.id != offer.id) {
                return Err(AppError::Conflict(DUPLICATE_OFFER.to_string()));
            }
        }

        repo.update(offer_id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Offer not found".to_string()))?;

        self.offer_listing(offer_id).await
    }

    /// Deletes an offer. Owners delete their own; platform admins may delete any.
    pub async fn delete_offer(&self, user: &User, offer_id: i32) -> Result<Offer, AppError> {
        let offer = self.get_offer(offer_id).await?;
        if offer.owner_id != user.id && !user.admin {
            return Err(AppError::Forbidden(
                "You can only delete your own offers".to_string(),
            ));
        }

        OfferRepository::new(self.db).delete(offer_id).await?;

        Ok(offer)
    }

    /// Publishes a search ad for a wanted game.
    ///
    /// # Returns
    /// - `Ok(SearchAdListing)` - Created ad with its author
    /// - `Err(AppError::BadRequest)` - Empty or overlong title, or a negative price limit
    pub async fn create_ad(
        &self,
        mut params: CreateSearchAdParams,
    ) -> Result<SearchAdListing, AppError> {
        params.game_title = params.game_title.trim().to_string();
        params.description = params.description.trim().to_string();

        if params.game_title.is_empty() {
            return Err(AppError::BadRequest("Game title is required".to_string()));
        }
        if params.game_title.chars().count() > MAX_TITLE_LENGTH {
            return Err(AppError::BadRequest(format!(
                "Game title cannot exceed {} characters",
                MAX_TITLE_LENGTH
            )));
        }
        if params.max_price_cents.is_some_and(|p| p < 0) {
            return Err(AppError::BadRequest(
                "Maximum price cannot be negative".to_string(),
            ));
        }

        let repo = SearchAdRepository::new(self.db);
        let ad = repo.create(params).await?;

        repo.find_listing(ad.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Search ad not found".to_string()))
    }

    pub async fn list_ads(&self, filter: SearchAdFilter) -> Result<Vec<SearchAdListing>, AppError> {
        SearchAdRepository::new(self.db).get_active(filter).await
    }

    pub async fn list_my_ads(&self, user_id: i32) -> Result<Vec<SearchAdListing>, AppError> {
        SearchAdRepository::new(self.db).get_by_user(user_id).await
    }

    pub async fn get_ad(&self, ad_id: i32) -> Result<SearchAd, AppError> {
        SearchAdRepository::new(self.db)
            .find_by_id(ad_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Search ad not found".to_string()))
    }

    /// Marks the caller's ad as no longer searching.
    pub async fn close_ad(&self, user_id: i32, ad_id: i32) -> Result<SearchAd, AppError> {
        let ad = self.owned_ad(user_id, ad_id).await?;

        SearchAdRepository::new(self.db)
            .set_active(ad_id, false)
            .await?;

        Ok(SearchAd { active: false, ..ad })
    }

    pub async fn delete_ad(&self, user: &User, ad_id: i32) -> Result<SearchAd, AppError> {
        let ad = self.get_ad(ad_id).await?;
        if ad.user_id != user.id && !user.admin {
            return Err(AppError::Forbidden(
                "You can only delete your own search ads".to_string(),
            ));
        }

        SearchAdRepository::new(self.db).delete(ad_id).await?;

        Ok(ad)
    }

    /// Active offers that satisfy a search ad, newest first.
    ///
    /// Offers are narrowed by the matching offer type and the ad's title in the query; owner
    /// and price rules are applied by `SearchAd::is_matched_by`.
    pub async fn matches(&self, ad_id: i32) -> Result<Vec<OfferListing>, AppError> {
        let ad = self.get_ad(ad_id).await?;

        let offers = OfferRepository::new(self.db)
            .get_active(OfferFilter {
                offer_type: Some(ad.ad_type.matching_offer_type()),
                title: Some(ad.game_title.clone()),
            })
            .await?;

        Ok(offers
            .into_iter()
            .filter(|listing| ad.is_matched_by(&listing.offer))
            .collect())
    }

    async fn offer_listing(&self, offer_id: i32) -> Result<OfferListing, AppError> {
        OfferRepository::new(self.db)
            .find_listing(offer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Offer not found".to_string()))
    }

    async fn owned_ad(&self, user_id: i32, ad_id: i32) -> Result<SearchAd, AppError> {
        let ad = self.get_ad(ad_id).await?;
        if ad.user_id != user_id {
            return Err(AppError::Forbidden(
                "You can only change your own search ads".to_string(),
            ));
        }
        Ok(ad)
    }
}

//! Search ad repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::{
    data::user::UserRepository,
    error::{internal::InternalError, AppError},
    model::marketplace::{CreateSearchAdParams, SearchAd, SearchAdFilter, SearchAdListing},
    util::db::contains_literal,
};

pub struct SearchAdRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SearchAdRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateSearchAdParams) -> Result<SearchAd, AppError> {
        let entity = entity::search_ad::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            game_title: ActiveValue::Set(params.game_title),
            ad_type: ActiveValue::Set(params.ad_type.as_str().to_string()),
            max_price_cents: ActiveValue::Set(params.max_price_cents),
            description: ActiveValue::Set(params.description),
            active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(SearchAd::from_entity(entity)?)
    }

    pub async fn find_by_id(&self, ad_id: i32) -> Result<Option<SearchAd>, AppError> {
        let entity = entity::prelude::SearchAd::find_by_id(ad_id)
            .one(self.db)
            .await?;

        Ok(entity.map(SearchAd::from_entity).transpose()?)
    }

    pub async fn find_listing(&self, ad_id: i32) -> Result<Option<SearchAdListing>, AppError> {
        let entities = entity::prelude::SearchAd::find_by_id(ad_id)
            .all(self.db)
            .await?;

        Ok(self.listings(entities).await?.pop())
    }

    /// Active ads matching `filter`, newest first.
    pub async fn get_active(
        &self,
        filter: SearchAdFilter,
    ) -> Result<Vec<SearchAdListing>, AppError> {
        let mut query = entity::prelude::SearchAd::find()
            .filter(entity::search_ad::Column::Active.eq(true));

        if let Some(ad_type) = filter.ad_type {
            query = query.filter(entity::search_ad::Column::AdType.eq(ad_type.as_str()));
        }
        if let Some(title) = filter.title {
            query = query.filter(contains_literal(entity::search_ad::Column::GameTitle, &title));
        }

        let entities = query
            .order_by_desc(entity::search_ad::Column::CreatedAt)
            .order_by_desc(entity::search_ad::Column::Id)
            .all(self.db)
            .await?;

        self.listings(entities).await
    }

    /// All ads of `user_id`, active or not, newest first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<SearchAdListing>, AppError> {
        let entities = entity::prelude::SearchAd::find()
            .filter(entity::search_ad::Column::UserId.eq(user_id))
            .order_by_desc(entity::search_ad::Column::CreatedAt)
            .order_by_desc(entity::search_ad::Column::Id)
            .all(self.db)
            .await?;

        self.listings(entities).await
    }

    async fn listings(
        &self,
        entities: Vec<entity::search_ad::Model>,
    ) -> Result<Vec<SearchAdListing>, AppError> {
        let user_ids: Vec<i32> = entities.iter().map(|ad| ad.user_id).collect();
        let users = UserRepository::new(self.db).find_by_ids(&user_ids).await?;

        entities
            .into_iter()
            .map(|ad| -> Result<SearchAdListing, AppError> {
                let user = users
                    .get(&ad.user_id)
                    .cloned()
                    .ok_or(InternalError::MissingRelation {
                        table: "user",
                        id: ad.user_id,
                    })?;
                Ok(SearchAdListing {
                    ad: SearchAd::from_entity(ad)?,
                    user,
                })
            })
            .collect()
    }

    pub async fn set_active(&self, ad_id: i32, active: bool) -> Result<(), DbErr> {
        entity::prelude::SearchAd::update_many()
            .filter(entity::search_ad::Column::Id.eq(ad_id))
            .col_expr(
                entity::search_ad::Column::Active,
                sea_orm::sea_query::Expr::value(active),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, ad_id: i32) -> Result<(), DbErr> {
        entity::prelude::SearchAd::delete_by_id(ad_id)
            .exec(self.db)
            .await?;
        Ok(())
    }
}

//! Friend requests and friend lists.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{friendship::FriendshipRepository, user::UserRepository},
    error::AppError,
    model::friend::{FriendEntry, Friendship, FriendshipStatus},
    util::db::map_app_unique_violation,
};

const REQUEST_PENDING: &str = "A friend request is already pending";

pub struct FriendService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FriendService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sends a friend request from `user_id` to `target_id`.
    ///
    /// # Returns
    /// - `Ok(FriendEntry)` - Pending request with the addressee
    /// - `Err(AppError::BadRequest)` - Request to self
    /// - `Err(AppError::NotFound)` - Target user does not exist
    /// - `Err(AppError::Conflict)` - Users are already friends or a request is pending in
    ///   either direction
    pub async fn send_request(&self, user_id: i32, target_id: i32) -> Result<FriendEntry, AppError> {
        if user_id == target_id {
            return Err(AppError::BadRequest(
                "You cannot send a friend request to yourself".to_string(),
            ));
        }
        if UserRepository::new(self.db)
            .find_by_id(target_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let repo = FriendshipRepository::new(self.db);
        if let Some(existing) = repo.find_between(user_id, target_id).await? {
            return Err(AppError::Conflict(match existing.status {
                FriendshipStatus::Accepted => "You are already friends".to_string(),
                FriendshipStatus::Pending => REQUEST_PENDING.to_string(),
            }));
        }

        // Concurrent requests between the same users both pass the check above; the pair
        // key rejects the later insert.
        let friendship = repo
            .create(user_id, target_id)
            .await
            .map_err(|e| map_app_unique_violation(e, REQUEST_PENDING))?;

        self.entry(user_id, friendship).await
    }

    /// Accepts a pending request addressed to `user_id`.
    pub async fn accept(&self, user_id: i32, friendship_id: i32) -> Result<FriendEntry, AppError> {
        let repo = FriendshipRepository::new(self.db);
        let friendship = self.find(friendship_id).await?;

        if friendship.addressee_id != user_id {
            return Err(AppError::Forbidden(
                "Only the recipient can accept a friend request".to_string(),
            ));
        }
        if friendship.status != FriendshipStatus::Pending {
            return Err(AppError::Conflict("You are already friends".to_string()));
        }

        repo.accept(friendship_id).await?;

        let accepted = Friendship {
            status: FriendshipStatus::Accepted,
            ..friendship
        };
        self.entry(user_id, accepted).await
    }

    /// Declines a request or ends a friendship. Either party may do this.
    pub async fn remove(&self, user_id: i32, friendship_id: i32) -> Result<Friendship, AppError> {
        let friendship = self.find(friendship_id).await?;
        if !friendship.involves(user_id) {
            return Err(AppError::NotFound("Friend request not found".to_string()));
        }

        FriendshipRepository::new(self.db)
            .delete(friendship_id)
            .await?;

        Ok(friendship)
    }

    pub async fn list_friends(&self, user_id: i32) -> Result<Vec<FriendEntry>, AppError> {
        let friendships = FriendshipRepository::new(self.db)
            .get_accepted(user_id)
            .await?;
        self.with_other_party(user_id, friendships).await
    }

    /// Pending requests as `(incoming, outgoing)`.
    pub async fn list_requests(
        &self,
        user_id: i32,
    ) -> Result<(Vec<FriendEntry>, Vec<FriendEntry>), AppError> {
        let repo = FriendshipRepository::new(self.db);
        let incoming = repo.get_incoming(user_id).await?;
        let outgoing = repo.get_outgoing(user_id).await?;

        Ok((
            self.with_other_party(user_id, incoming).await?,
            self.with_other_party(user_id, outgoing).await?,
        ))
    }

    async fn find(&self, friendship_id: i32) -> Result<Friendship, AppError> {
        FriendshipRepository::new(self.db)
            .find_by_id(friendship_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Friend request not found".to_string()))
    }

    async fn entry(&self, user_id: i32, friendship: Friendship) -> Result<FriendEntry, AppError> {
        self.with_other_party(user_id, vec![friendship])
            .await?
            .pop()
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    async fn with_other_party(
        &self,
        user_id: i32,
        friendships: Vec<Friendship>,
    ) -> Result<Vec<FriendEntry>, AppError> {
        let other_ids: Vec<i32> = friendships.iter().map(|f| f.other_party(user_id)).collect();
        let users = UserRepository::new(self.db).find_by_ids(&other_ids).await?;

        // Users deleted in the meantime are skipped
        Ok(friendships
            .into_iter()
            .filter_map(|friendship| {
                let user = users.get(&friendship.other_party(user_id))?.clone();
                Some(FriendEntry { friendship, user })
            })
            .collect())
    }
}

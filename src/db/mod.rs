/// Storage for users and their wardrobes
///
/// The engine only ever sees plain slices of items; these traits are the seam
/// between the use-cases and whatever keeps the data. The service ships with
/// in-memory implementations.
use chrono::NaiveTime;

use crate::{
    error::AppResult,
    models::{ClothingItem, ItemId, User, UserId},
};

pub mod memory;

pub use memory::{InMemoryUserRepository, InMemoryWardrobeRepository};

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user(&self, user_id: UserId) -> AppResult<Option<User>>;

    /// Insert or replace the user with the same id
    async fn upsert_user(&self, user: User) -> AppResult<()>;

    /// Returns false when there was nothing to delete
    async fn delete_user(&self, user_id: UserId) -> AppResult<bool>;

    /// Users who opted into season announcements, ordered by id
    async fn users_with_seasonal_notifications(&self) -> AppResult<Vec<User>>;

    /// Users whose daily notification falls in `start..=end`, ordered by id.
    /// The window wraps past midnight when `start > end`.
    async fn users_to_notify_between(
        &self,
        start: NaiveTime,
        end: NaiveTime,
    ) -> AppResult<Vec<User>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait WardrobeRepository: Send + Sync {
    /// All items owned by `user_id`, in a stable order
    async fn get_user_wardrobe(&self, user_id: UserId) -> AppResult<Vec<ClothingItem>>;

    async fn get_item(&self, item_id: ItemId) -> AppResult<Option<ClothingItem>>;

    /// Stores a new item under a freshly assigned id, ignoring `item.item_id`
    async fn add_item(&self, item: ClothingItem) -> AppResult<ItemId>;

    /// Replaces an existing item. Fails with `NotFound` if the id is unknown.
    async fn update_item(&self, item: ClothingItem) -> AppResult<()>;

    /// Returns false when there was nothing to delete
    async fn delete_item(&self, item_id: ItemId) -> AppResult<bool>;
}

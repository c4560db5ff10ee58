use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveTime;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{ClothingItem, ItemId, User, UserId},
};

use super::{UserRepository, WardrobeRepository};

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn matching(&self, keep: impl Fn(&User) -> bool) -> Vec<User> {
        let mut users: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .filter(|&user| keep(user))
            .cloned()
            .collect();
        users.sort_by_key(|user| user.user_id);
        users
    }
}

#[async_trait::async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn upsert_user(&self, user: User) -> AppResult<()> {
        self.users.write().await.insert(user.user_id, user);
        Ok(())
    }

    async fn delete_user(&self, user_id: UserId) -> AppResult<bool> {
        Ok(self.users.write().await.remove(&user_id).is_some())
    }

    async fn users_with_seasonal_notifications(&self) -> AppResult<Vec<User>> {
        Ok(self.matching(|user| user.season_notifications_enabled).await)
    }

    async fn users_to_notify_between(
        &self,
        start: NaiveTime,
        end: NaiveTime,
    ) -> AppResult<Vec<User>> {
        Ok(self
            .matching(|user| user.notifies_between(start, end))
            .await)
    }
}

/// Items keyed by id; ids are handed out sequentially starting at 1
#[derive(Debug)]
pub struct InMemoryWardrobeRepository {
    items: RwLock<BTreeMap<ItemId, ClothingItem>>,
    next_id: AtomicU64,
}

impl Default for InMemoryWardrobeRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryWardrobeRepository {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait::async_trait]
impl WardrobeRepository for InMemoryWardrobeRepository {
    async fn get_user_wardrobe(&self, user_id: UserId) -> AppResult<Vec<ClothingItem>> {
        let items = self.items.read().await;
        Ok(items
            .values()
            .filter(|item| item.owner_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_item(&self, item_id: ItemId) -> AppResult<Option<ClothingItem>> {
        Ok(self.items.read().await.get(&item_id).cloned())
    }

    async fn add_item(&self, mut item: ClothingItem) -> AppResult<ItemId> {
        let item_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        item.item_id = item_id;
        self.items.write().await.insert(item_id, item);
        Ok(item_id)
    }

    async fn update_item(&self, item: ClothingItem) -> AppResult<()> {
        let mut items = self.items.write().await;
        match items.get_mut(&item.item_id) {
            Some(existing) => {
                *existing = item;
                Ok(())
            }
            None => Err(AppError::NotFound(format!("item {}", item.item_id))),
        }
    }

    async fn delete_item(&self, item_id: ItemId) -> AppResult<bool> {
        Ok(self.items.write().await.remove(&item_id).is_some())
    }
}

use std::sync::Arc;

use crate::{
    db::{UserRepository, WardrobeRepository},
    error::{AppError, AppResult},
    models::{ClothingItem, ItemId, ItemPatch, NewClothingItem, User, UserId},
};

/// User registration and wardrobe upkeep
///
/// Every write is validated here so the engine can trust that an item's
/// subtype belongs to its category.
pub struct ManageWardrobe {
    users: Arc<dyn UserRepository>,
    wardrobe: Arc<dyn WardrobeRepository>,
}

impl ManageWardrobe {
    pub fn new(users: Arc<dyn UserRepository>, wardrobe: Arc<dyn WardrobeRepository>) -> Self {
        Self { users, wardrobe }
    }

    /// Creates the user or replaces the one with the same id.
    ///
    /// The last announced season is kept across replacements.
    pub async fn register_user(&self, mut user: User) -> AppResult<User> {
        if user.username.trim().is_empty() {
            return Err(AppError::InvalidInput("username must not be empty".to_string()));
        }
        if user.location.trim().is_empty() {
            return Err(AppError::InvalidInput("location must not be empty".to_string()));
        }
        if user.notifications_enabled && user.notification_time.is_none() {
            return Err(AppError::InvalidInput(
                "notification_time is required when notifications are enabled".to_string(),
            ));
        }

        if let Some(existing) = self.users.get_user(user.user_id).await? {
            user.last_season_notified = existing.last_season_notified;
        }

        self.users.upsert_user(user.clone()).await?;
        tracing::info!(user_id = user.user_id, "User registered");
        Ok(user)
    }

    pub async fn get_user(&self, user_id: UserId) -> AppResult<User> {
        self.users
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))
    }

    /// Removes the user together with their wardrobe
    pub async fn delete_user(&self, user_id: UserId) -> AppResult<()> {
        self.get_user(user_id).await?;

        let items = self.wardrobe.get_user_wardrobe(user_id).await?;
        for item in &items {
            self.wardrobe.delete_item(item.item_id).await?;
        }
        self.users.delete_user(user_id).await?;

        tracing::info!(user_id, items = items.len(), "User deleted");
        Ok(())
    }

    pub async fn list_items(&self, user_id: UserId) -> AppResult<Vec<ClothingItem>> {
        self.get_user(user_id).await?;
        self.wardrobe.get_user_wardrobe(user_id).await
    }

    pub async fn add_item(&self, user_id: UserId, new_item: NewClothingItem) -> AppResult<ClothingItem> {
        self.get_user(user_id).await?;

        let mut item = new_item.into_item(user_id);
        validate(&item)?;

        item.item_id = self.wardrobe.add_item(item.clone()).await?;
        tracing::info!(
            user_id,
            item_id = item.item_id,
            subtype = ?item.subtype,
            "Wardrobe item added"
        );
        Ok(item)
    }

    /// Applies `patch` and re-validates the result before storing it
    pub async fn update_item(
        &self,
        user_id: UserId,
        item_id: ItemId,
        patch: ItemPatch,
    ) -> AppResult<ClothingItem> {
        if patch.is_empty() {
            return Err(AppError::InvalidInput("patch has no fields set".to_string()));
        }

        let mut item = self.owned_item(user_id, item_id).await?;
        patch.apply(&mut item);
        validate(&item)?;

        self.wardrobe.update_item(item.clone()).await?;
        tracing::info!(user_id, item_id, "Wardrobe item updated");
        Ok(item)
    }

    pub async fn delete_item(&self, user_id: UserId, item_id: ItemId) -> AppResult<()> {
        self.owned_item(user_id, item_id).await?;
        if !self.wardrobe.delete_item(item_id).await? {
            return Err(AppError::NotFound(format!("item {}", item_id)));
        }
        tracing::info!(user_id, item_id, "Wardrobe item deleted");
        Ok(())
    }

    /// Items of other users are reported as missing
    async fn owned_item(&self, user_id: UserId, item_id: ItemId) -> AppResult<ClothingItem> {
        match self.wardrobe.get_item(item_id).await? {
            Some(item) if item.owner_id == user_id => Ok(item),
            _ => Err(AppError::NotFound(format!("item {}", item_id))),
        }
    }
}

fn validate(item: &ClothingItem) -> AppResult<()> {
    if item.name.trim().is_empty() {
        return Err(AppError::InvalidInput("item name must not be empty".to_string()));
    }
    if !item.is_consistent() {
        return Err(AppError::InvalidInput(format!(
            "subtype {:?} does not belong to category {:?}",
            item.subtype, item.category
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{
        InMemoryUserRepository, InMemoryWardrobeRepository, MockUserRepository,
        MockWardrobeRepository,
    };
    use crate::models::{ClothingCategory, ClothingSubtype, Color, TopGroup};

    async fn service_with_user() -> ManageWardrobe {
        let service = ManageWardrobe::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryWardrobeRepository::new()),
        );
        service
            .register_user(User::new(1, "anna", "Moscow"))
            .await
            .unwrap();
        service
    }

    fn new_item(subtype: ClothingSubtype) -> NewClothingItem {
        NewClothingItem {
            name: "item".to_string(),
            image_id: None,
            category: None,
            subtype,
            main_color: Color::Black,
            style: None,
            warmth_level: None,
            is_waterproof: false,
            is_windproof: false,
        }
    }

    #[tokio::test]
    async fn test_add_and_list_items() {
        let service = service_with_user().await;

        let shirt = service.add_item(1, new_item(ClothingSubtype::Shirt)).await.unwrap();
        service.add_item(1, new_item(ClothingSubtype::Jeans)).await.unwrap();

        assert_eq!(shirt.item_id, 1);
        assert_eq!(shirt.top_group(), Some(TopGroup::Transformable));
        assert_eq!(service.list_items(1).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_add_rejects_mismatched_category() {
        let service = service_with_user().await;
        let mut item = new_item(ClothingSubtype::Jeans);
        item.category = Some(ClothingCategory::Top);

        assert!(matches!(
            service.add_item(1, item).await,
            Err(AppError::InvalidInput(_))
        ));
        assert!(service.list_items(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_for_unknown_user() {
        let service = service_with_user().await;
        assert!(matches!(
            service.add_item(2, new_item(ClothingSubtype::Jeans)).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_subtype_change_moves_top_group() {
        let service = service_with_user().await;
        let item = service.add_item(1, new_item(ClothingSubtype::Tshirt)).await.unwrap();
        assert_eq!(item.top_group(), Some(TopGroup::Base));

        let patch = ItemPatch {
            subtype: Some(ClothingSubtype::Hoodie),
            ..Default::default()
        };
        let updated = service.update_item(1, item.item_id, patch).await.unwrap();
        assert_eq!(updated.top_group(), Some(TopGroup::FinalLayer));

        // subtype to another category moves the item with it
        let patch = ItemPatch {
            subtype: Some(ClothingSubtype::Trench),
            ..Default::default()
        };
        let updated = service.update_item(1, item.item_id, patch).await.unwrap();
        assert_eq!(updated.category, ClothingCategory::Outerwear);
        assert_eq!(updated.top_group(), None);
    }

    #[tokio::test]
    async fn test_update_rejects_inconsistent_patch() {
        let service = service_with_user().await;
        let item = service.add_item(1, new_item(ClothingSubtype::Tshirt)).await.unwrap();

        let patch = ItemPatch {
            category: Some(ClothingCategory::Bottom),
            ..Default::default()
        };
        assert!(matches!(
            service.update_item(1, item.item_id, patch).await,
            Err(AppError::InvalidInput(_))
        ));

        let stored = service.list_items(1).await.unwrap();
        assert_eq!(stored[0].category, ClothingCategory::Top);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_or_foreign_items() {
        let service = service_with_user().await;
        service
            .register_user(User::new(2, "boris", "Kazan"))
            .await
            .unwrap();
        let item = service.add_item(1, new_item(ClothingSubtype::Tshirt)).await.unwrap();
        let patch = ItemPatch {
            main_color: Some(Color::Red),
            ..Default::default()
        };

        assert!(matches!(
            service.update_item(1, 99, patch.clone()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.update_item(2, item.item_id, patch).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_item(2, item.item_id).await,
            Err(AppError::NotFound(_))
        ));

        service.delete_item(1, item.item_id).await.unwrap();
        assert!(matches!(
            service.delete_item(1, item.item_id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_patch_rejected() {
        let service = service_with_user().await;
        assert!(matches!(
            service.update_item(1, 1, ItemPatch::default()).await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_register_validates_user() {
        let service = service_with_user().await;
        assert!(matches!(
            service.register_user(User::new(3, " ", "Moscow")).await,
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            service.get_user(3).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_register_requires_time_for_daily_notifications() {
        let service = service_with_user().await;
        let mut user = User::new(2, "boris", "Kazan");
        user.notifications_enabled = true;
        assert!(matches!(
            service.register_user(user.clone()).await,
            Err(AppError::InvalidInput(_))
        ));

        user.notification_time = chrono::NaiveTime::from_hms_opt(8, 0, 0);
        assert!(service.register_user(user).await.is_ok());
    }

    #[tokio::test]
    async fn test_reregistering_keeps_last_announced_season() {
        let users = Arc::new(InMemoryUserRepository::new());
        let service = ManageWardrobe::new(users.clone(), Arc::new(InMemoryWardrobeRepository::new()));
        let mut stored = User::new(1, "anna", "Moscow");
        stored.last_season_notified = Some(crate::models::Season::Winter);
        users.upsert_user(stored).await.unwrap();

        let replaced = service
            .register_user(User::new(1, "anna", "Kazan"))
            .await
            .unwrap();
        assert_eq!(replaced.location, "Kazan");
        assert_eq!(replaced.last_season_notified, Some(crate::models::Season::Winter));
    }

    #[tokio::test]
    async fn test_delete_user_removes_wardrobe() {
        let wardrobe = Arc::new(InMemoryWardrobeRepository::new());
        let service = ManageWardrobe::new(Arc::new(InMemoryUserRepository::new()), wardrobe.clone());
        service.register_user(User::new(1, "anna", "Moscow")).await.unwrap();
        service.register_user(User::new(2, "boris", "Kazan")).await.unwrap();
        service.add_item(1, new_item(ClothingSubtype::Tshirt)).await.unwrap();
        service.add_item(2, new_item(ClothingSubtype::Jeans)).await.unwrap();

        service.delete_user(1).await.unwrap();

        assert!(matches!(service.get_user(1).await, Err(AppError::NotFound(_))));
        assert!(wardrobe.get_user_wardrobe(1).await.unwrap().is_empty());
        assert_eq!(service.list_items(2).await.unwrap().len(), 1);
        assert!(matches!(service.delete_user(1).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let mut users = MockUserRepository::new();
        users
            .expect_get_user()
            .returning(|id| Ok(Some(User::new(id, "anna", "Moscow"))));
        let mut wardrobe = MockWardrobeRepository::new();
        wardrobe
            .expect_add_item()
            .times(1)
            .returning(|_| Err(AppError::Storage("disk full".to_string())));

        let service = ManageWardrobe::new(Arc::new(users), Arc::new(wardrobe));
        assert!(matches!(
            service.add_item(1, new_item(ClothingSubtype::Jeans)).await,
            Err(AppError::Storage(_))
        ));
    }
}

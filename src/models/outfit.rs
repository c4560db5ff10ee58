use serde::Serialize;

use super::{ClothingCategory, ClothingItem, ItemId, TopGroup};

/// A wardrobe item paired with its relevance for the current request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredItem {
    pub item: ClothingItem,
    pub score: f64,
}

impl ScoredItem {
    pub fn new(item: ClothingItem, score: f64) -> Self {
        Self { item, score }
    }
}

/// One required position in an outfit
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub struct Slot {
    pub category: ClothingCategory,
    pub top_group: Option<TopGroup>,
}

impl Slot {
    pub const fn top(group: TopGroup) -> Self {
        Self {
            category: ClothingCategory::Top,
            top_group: Some(group),
        }
    }

    pub const fn bottom() -> Self {
        Self {
            category: ClothingCategory::Bottom,
            top_group: None,
        }
    }

    pub const fn outerwear() -> Self {
        Self {
            category: ClothingCategory::Outerwear,
            top_group: None,
        }
    }

    /// Slot key an item is filed under
    pub fn of(item: &ClothingItem) -> Self {
        Self {
            category: item.category,
            top_group: item.top_group(),
        }
    }

    pub fn accepts(&self, item: &ClothingItem) -> bool {
        Self::of(item) == *self
    }
}

/// An outfit shape: the ordered slots one outfit must fill
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub slots: &'static [Slot],
}

impl Template {
    pub const fn new(name: &'static str, slots: &'static [Slot]) -> Self {
        Self { name, slots }
    }
}

/// Sorted member item ids, the identity of an outfit
pub type Signature = Vec<ItemId>;

/// A composed outfit. `items[i]` fills `slots[i]`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Outfit {
    pub template: &'static str,
    pub slots: Vec<Slot>,
    pub items: Vec<ClothingItem>,
}

impl Outfit {
    pub fn signature(&self) -> Signature {
        let mut ids: Signature = self.items.iter().map(|item| item.item_id).collect();
        ids.sort_unstable();
        ids
    }
}

/// An outfit with its final ranking score
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredOutfit {
    pub outfit: Outfit,
    pub score: f64,
}

use serde::{Deserialize, Serialize};

use super::{ItemId, UserId};

/// Broad garment category, one per outfit slot kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ClothingCategory {
    Outerwear,
    Top,
    Bottom,
}

/// Layering role of a top, drives which combinations a template accepts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TopGroup {
    /// Worn alone as a full outfit top (dresses, rompers)
    Onepiece,
    /// Worn over a base layer, under outerwear (vests, blazers)
    Layered,
    /// Can be worn open over a base or closed on its own (shirts, zip-ups)
    Transformable,
    /// Innermost layer
    Base,
    /// Outermost non-outerwear layer (sweaters, hoodies)
    FinalLayer,
}

/// Fine-grained garment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ClothingSubtype {
    // Tops
    Dress,
    Romper,
    Vest,
    Blazer,
    Shirt,
    ZipHoodie,
    Cardigan,
    Tshirt,
    Longsleeve,
    TankTop,
    Hoodie,
    Sweater,

    // Bottoms
    Jeans,
    Trousers,
    Sweatpants,
    Shorts,
    Skirt,
    Capris,

    // Outerwear
    Coat,
    Jacket,
    Bomber,
    Trench,
    Puffer,
    Windbreaker,
}

impl ClothingSubtype {
    /// Category this subtype belongs to
    pub const fn category(self) -> ClothingCategory {
        use ClothingSubtype::*;
        match self {
            Dress | Romper | Vest | Blazer | Shirt | ZipHoodie | Cardigan | Tshirt | Longsleeve
            | TankTop | Hoodie | Sweater => ClothingCategory::Top,
            Jeans | Trousers | Sweatpants | Shorts | Skirt | Capris => ClothingCategory::Bottom,
            Coat | Jacket | Bomber | Trench | Puffer | Windbreaker => ClothingCategory::Outerwear,
        }
    }

    /// Static subtype → top group table. `None` for non-top subtypes.
    pub const fn top_group(self) -> Option<TopGroup> {
        use ClothingSubtype::*;
        match self {
            Dress | Romper => Some(TopGroup::Onepiece),
            Vest | Blazer => Some(TopGroup::Layered),
            Shirt | ZipHoodie | Cardigan => Some(TopGroup::Transformable),
            Tshirt | Longsleeve | TankTop => Some(TopGroup::Base),
            Hoodie | Sweater => Some(TopGroup::FinalLayer),
            _ => None,
        }
    }
}

/// Main color palette
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    White,
    Grey,
    Beige,
    Brown,
    Khaki,
    Navy,
    Blue,
    Green,
    Red,
    Yellow,
    Orange,
    Pink,
    Purple,
    Multicolor,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Casual,
    Official,
    Sport,
    Party,
    Street,
    Outdoor,
}

impl Style {
    /// Styles that mix well with this one
    pub fn similar(self) -> &'static [Style] {
        use Style::*;
        match self {
            Official => &[Casual],
            Casual => &[Official, Street, Sport],
            Sport => &[Casual, Street, Outdoor],
            Party => &[Casual, Official, Street],
            Street => &[Casual, Sport],
            Outdoor => &[Casual, Sport, Street],
        }
    }
}

/// Ordinal warmth of a garment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum WarmthLevel {
    Light,
    Medium,
    Warm,
    VeryWarm,
}

impl WarmthLevel {
    /// light/medium/warm/very_warm → 1/2/3/4
    pub const fn ordinal(self) -> u8 {
        match self {
            WarmthLevel::Light => 1,
            WarmthLevel::Medium => 2,
            WarmthLevel::Warm => 3,
            WarmthLevel::VeryWarm => 4,
        }
    }
}

/// A garment in a user's wardrobe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClothingItem {
    pub item_id: ItemId,
    pub owner_id: UserId,
    pub name: String,
    #[serde(default)]
    pub image_id: Option<String>,
    pub category: ClothingCategory,
    pub subtype: ClothingSubtype,
    pub main_color: Color,
    #[serde(default = "default_style")]
    pub style: Style,
    #[serde(default = "default_warmth")]
    pub warmth_level: WarmthLevel,
    #[serde(default)]
    pub is_waterproof: bool,
    #[serde(default)]
    pub is_windproof: bool,
}

fn default_style() -> Style {
    Style::Casual
}

fn default_warmth() -> WarmthLevel {
    WarmthLevel::Medium
}

impl ClothingItem {
    /// Creates an item whose category is taken from the subtype
    pub fn new(
        item_id: ItemId,
        owner_id: UserId,
        name: impl Into<String>,
        subtype: ClothingSubtype,
        main_color: Color,
    ) -> Self {
        Self {
            item_id,
            owner_id,
            name: name.into(),
            image_id: None,
            category: subtype.category(),
            subtype,
            main_color,
            style: default_style(),
            warmth_level: default_warmth(),
            is_waterproof: false,
            is_windproof: false,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_warmth(mut self, warmth_level: WarmthLevel) -> Self {
        self.warmth_level = warmth_level;
        self
    }

    pub fn with_protection(mut self, waterproof: bool, windproof: bool) -> Self {
        self.is_waterproof = waterproof;
        self.is_windproof = windproof;
        self
    }

    /// Layering group, present only for tops.
    ///
    /// Always derived from `category` and `subtype`, so it cannot drift when
    /// either field changes.
    pub fn top_group(&self) -> Option<TopGroup> {
        match self.category {
            ClothingCategory::Top => self.subtype.top_group(),
            _ => None,
        }
    }

    /// True when the subtype belongs to the declared category
    pub fn is_consistent(&self) -> bool {
        self.subtype.category() == self.category
    }
}

/// Partial update for a wardrobe item. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_id: Option<String>,
    #[serde(default)]
    pub category: Option<ClothingCategory>,
    #[serde(default)]
    pub subtype: Option<ClothingSubtype>,
    #[serde(default)]
    pub main_color: Option<Color>,
    #[serde(default)]
    pub style: Option<Style>,
    #[serde(default)]
    pub warmth_level: Option<WarmthLevel>,
    #[serde(default)]
    pub is_waterproof: Option<bool>,
    #[serde(default)]
    pub is_windproof: Option<bool>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies every set field to `item`.
    ///
    /// Changing the subtype without naming a category moves the item to the
    /// subtype's category.
    pub fn apply(&self, item: &mut ClothingItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(image_id) = &self.image_id {
            item.image_id = Some(image_id.clone());
        }
        if let Some(subtype) = self.subtype {
            item.subtype = subtype;
            if self.category.is_none() {
                item.category = subtype.category();
            }
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(color) = self.main_color {
            item.main_color = color;
        }
        if let Some(style) = self.style {
            item.style = style;
        }
        if let Some(warmth) = self.warmth_level {
            item.warmth_level = warmth;
        }
        if let Some(waterproof) = self.is_waterproof {
            item.is_waterproof = waterproof;
        }
        if let Some(windproof) = self.is_windproof {
            item.is_windproof = windproof;
        }
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

mod clothing_item;
mod outfit;
mod season;
mod user;
mod weather;

pub use clothing_item::{
    ClothingCategory, ClothingItem, ClothingSubtype, Color, ItemPatch, Style, TopGroup,
    WarmthLevel,
};
pub use outfit::{Outfit, ScoredItem, ScoredOutfit, Signature, Slot, Template};
pub use season::Season;
pub use user::{ColdSensitivity, User};
pub use weather::{ColdnessLevel, TemperaturePeriod, WeatherSnapshot};

/// Identifier of a wardrobe item
pub type ItemId = u64;

/// Identifier of a user
pub type UserId = u64;

// ============================================================================
// Use-case request / response types
// ============================================================================

/// Request to compose outfits for a user
#[derive(Debug, Clone, Deserialize)]
pub struct BuildOutfitRequest {
    pub date: NaiveDate,
    /// Overrides the user's home location
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub style: Option<Style>,
    #[serde(default = "default_count_max")]
    pub count_max: usize,
    /// Pins the sampler for reproducible results
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_count_max() -> usize {
    1
}

/// A garment as submitted by a user, before it has an id or owner
#[derive(Debug, Clone, Deserialize)]
pub struct NewClothingItem {
    pub name: String,
    #[serde(default)]
    pub image_id: Option<String>,
    /// Taken from the subtype when omitted
    #[serde(default)]
    pub category: Option<ClothingCategory>,
    pub subtype: ClothingSubtype,
    pub main_color: Color,
    #[serde(default)]
    pub style: Option<Style>,
    #[serde(default)]
    pub warmth_level: Option<WarmthLevel>,
    #[serde(default)]
    pub is_waterproof: bool,
    #[serde(default)]
    pub is_windproof: bool,
}

impl NewClothingItem {
    /// Item owned by `owner_id`. The id is left at 0 for storage to assign.
    pub fn into_item(self, owner_id: UserId) -> ClothingItem {
        let mut item = ClothingItem::new(0, owner_id, self.name, self.subtype, self.main_color)
            .with_protection(self.is_waterproof, self.is_windproof);
        item.image_id = self.image_id;
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(style) = self.style {
            item.style = style;
        }
        if let Some(warmth) = self.warmth_level {
            item.warmth_level = warmth;
        }
        item
    }
}

/// Condensed weather facts shown alongside a recommendation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeatherSummary {
    pub city: String,
    pub date: NaiveDate,
    pub temp_morning: i32,
    pub temp_day: i32,
    pub temp_evening: i32,
    pub is_rain: bool,
    pub is_snow: bool,
    pub is_windy: bool,
    pub coldness_level: ColdnessLevel,
}

/// Everything returned by an outfit build
#[derive(Debug, Clone, Serialize)]
pub struct BuildOutfitResponse {
    /// Ranked best-first. Empty when nothing could be composed.
    pub outfits: Vec<ScoredOutfit>,
    pub weather: WeatherSummary,
    /// Accessories worth taking along
    pub take_with: Vec<String>,
}

/// Weather report with advice, independent of any wardrobe
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub summary: WeatherSummary,
    pub take_with: Vec<String>,
    /// Season that is starting or about to start, if worth announcing
    pub season_notice: Option<Season>,
}

/// A season announcement due for one user
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SeasonMailResult {
    pub user_id: UserId,
    pub season: Season,
}

//! Static outfit shapes per coldness level.
//!
//! Authored once as configuration: the number of layers that make sense at
//! each temperature band. Nothing here is computed at runtime.

use crate::models::{ColdnessLevel, Slot, Template, TopGroup};

const BASE: Slot = Slot::top(TopGroup::Base);
const LAYERED: Slot = Slot::top(TopGroup::Layered);
const TRANSFORMABLE: Slot = Slot::top(TopGroup::Transformable);
const FINAL_LAYER: Slot = Slot::top(TopGroup::FinalLayer);
const ONEPIECE: Slot = Slot::top(TopGroup::Onepiece);
const BOTTOM: Slot = Slot::bottom();
const OUTERWEAR: Slot = Slot::outerwear();

const HOT: &[Template] = &[
    Template::new("base_bottom", &[BASE, BOTTOM]),
    Template::new("transformable_bottom", &[TRANSFORMABLE, BOTTOM]),
    Template::new("onepiece", &[ONEPIECE]),
];

const MILD: &[Template] = &[
    Template::new("base_transformable_bottom", &[BASE, TRANSFORMABLE, BOTTOM]),
    Template::new("base_final_bottom", &[BASE, FINAL_LAYER, BOTTOM]),
    Template::new("base_bottom_outerwear", &[BASE, BOTTOM, OUTERWEAR]),
    Template::new("transformable_bottom", &[TRANSFORMABLE, BOTTOM]),
    Template::new("onepiece_outerwear", &[ONEPIECE, OUTERWEAR]),
];

const COLD: &[Template] = &[
    Template::new(
        "base_final_bottom_outerwear",
        &[BASE, FINAL_LAYER, BOTTOM, OUTERWEAR],
    ),
    Template::new(
        "base_transformable_bottom_outerwear",
        &[BASE, TRANSFORMABLE, BOTTOM, OUTERWEAR],
    ),
    Template::new(
        "base_layered_bottom_outerwear",
        &[BASE, LAYERED, BOTTOM, OUTERWEAR],
    ),
    Template::new("onepiece_final_outerwear", &[ONEPIECE, FINAL_LAYER, OUTERWEAR]),
];

const VERY_COLD: &[Template] = &[
    Template::new(
        "base_final_bottom_outerwear",
        &[BASE, FINAL_LAYER, BOTTOM, OUTERWEAR],
    ),
    Template::new(
        "base_layered_final_bottom_outerwear",
        &[BASE, LAYERED, FINAL_LAYER, BOTTOM, OUTERWEAR],
    ),
    Template::new(
        "base_transformable_bottom_outerwear",
        &[BASE, TRANSFORMABLE, BOTTOM, OUTERWEAR],
    ),
];

/// Coldness level → candidate outfit shapes
#[derive(Debug)]
pub struct TemplateCatalog {
    levels: [&'static [Template]; 4],
}

impl TemplateCatalog {
    /// `levels[0]` holds the hot templates, `levels[3]` the very cold ones
    pub const fn new(levels: [&'static [Template]; 4]) -> Self {
        Self { levels }
    }

    pub fn templates_for(&self, level: ColdnessLevel) -> &'static [Template] {
        self.levels[usize::from(level.as_u8() - 1)]
    }
}

pub static DEFAULT_CATALOG: TemplateCatalog = TemplateCatalog::new([HOT, MILD, COLD, VERY_COLD]);

/// Outerwear warmth ordinal that fits each coldness level
pub const fn target_outerwear_warmth(level: ColdnessLevel) -> u8 {
    match level {
        ColdnessLevel::Hot => 1,
        ColdnessLevel::Mild => 2,
        ColdnessLevel::Cold => 3,
        ColdnessLevel::VeryCold => 4,
    }
}

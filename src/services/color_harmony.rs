use crate::models::{ClothingItem, Color};

/// Coarse color families used for harmony scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorBucket {
    Neutral,
    Soft,
    Bright,
    Multicolor,
}

pub const fn bucket_of(color: Color) -> ColorBucket {
    use Color::*;
    match color {
        Black | White | Grey | Beige | Brown | Khaki => ColorBucket::Neutral,
        Navy | Blue | Green => ColorBucket::Soft,
        Red | Yellow | Orange | Pink | Purple => ColorBucket::Bright,
        Multicolor => ColorBucket::Multicolor,
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct BucketCounts {
    neutral: usize,
    soft: usize,
    bright: usize,
    multi: usize,
}

impl BucketCounts {
    fn tally<'a>(items: impl IntoIterator<Item = &'a ClothingItem>) -> Self {
        let mut counts = Self::default();
        for item in items {
            match bucket_of(item.main_color) {
                ColorBucket::Neutral => counts.neutral += 1,
                ColorBucket::Soft => counts.soft += 1,
                ColorBucket::Bright => counts.bright += 1,
                ColorBucket::Multicolor => counts.multi += 1,
            }
        }
        counts
    }

    fn distinct(&self) -> usize {
        [self.neutral, self.soft, self.bright, self.multi]
            .iter()
            .filter(|&&n| n > 0)
            .count()
    }
}

/// Color coherence of a set of items in `[-1.0, 1.0]`.
///
/// Rewards a neutral base with at most one accent, penalises clashing
/// brights and stacked multicolor pieces. No items score `0.0`.
pub fn color_harmony<'a>(items: impl IntoIterator<Item = &'a ClothingItem>) -> f64 {
    let counts = BucketCounts::tally(items);
    if counts == BucketCounts::default() {
        return 0.0;
    }

    let mut raw = 0.3 * counts.neutral.min(3) as f64;

    raw += match counts.bright {
        0 => 0.2,
        1 => 0.8,
        2 => 0.2,
        _ => -0.8,
    };

    if counts.soft > 0 {
        raw += 0.2 * counts.soft.min(2) as f64;
        if counts.neutral == 0 && counts.bright >= 2 {
            raw -= 0.3;
        }
    }

    if (counts.multi == 1 && counts.bright >= 2) || counts.multi >= 2 {
        raw -= 1.0;
    }

    if counts.distinct() >= 4 {
        raw -= 0.5;
    }

    (raw / 2.0).clamp(-1.0, 1.0)
}

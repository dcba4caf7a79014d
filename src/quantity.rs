//! Per-card print quantity resolution.
//!
//! A card's quantity comes from the config, looked up first by file stem and
//! then by full file name, so `hero=3` and `hero.png=3` both work:
//!
//! | Config | File | Quantity |
//! |--------|------|----------|
//! | *(none)* | `hero.png` | 1 |
//! | `hero=3` | `hero.png` | 3 |
//! | `hero.png=2` | `hero.png` | 2 |
//! | `hero=3`, `hero.png=2` | `hero.png` | 3 (stem wins) |
//! | `hero=lots` | `hero.png` | 1 (warning) |
//! | `hero=99999999999` | `hero.png` | 1 (warning, out of 32-bit range) |
//! | `hero=0` or `hero=-2` | `hero.png` | 1 (clamped) |

use crate::config::OrderConfig;
use serde::Serialize;

/// Smallest quantity a card may have.
pub const MIN_QUANTITY: u32 = 1;

/// Where a resolved quantity came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantitySource {
    /// No override found.
    Default,
    /// Matched by file stem.
    Stem,
    /// Matched by full file name.
    FileName,
    /// An override was found but was not an integer.
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub quantity: u32,
    pub source: QuantitySource,
}

impl Resolution {
    fn default_quantity() -> Self {
        Self {
            quantity: MIN_QUANTITY,
            source: QuantitySource::Default,
        }
    }
}

/// Resolve the print quantity for `file_name` (`stem` is its name without extension).
///
/// Without a config every card gets [`MIN_QUANTITY`].
pub fn resolve_quantity(file_name: &str, stem: &str, config: Option<&OrderConfig>) -> Resolution {
    let Some(config) = config else {
        return Resolution::default_quantity();
    };

    let (raw, source) = if let Some(v) = config.get(stem) {
        (v, QuantitySource::Stem)
    } else if let Some(v) = config.get(file_name) {
        (v, QuantitySource::FileName)
    } else {
        return Resolution::default_quantity();
    };

    match raw.parse::<i32>() {
        Ok(n) => Resolution {
            quantity: clamp_quantity(n),
            source,
        },
        Err(_) => {
            tracing::warn!("Failed to parse quantity for card {stem}: {raw:?} is not a number");
            Resolution {
                quantity: MIN_QUANTITY,
                source: QuantitySource::Invalid(raw.to_string()),
            }
        }
    }
}

fn clamp_quantity(n: i32) -> u32 {
    n.max(MIN_QUANTITY as i32).unsigned_abs()
}

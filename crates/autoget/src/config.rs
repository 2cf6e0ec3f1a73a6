use serde::{Deserialize, Serialize};

/// Global switches resolved by the host's settings system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GlobalToggles {
    /// Master switch for per-blueprint overrides and the item menu action.
    pub enable_exclusions: bool,
    pub autoget_special_items: bool,
    pub autoget_artifacts: bool,
    pub autoget_trade_goods: bool,
    pub autoget_food: bool,
    pub autoget_books: bool,
    pub autoget_fresh_water: bool,
    pub autoget_zero_weight: bool,
    pub autoget_nuggets: bool,
    pub autoget_scrap: bool,
}

impl Default for GlobalToggles {
    fn default() -> Self {
        Self {
            enable_exclusions: true,
            autoget_special_items: false,
            autoget_artifacts: false,
            autoget_trade_goods: false,
            autoget_food: false,
            autoget_books: false,
            autoget_fresh_water: false,
            autoget_zero_weight: false,
            autoget_nuggets: false,
            autoget_scrap: false,
        }
    }
}

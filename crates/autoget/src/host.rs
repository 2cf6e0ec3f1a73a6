//! Seams the host game implements so the policy core can read items, ask the
//! host's own eligibility rules and put a confirmation in front of the user.

use crate::gate::EvalContext;

/// Tag or property carried by gold nuggets and similar currency items.
pub const NUGGET_TAG: &str = "Nugget";

/// Transient property the host sets on items the player dropped on purpose.
pub const DROPPED_BY_PLAYER_PROPERTY: &str = "DroppedByPlayer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryCategory {
    TradeGoods,
    Food,
    Books,
    Other,
}

impl InventoryCategory {
    /// Maps a host category label to a category. Labels match exactly; an
    /// empty label means the item has no category at all.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "" => None,
            "Trade Goods" => Some(Self::TradeGoods),
            "Food" => Some(Self::Food),
            "Books" => Some(Self::Books),
            _ => Some(Self::Other),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TradeGoods => "Trade Goods",
            Self::Food => "Food",
            Self::Books => "Books",
            Self::Other => "Other",
        }
    }
}

/// Read-only view of one item instance.
pub trait AutogetItem {
    /// Blueprint shared by every instance of this kind of item.
    fn blueprint(&self) -> &str;

    fn display_name(&self) -> &str {
        self.blueprint()
    }

    fn weight(&self) -> f64;

    fn inventory_category(&self) -> Option<InventoryCategory>;

    fn has_tag_or_property(&self, name: &str) -> bool;

    fn is_identified(&self) -> bool;

    fn is_special(&self) -> bool;

    /// Only artifact-capable items expose a complexity.
    fn examination_complexity(&self) -> Option<u32>;

    fn contains_fresh_water(&self) -> bool;

    fn dropped_by_player(&self) -> bool {
        self.has_tag_or_property(DROPPED_BY_PLAYER_PROPERTY)
    }
}

/// Host-owned rules the policy consults but does not define.
pub trait HostRules {
    type Item: AutogetItem;

    /// Base "can this be lifted at all" check. Implementations that look at
    /// drop provenance must skip it when `ctx.ignore_drop_provenance()` is
    /// set, and must go through `ctx.is_disabled` for any override lookup.
    fn can_autoget(&self, item: &Self::Item, ctx: &EvalContext<'_>) -> bool;

    /// Salvage classification, consulted last.
    fn consider_scrap(&self, item: &Self::Item) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAnswer {
    Yes,
    No,
    Cancel,
}

impl PromptAnswer {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Yes | Self::No)
    }
}

/// Blocking yes/no dialog owned by the host UI.
pub trait ConfirmationPrompt {
    fn ask_yes_no(&mut self, message: &str) -> PromptAnswer;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_match_exactly() {
        assert_eq!(
            InventoryCategory::from_label("Trade Goods"),
            Some(InventoryCategory::TradeGoods)
        );
        assert_eq!(
            InventoryCategory::from_label("Food"),
            Some(InventoryCategory::Food)
        );
        assert_eq!(
            InventoryCategory::from_label("Books"),
            Some(InventoryCategory::Books)
        );
        assert_eq!(
            InventoryCategory::from_label("food"),
            Some(InventoryCategory::Other)
        );
        assert_eq!(
            InventoryCategory::from_label("Melee Weapons"),
            Some(InventoryCategory::Other)
        );
        assert_eq!(InventoryCategory::from_label(""), None);
    }

    #[test]
    fn only_yes_and_no_are_terminal() {
        assert!(PromptAnswer::Yes.is_terminal());
        assert!(PromptAnswer::No.is_terminal());
        assert!(!PromptAnswer::Cancel.is_terminal());
    }
}

//! Ordered auto-pickup heuristic.
//!
//! Rules are checked top to bottom and the first match decides. A known
//! inventory category is terminal: its toggle is the answer even when false,
//! and later weight or tag rules are never consulted for that item.

use tracing::trace;

use crate::config::GlobalToggles;
use crate::gate::EvalContext;
use crate::host::{AutogetItem, HostRules, InventoryCategory, NUGGET_TAG};

const FRESH_WATER_MAX_WEIGHT: f64 = 1.0;
const ZERO_WEIGHT_MAX: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupRule {
    NotLiftable,
    SpecialItem,
    Artifact,
    TradeGoods,
    Food,
    Books,
    FreshWater,
    ZeroWeight,
    Nugget,
    Scrap,
    NoRuleMatched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyVerdict {
    pub pickup: bool,
    pub rule: PickupRule,
}

impl PolicyVerdict {
    fn new(pickup: bool, rule: PickupRule) -> Self {
        Self { pickup, rule }
    }
}

pub fn evaluate<H: HostRules>(
    item: &H::Item,
    host: &H,
    toggles: &GlobalToggles,
    ctx: &EvalContext<'_>,
) -> bool {
    evaluate_detailed(item, host, toggles, ctx).pickup
}

pub fn evaluate_detailed<H: HostRules>(
    item: &H::Item,
    host: &H,
    toggles: &GlobalToggles,
    ctx: &EvalContext<'_>,
) -> PolicyVerdict {
    let verdict = decide(item, host, toggles, ctx);
    trace!(
        blueprint = item.blueprint(),
        pickup = verdict.pickup,
        rule = ?verdict.rule,
        suppress_overrides = ctx.suppress_overrides(),
        "autoget_policy_verdict"
    );
    verdict
}

fn decide<H: HostRules>(
    item: &H::Item,
    host: &H,
    toggles: &GlobalToggles,
    ctx: &EvalContext<'_>,
) -> PolicyVerdict {
    if !host.can_autoget(item, ctx) {
        return PolicyVerdict::new(false, PickupRule::NotLiftable);
    }
    if toggles.autoget_special_items && item.is_special() {
        return PolicyVerdict::new(true, PickupRule::SpecialItem);
    }
    if toggles.autoget_artifacts && item.examination_complexity().is_some_and(|c| c > 0) {
        return PolicyVerdict::new(true, PickupRule::Artifact);
    }

    match item.inventory_category() {
        Some(InventoryCategory::TradeGoods) => {
            return PolicyVerdict::new(toggles.autoget_trade_goods, PickupRule::TradeGoods);
        }
        Some(InventoryCategory::Food) => {
            return PolicyVerdict::new(toggles.autoget_food, PickupRule::Food);
        }
        Some(InventoryCategory::Books) => {
            return PolicyVerdict::new(toggles.autoget_books, PickupRule::Books);
        }
        Some(InventoryCategory::Other) | None => {}
    }

    let mut weight = LazyWeight::new(item);
    if toggles.autoget_fresh_water
        && item.contains_fresh_water()
        && weight.get() <= FRESH_WATER_MAX_WEIGHT
    {
        return PolicyVerdict::new(true, PickupRule::FreshWater);
    }
    if toggles.autoget_zero_weight && weight.get() <= ZERO_WEIGHT_MAX {
        return PolicyVerdict::new(true, PickupRule::ZeroWeight);
    }
    if toggles.autoget_nuggets && item.has_tag_or_property(NUGGET_TAG) {
        return PolicyVerdict::new(true, PickupRule::Nugget);
    }
    if toggles.autoget_scrap && host.consider_scrap(item) {
        return PolicyVerdict::new(true, PickupRule::Scrap);
    }
    PolicyVerdict::new(false, PickupRule::NoRuleMatched)
}

struct LazyWeight<'a, I: ?Sized> {
    item: &'a I,
    cached: Option<f64>,
}

impl<'a, I: AutogetItem + ?Sized> LazyWeight<'a, I> {
    fn new(item: &'a I) -> Self {
        Self { item, cached: None }
    }

    fn get(&mut self) -> f64 {
        *self.cached.get_or_insert_with(|| self.item.weight())
    }
}

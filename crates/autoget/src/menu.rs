use crate::command::AutogetCommand;
use crate::config::GlobalToggles;
use crate::gate::{evaluate_with_suppression, EvalContext};
use crate::host::{AutogetItem, HostRules};
use crate::store::OverrideStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemAction {
    pub label: &'static str,
    pub key_label: &'static str,
    pub command: AutogetCommand,
}

impl ItemAction {
    pub const DISABLE: Self = Self {
        label: "Disable auto-pickup for this item",
        key_label: "disable auto-pickup",
        command: AutogetCommand::DisableItemAutoget,
    };

    pub const ENABLE: Self = Self {
        label: "Re-enable auto-pickup for this item",
        key_label: "re-enable auto-pickup",
        command: AutogetCommand::EnableItemAutoget,
    };

    pub fn command_id(&self) -> &'static str {
        self.command.id()
    }
}

/// Zero or one contextual action for `item`.
///
/// Only items the heuristic would pick up on its own get an action, so the
/// heuristic is asked with overrides suppressed.
pub fn populate_actions<H: HostRules>(
    item: &H::Item,
    host: &H,
    toggles: &GlobalToggles,
    store: &OverrideStore,
) -> Vec<ItemAction> {
    if !toggles.enable_exclusions {
        return Vec::new();
    }
    let heuristic_pickup = evaluate_with_suppression(item, host, toggles, store);
    if !heuristic_pickup || !item.is_identified() {
        return Vec::new();
    }
    if EvalContext::new(store).is_disabled(item) {
        vec![ItemAction::ENABLE]
    } else {
        vec![ItemAction::DISABLE]
    }
}

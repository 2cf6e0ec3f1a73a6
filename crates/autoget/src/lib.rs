//! Auto-pickup policy for a turn-based game host.
//!
//! The host implements [`AutogetItem`], [`HostRules`] and
//! [`ConfirmationPrompt`], opens an [`OverrideStore`], and talks to an
//! [`AutogetEngine`] through `decide_pickup`, `populate_actions` and
//! `handle_command`.

pub mod command;
pub mod config;
pub mod confirm;
pub mod engine;
pub mod gate;
pub mod host;
pub mod menu;
pub mod policy;
pub mod store;

#[cfg(test)]
mod test_support;

pub use command::{handle_command, AutogetCommand, CommandOutcome};
pub use config::GlobalToggles;
pub use confirm::{confirm_disable, confirmation_message};
pub use engine::AutogetEngine;
pub use gate::{evaluate_with_suppression, is_disabled, EvalContext};
pub use host::{
    AutogetItem, ConfirmationPrompt, HostRules, InventoryCategory, PromptAnswer,
    DROPPED_BY_PLAYER_PROPERTY, NUGGET_TAG,
};
pub use menu::{populate_actions, ItemAction};
pub use policy::{evaluate, evaluate_detailed, PickupRule, PolicyVerdict};
pub use store::{
    override_key, FlushMode, OverrideDecision, OverrideStore, StoreError,
    CONFIRMATION_SHOWN_KEY, CONFIRMATION_SHOWN_VALUE, DISABLED_VALUE, OVERRIDE_KEY_PREFIX,
};

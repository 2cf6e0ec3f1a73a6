use tracing::trace;

use crate::config::GlobalToggles;
use crate::host::{AutogetItem, HostRules};
use crate::policy;
use crate::store::{OverrideDecision, OverrideStore};

/// Per-call evaluation state, threaded through the policy and into host
/// callbacks. Suppression only lives as long as the value does.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    store: &'a OverrideStore,
    suppress_overrides: bool,
    ignore_drop_provenance: bool,
}

impl<'a> EvalContext<'a> {
    pub fn new(store: &'a OverrideStore) -> Self {
        Self {
            store,
            suppress_overrides: false,
            ignore_drop_provenance: false,
        }
    }

    /// Context for asking what the heuristic alone would decide.
    pub fn suppressed(store: &'a OverrideStore) -> Self {
        Self {
            store,
            suppress_overrides: true,
            ignore_drop_provenance: true,
        }
    }

    pub fn suppress_overrides(&self) -> bool {
        self.suppress_overrides
    }

    pub fn ignore_drop_provenance(&self) -> bool {
        self.ignore_drop_provenance
    }

    pub fn store(&self) -> &'a OverrideStore {
        self.store
    }

    pub fn is_disabled<I: AutogetItem + ?Sized>(&self, item: &I) -> bool {
        is_disabled(item, self)
    }
}

/// Whether a stored override turns auto-pickup off for `item`.
///
/// Overrides are ignored while suppressed and for unidentified items.
pub fn is_disabled<I: AutogetItem + ?Sized>(item: &I, ctx: &EvalContext<'_>) -> bool {
    if ctx.suppress_overrides {
        return false;
    }
    if !item.is_identified() {
        return false;
    }
    ctx.store.override_for(item.blueprint()) == OverrideDecision::Disabled
}

pub fn evaluate_with_suppression<H: HostRules>(
    item: &H::Item,
    host: &H,
    toggles: &GlobalToggles,
    store: &OverrideStore,
) -> bool {
    let ctx = EvalContext::suppressed(store);
    let verdict = policy::evaluate_detailed(item, host, toggles, &ctx);
    trace!(
        blueprint = item.blueprint(),
        pickup = verdict.pickup,
        rule = ?verdict.rule,
        "autoget_heuristic_without_overrides"
    );
    verdict.pickup
}

use tracing::{debug, warn};

use crate::command::{self, CommandOutcome};
use crate::config::GlobalToggles;
use crate::gate::EvalContext;
use crate::host::{AutogetItem, ConfirmationPrompt, HostRules};
use crate::menu::{self, ItemAction};
use crate::policy;
use crate::store::{OverrideStore, StoreError};

/// Host-facing entry point. Owns the override store and the collaborators
/// the policy needs, and is the only thing the host calls into.
pub struct AutogetEngine<H, P> {
    store: OverrideStore,
    toggles: GlobalToggles,
    host: H,
    prompt: P,
}

impl<H, P> AutogetEngine<H, P>
where
    H: HostRules,
    P: ConfirmationPrompt,
{
    pub fn new(store: OverrideStore, toggles: GlobalToggles, host: H, prompt: P) -> Self {
        Self {
            store,
            toggles,
            host,
            prompt,
        }
    }

    /// Final auto-pickup answer: the heuristic, vetoed by a stored override
    /// when exclusions are enabled.
    pub fn decide_pickup(&self, item: &H::Item) -> bool {
        let ctx = EvalContext::new(&self.store);
        let verdict = policy::evaluate_detailed(item, &self.host, &self.toggles, &ctx);
        let vetoed = verdict.pickup && self.toggles.enable_exclusions && ctx.is_disabled(item);
        debug!(
            blueprint = item.blueprint(),
            heuristic = verdict.pickup,
            rule = ?verdict.rule,
            vetoed,
            "autoget_pickup_decision"
        );
        verdict.pickup && !vetoed
    }

    /// Whether the user switched auto-pickup off for this instance's blueprint.
    pub fn is_autoget_disabled(&self, item: &H::Item) -> bool {
        self.toggles.enable_exclusions && EvalContext::new(&self.store).is_disabled(item)
    }

    pub fn populate_actions(&self, item: &H::Item) -> Vec<ItemAction> {
        menu::populate_actions(item, &self.host, &self.toggles, &self.store)
    }

    pub fn handle_command(
        &mut self,
        command_id: &str,
        item: &H::Item,
    ) -> Result<CommandOutcome, StoreError> {
        command::handle_command(&mut self.store, &mut self.prompt, command_id, item).inspect_err(
            |error| {
                warn!(
                    command_id,
                    blueprint = item.blueprint(),
                    error = %error,
                    "autoget_command_persist_failed"
                );
            },
        )
    }

    pub fn store(&self) -> &OverrideStore {
        &self.store
    }

    pub fn toggles(&self) -> &GlobalToggles {
        &self.toggles
    }

    pub fn set_toggles(&mut self, toggles: GlobalToggles) {
        self.toggles = toggles;
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn into_store(self) -> OverrideStore {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::AutogetCommand;
    use crate::host::PromptAnswer;
    use crate::store::{override_key, FlushMode};
    use crate::test_support::{FakeHost, FakeItem, ScriptedPrompt};

    fn engine(
        store: OverrideStore,
        answers: &[PromptAnswer],
    ) -> AutogetEngine<FakeHost, ScriptedPrompt> {
        let toggles = GlobalToggles {
            autoget_artifacts: true,
            ..GlobalToggles::default()
        };
        AutogetEngine::new(
            store,
            toggles,
            FakeHost::default(),
            ScriptedPrompt::answering(answers),
        )
    }

    #[test]
    fn override_vetoes_heuristic_pickup() {
        let mut store = OverrideStore::in_memory();
        store
            .set(override_key("Wand-1"), "NO", FlushMode::Deferred)
            .expect("set");
        let engine = engine(store, &[]);
        let wand = FakeItem::new("Wand-1").with_complexity(2);

        assert!(!engine.decide_pickup(&wand));
        assert!(engine.is_autoget_disabled(&wand));
        assert!(engine.decide_pickup(&FakeItem::new("Wand-2").with_complexity(2)));
    }

    #[test]
    fn unidentified_items_keep_the_heuristic_verdict() {
        let mut store = OverrideStore::in_memory();
        store
            .set(override_key("Wand-1"), "No", FlushMode::Deferred)
            .expect("set");
        let engine = engine(store, &[]);
        let wand = FakeItem::new("Wand-1").with_complexity(2).unidentified();

        assert!(engine.decide_pickup(&wand));
        assert!(!engine.is_autoget_disabled(&wand));
    }

    #[test]
    fn exclusions_off_ignores_overrides() {
        let mut store = OverrideStore::in_memory();
        store
            .set(override_key("Wand-1"), "No", FlushMode::Deferred)
            .expect("set");
        let mut engine = engine(store, &[]);
        let toggles = GlobalToggles {
            enable_exclusions: false,
            ..*engine.toggles()
        };
        engine.set_toggles(toggles);
        let wand = FakeItem::new("Wand-1").with_complexity(2);

        assert!(engine.decide_pickup(&wand));
        assert!(!engine.is_autoget_disabled(&wand));
        assert!(engine.populate_actions(&wand).is_empty());
    }

    #[test]
    fn menu_then_command_flow() {
        let mut engine = engine(OverrideStore::in_memory(), &[PromptAnswer::Yes]);
        let wand = FakeItem::new("Wand-1").with_complexity(2);

        let actions = engine.populate_actions(&wand);
        assert_eq!(actions, vec![ItemAction::DISABLE]);
        let outcome = engine
            .handle_command(actions[0].command_id(), &wand)
            .expect("disable");
        assert_eq!(outcome, CommandOutcome::Disabled);
        assert!(!engine.decide_pickup(&wand));
        assert_eq!(engine.populate_actions(&wand), vec![ItemAction::ENABLE]);

        let outcome = engine
            .handle_command(AutogetCommand::EnableItemAutoget.id(), &wand)
            .expect("enable");
        assert_eq!(outcome, CommandOutcome::Enabled);
        assert!(engine.decide_pickup(&wand));
        assert!(engine.store().confirmation_shown());
        assert_eq!(engine.prompt().times_asked(), 1);
    }
}

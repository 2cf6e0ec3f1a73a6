use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::gate::EvalContext;
use crate::host::{
    AutogetItem, ConfirmationPrompt, HostRules, InventoryCategory, PromptAnswer,
    DROPPED_BY_PLAYER_PROPERTY,
};

#[derive(Debug, Clone)]
pub(crate) struct FakeItem {
    blueprint: String,
    weight: f64,
    category: Option<InventoryCategory>,
    tags: Vec<String>,
    identified: bool,
    special: bool,
    liftable: bool,
    complexity: Option<u32>,
    fresh_water: bool,
    weight_lookups: Cell<u32>,
}

impl FakeItem {
    pub(crate) fn new(blueprint: &str) -> Self {
        Self {
            blueprint: blueprint.to_string(),
            weight: 1.0,
            category: None,
            tags: Vec::new(),
            identified: true,
            special: false,
            liftable: true,
            complexity: None,
            fresh_water: false,
            weight_lookups: Cell::new(0),
        }
    }

    pub(crate) fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub(crate) fn with_category(mut self, category: InventoryCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub(crate) fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub(crate) fn with_complexity(mut self, complexity: u32) -> Self {
        self.complexity = Some(complexity);
        self
    }

    pub(crate) fn with_fresh_water(mut self) -> Self {
        self.fresh_water = true;
        self
    }

    pub(crate) fn unidentified(mut self) -> Self {
        self.identified = false;
        self
    }

    pub(crate) fn special(mut self) -> Self {
        self.special = true;
        self
    }

    pub(crate) fn not_liftable(mut self) -> Self {
        self.liftable = false;
        self
    }

    pub(crate) fn with_drop_provenance(self) -> Self {
        self.with_tag(DROPPED_BY_PLAYER_PROPERTY)
    }

    pub(crate) fn weight_lookups(&self) -> u32 {
        self.weight_lookups.get()
    }
}

impl AutogetItem for FakeItem {
    fn blueprint(&self) -> &str {
        &self.blueprint
    }

    fn weight(&self) -> f64 {
        self.weight_lookups.set(self.weight_lookups.get() + 1);
        self.weight
    }

    fn inventory_category(&self) -> Option<InventoryCategory> {
        self.category
    }

    fn has_tag_or_property(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag == name)
    }

    fn is_identified(&self) -> bool {
        self.identified
    }

    fn is_special(&self) -> bool {
        self.special
    }

    fn examination_complexity(&self) -> Option<u32> {
        self.complexity
    }

    fn contains_fresh_water(&self) -> bool {
        self.fresh_water
    }
}

/// Host rules shaped like the real game's: dropped items are not lifted
/// unless provenance is ignored, and optionally the base check consults
/// overrides the way an intercepted eligibility check would.
#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    scrap_blueprints: Vec<String>,
    consult_overrides: bool,
    observed_overrides: RefCell<Vec<bool>>,
}

impl FakeHost {
    pub(crate) fn with_scrap(mut self, blueprint: &str) -> Self {
        self.scrap_blueprints.push(blueprint.to_string());
        self
    }

    pub(crate) fn consulting_overrides(mut self) -> Self {
        self.consult_overrides = true;
        self
    }

    pub(crate) fn observed_overrides(&self) -> Vec<bool> {
        self.observed_overrides.borrow().clone()
    }
}

impl HostRules for FakeHost {
    type Item = FakeItem;

    fn can_autoget(&self, item: &FakeItem, ctx: &EvalContext<'_>) -> bool {
        if !item.liftable {
            return false;
        }
        if item.dropped_by_player() && !ctx.ignore_drop_provenance() {
            return false;
        }
        if self.consult_overrides {
            let disabled = ctx.is_disabled(item);
            self.observed_overrides.borrow_mut().push(disabled);
            if disabled {
                return false;
            }
        }
        true
    }

    fn consider_scrap(&self, item: &FakeItem) -> bool {
        self.scrap_blueprints
            .iter()
            .any(|blueprint| blueprint == item.blueprint())
    }
}

/// Answers from a script; answers `No` once the script runs out.
#[derive(Debug, Default)]
pub(crate) struct ScriptedPrompt {
    answers: VecDeque<PromptAnswer>,
    messages: Vec<String>,
}

impl ScriptedPrompt {
    pub(crate) fn answering(answers: &[PromptAnswer]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            messages: Vec::new(),
        }
    }

    pub(crate) fn times_asked(&self) -> usize {
        self.messages.len()
    }

    pub(crate) fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl ConfirmationPrompt for ScriptedPrompt {
    fn ask_yes_no(&mut self, message: &str) -> PromptAnswer {
        self.messages.push(message.to_string());
        self.answers.pop_front().unwrap_or(PromptAnswer::No)
    }
}

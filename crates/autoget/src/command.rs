use tracing::{debug, info};

use crate::confirm::confirm_disable;
use crate::host::{AutogetItem, ConfirmationPrompt};
use crate::store::{override_key, FlushMode, OverrideStore, StoreError, DISABLED_VALUE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutogetCommand {
    DisableItemAutoget,
    EnableItemAutoget,
}

impl AutogetCommand {
    pub const ALL: [Self; 2] = [Self::DisableItemAutoget, Self::EnableItemAutoget];

    pub const fn id(self) -> &'static str {
        match self {
            Self::DisableItemAutoget => "QudUX_DisableItemAutoget",
            Self::EnableItemAutoget => "QudUX_EnableItemAutoget",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Disabled,
    Declined,
    Enabled,
    Ignored,
}

/// Applies a fired item command. Unknown ids are ignored.
pub fn handle_command<I, P>(
    store: &mut OverrideStore,
    prompt: &mut P,
    command_id: &str,
    item: &I,
) -> Result<CommandOutcome, StoreError>
where
    I: AutogetItem + ?Sized,
    P: ConfirmationPrompt + ?Sized,
{
    match AutogetCommand::from_id(command_id) {
        Some(AutogetCommand::DisableItemAutoget) => disable_autoget(store, prompt, item),
        Some(AutogetCommand::EnableItemAutoget) => enable_autoget(store, item),
        None => {
            debug!(command_id, blueprint = item.blueprint(), "autoget_command_ignored");
            Ok(CommandOutcome::Ignored)
        }
    }
}

pub fn disable_autoget<I, P>(
    store: &mut OverrideStore,
    prompt: &mut P,
    item: &I,
) -> Result<CommandOutcome, StoreError>
where
    I: AutogetItem + ?Sized,
    P: ConfirmationPrompt + ?Sized,
{
    if !confirm_disable(store, prompt, item.display_name())? {
        return Ok(CommandOutcome::Declined);
    }
    store.set(
        override_key(item.blueprint()),
        DISABLED_VALUE,
        FlushMode::Immediate,
    )?;
    info!(blueprint = item.blueprint(), "autoget_override_written");
    Ok(CommandOutcome::Disabled)
}

pub fn enable_autoget<I: AutogetItem + ?Sized>(
    store: &mut OverrideStore,
    item: &I,
) -> Result<CommandOutcome, StoreError> {
    let removed = store.remove(&override_key(item.blueprint()));
    store.flush()?;
    info!(blueprint = item.blueprint(), removed, "autoget_override_removed");
    Ok(CommandOutcome::Enabled)
}

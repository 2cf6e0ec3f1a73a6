use tracing::{debug, info};

use crate::host::{ConfirmationPrompt, PromptAnswer};
use crate::store::{
    FlushMode, OverrideStore, StoreError, CONFIRMATION_SHOWN_KEY, CONFIRMATION_SHOWN_VALUE,
};

pub fn confirmation_message(display_name: &str) -> String {
    format!(
        "Disabling auto-pickup for {display_name}.\n\n\
Changes to auto-pickup preferences will apply to ALL of your characters. \
If you proceed, this message will not be shown again.\n\nProceed?"
    )
}

/// Asks once, ever, before the first disable is persisted.
///
/// On `Yes` the shown-flag is staged in memory only; the caller's override
/// write flushes both. `Cancel` is not an answer and asks again.
pub fn confirm_disable<P: ConfirmationPrompt + ?Sized>(
    store: &mut OverrideStore,
    prompt: &mut P,
    display_name: &str,
) -> Result<bool, StoreError> {
    if store.confirmation_shown() {
        return Ok(true);
    }

    let message = confirmation_message(display_name);
    loop {
        match prompt.ask_yes_no(&message) {
            PromptAnswer::Yes => {
                store.set(
                    CONFIRMATION_SHOWN_KEY,
                    CONFIRMATION_SHOWN_VALUE,
                    FlushMode::Deferred,
                )?;
                info!(display_name, "autoget_disable_confirmed");
                return Ok(true);
            }
            PromptAnswer::No => {
                info!(display_name, "autoget_disable_declined");
                return Ok(false);
            }
            PromptAnswer::Cancel => {
                debug!(display_name, "autoget_confirmation_reprompt");
            }
        }
    }
}

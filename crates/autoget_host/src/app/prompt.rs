use std::io::{self, BufRead, Write};

use autoget::{ConfirmationPrompt, PromptAnswer};
use tracing::warn;

pub(crate) fn parse_answer(raw: &str) -> PromptAnswer {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => PromptAnswer::Yes,
        "n" | "no" => PromptAnswer::No,
        _ => PromptAnswer::Cancel,
    }
}

/// Yes/no dialog on the terminal. Shares stdin with the command loop.
#[derive(Debug, Default)]
pub(crate) struct StdinPrompt;

impl ConfirmationPrompt for StdinPrompt {
    fn ask_yes_no(&mut self, message: &str) -> PromptAnswer {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{message}");
        let _ = write!(stdout, "[y/n] > ");
        let _ = stdout.flush();
        drop(stdout);

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            // Nobody is left to answer; a closed stream counts as "no".
            Ok(0) => PromptAnswer::No,
            Ok(_) => parse_answer(&line),
            Err(error) => {
                warn!(error = %error, "prompt_read_failed");
                PromptAnswer::No
            }
        }
    }
}

use std::io::{self, Write};
use std::process::ExitCode;

use autoget::ConfirmationPrompt;
use tracing::{error, info, warn};

use super::console::{HostSession, SessionControl};

const PROMPT: &str = "autoget> ";

pub(crate) fn run<P: ConfirmationPrompt>(mut session: HostSession<P>) -> ExitCode {
    // Confirmation prompts read stdin too, so the lock is never held across lines.
    let mut stdout = io::stdout();
    match drive(&mut session, |line| io::stdin().read_line(line), &mut stdout) {
        Ok(()) => {
            info!(
                disabled_blueprints = session.engine.store().disabled_blueprints().count(),
                "autoget_host_shutdown"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "console_io_failed");
            ExitCode::FAILURE
        }
    }
}

fn drive<P, R, W>(session: &mut HostSession<P>, mut read_line: R, out: &mut W) -> io::Result<()>
where
    P: ConfirmationPrompt,
    R: FnMut(&mut String) -> io::Result<usize>,
    W: Write,
{
    let mut line = String::new();
    let mut output = Vec::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }

        output.clear();
        let control = session.process_line(&line, &mut output);
        for message in &output {
            writeln!(out, "{message}")?;
        }
        if session.engine.store().is_dirty() {
            warn!("override_store_left_dirty");
        }
        if control == SessionControl::Quit {
            return Ok(());
        }
    }
}

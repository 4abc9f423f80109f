//! Line-based terminal I/O.
//!
//! Output goes through explicit `writeln!` calls on stdout; diagnostics stay
//! on stderr via `tracing`.

use std::io::{self, BufRead, Write};

use cardshop_client::dialogs::{CardFormInput, Confirm, Dialogs, Notice};

/// Print `label` and read one line from stdin.
///
/// Returns `None` at end of input.
pub fn prompt(label: &str) -> io::Result<Option<String>> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{label}")?;
    stdout.flush()?;
    drop(stdout);

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
}

/// Write one line to stdout.
pub fn say(message: impl std::fmt::Display) -> io::Result<()> {
    writeln!(io::stdout().lock(), "{message}")
}

/// Report an error raised before logging is set up.
pub fn report_fatal(error: &dyn std::error::Error) {
    let _ = writeln!(io::stderr().lock(), "error: {error}");
}

/// [`Dialogs`] answered on the terminal.
pub struct TerminalDialogs;

impl Dialogs for TerminalDialogs {
    fn confirm(&self, question: &Confirm) -> bool {
        match prompt(&format!("{question} [y/N] ")) {
            Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read confirmation, treating as no");
                false
            }
        }
    }

    fn notify(&self, notice: Notice) {
        let marker = if notice.is_error() { "!" } else { "*" };
        if let Err(e) = say(format_args!("{marker} {notice}")) {
            tracing::warn!(error = %e, %notice, "Could not show notice");
        }
    }

    fn card_form(&self) -> Option<CardFormInput> {
        let read = || -> io::Result<Option<CardFormInput>> {
            let Some(name) = prompt("Card name: ")? else {
                return Ok(None);
            };
            let Some(value) = prompt("Card value: ")? else {
                return Ok(None);
            };
            Ok(Some(CardFormInput { name, value }))
        };
        read().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not read card form");
            None
        })
    }
}

//! Console entry point for the Agenda contact book.
//!
//! # Responsibility
//! - Bootstrap logging from `AGENDA_LOG_LEVEL` / `AGENDA_LOG_DIR`.
//! - Run the interactive menu against a fresh in-memory store.

mod console;

use agenda_core::{ContactService, InMemoryContactRepository, LogConfig};
use console::Console;
use log::{error, info};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Logging is optional for the console; a bad config must not block use.
    if let Err(err) = LogConfig::from_env().init() {
        eprintln!("logging disabled: {err}");
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        agenda_core::core_version()
    );

    let service = ContactService::new(InMemoryContactRepository::new());
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock(), &service);

    match console.run() {
        Ok(()) => {
            info!("event=cli_exit module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={}", err);
            eprintln!("console I/O failed: {err}");
            ExitCode::FAILURE
        }
    }
}

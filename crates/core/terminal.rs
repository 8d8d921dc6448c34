//! Terminal front end for the scan-to-table workflow.
//!
//! Each line of stdin is either a command (`start`, `stop`, `download`, `quit`) or input for
//! the line scanner, which is what a hand-held barcode scanner in keyboard mode produces.

use std::{
    io::{self, BufRead, IsTerminal},
    path::PathBuf,
    time::Duration,
};

use bookscan::ui::{AppState, Controller, Event, HttpLookup, LineScanner, Page};

use eyre::{Context, Result};
use log::{error, info, warn};

use crate::file;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Dispatch(Event),
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        "start" => Some(Command::Dispatch(Event::StartScan)),
        "stop" => Some(Command::Dispatch(Event::StopScan)),
        "download" => Some(Command::Dispatch(Event::DownloadRequested)),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

/// Reads stdin until `quit` or end of input, driving a [`Controller`] against `server`.
///
/// When `quiet`, nothing is written to stdout; alerts still go to stderr.
pub fn run(server: &str, timeout: Duration, quiet: bool) -> Result<()> {
    let lookup = HttpLookup::new(server, timeout)
        .wrap_err("Cannot create the HTTP client for lookups")?;
    let page = TerminalPage::new(server, PathBuf::from("."), quiet);
    let mut controller = Controller::new(LineScanner::default(), lookup, page);

    info!("Type `start`, then scan a barcode. `stop`, `download` and `quit` are also understood.");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        line.clear();
        // the lock is not held between lines so alerts can read from the terminal
        if stdin
            .lock()
            .read_line(&mut line)
            .wrap_err("Cannot read from stdin")?
            == 0
        {
            break;
        }

        match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(Command::Dispatch(event)) => controller.dispatch(event),
            None => {
                if let Some(code) = controller.scanner_mut().feed(&line) {
                    controller.dispatch(Event::Decoded(code));
                } else if !line.trim().is_empty() {
                    warn!("Not scanning - type `start` first");
                }
            }
        }
    }

    Ok(())
}

/// [`Page`] printing to the terminal and saving downloads into a directory.
struct TerminalPage {
    server: String,
    client: reqwest::blocking::Client,
    download_dir: PathBuf,
    shown_rows: usize,
    shown_input: String,
    was_scanning: bool,
    quiet: bool,
}

impl TerminalPage {
    fn new(server: &str, download_dir: PathBuf, quiet: bool) -> Self {
        Self {
            server: server.to_owned(),
            client: reqwest::blocking::Client::new(),
            download_dir,
            shown_rows: 0,
            shown_input: String::new(),
            was_scanning: false,
            quiet,
        }
    }

    fn show(&self, line: &str) {
        if !self.quiet {
            println!("{line}");
        }
    }
}

impl Page for TerminalPage {
    fn alert(&mut self, message: &str) {
        if io::stdin().is_terminal() {
            let acknowledged = dialoguer::Confirm::new()
                .with_prompt(format!("{message} - continue?"))
                .default(true)
                .show_default(false)
                .interact();
            if acknowledged.is_ok() {
                return;
            }
        }
        eprintln!("! {message}");
    }

    fn navigate(&mut self, path: &str) {
        match file::fetch_export(&self.client, &self.server, path)
            .and_then(|export| export.save_in(&self.download_dir))
        {
            Ok(saved) => self.show(&format!("Saved {}", saved.display())),
            Err(err) => error!("{err:#}"),
        }
    }

    fn render(&mut self, state: &AppState) {
        if state.is_scanning() != self.was_scanning {
            self.was_scanning = state.is_scanning();
            self.show(if self.was_scanning {
                "Scanning..."
            } else {
                "Scanner stopped"
            });
        }

        if state.isbn_input != self.shown_input {
            self.shown_input.clone_from(&state.isbn_input);
            self.show(&format!("ISBN: {}", self.shown_input));
        }

        for row in &state.results.rows()[self.shown_rows..] {
            self.show(&row.cells().join(" | "));
        }
        self.shown_rows = state.results.len();
    }
}

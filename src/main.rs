mod cli;
mod commands;
mod domain;
mod error;
mod parser;
mod services;

use crate::commands::Outcome;
use crate::domain::constants::LOG_ENV;
use crate::error::AdminError;
use crate::parser::ResolvedInvocation;
use crate::services::output::Printer;
use crate::services::settings::{RootOptions, Settings};
use crate::services::storage::FsStore;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let tree = cli::build_tree();
    let argv = std::env::args_os()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned());
    let invocation = parser::resolve(&tree, argv);

    let root = RootOptions::from_frame(invocation.root());
    init_logging(root.verbose);
    tracing::debug!(
        path = %invocation.describe(),
        terminal = invocation.terminal_reached,
        "resolved invocation"
    );

    let mut json = root.json;
    match run(&invocation, &root, &mut json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            Printer::new(json).error(&anyhow::Error::from(err));
            code
        }
    }
}

/// Runs the planned outcome; `json` ends up as the effective output mode for
/// error reporting, including a `json = true` from the settings file.
fn run(
    invocation: &ResolvedInvocation<'_>,
    root: &RootOptions,
    json: &mut bool,
) -> Result<(), AdminError> {
    match commands::plan(invocation) {
        Outcome::Help(node) => {
            print!("{}", commands::render(node));
            Ok(())
        }
        Outcome::Usage { error, node } => {
            if let Ok(settings) = Settings::load(root) {
                *json = settings.json;
            }
            // stderr carries only the envelope in JSON mode
            if !*json {
                eprint!("{}", commands::render(node));
            }
            Err(error)
        }
        Outcome::Dispatch { component, action } => {
            let settings = Settings::load(root)?;
            *json = settings.json;
            tracing::debug!(
                store = %settings.store_dir.display(),
                editor = %settings.editor,
                "settings loaded"
            );
            let store = FsStore::new(settings.store_dir.clone());
            let report = commands::dispatch(component, action, invocation.deepest(), &store)?;
            commands::emit(report, Printer::new(settings.json), &settings.editor)?;
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

//! dflow - Git branching flow manager.
//!
//! Parses the command line, installs the Ctrl+C handler and maps the outcome
//! to an exit code: 0 on success, 1 on any failure or interrupt.

use clap::Parser;
use dflow::commands::{self, Cli};
use dflow::output::{CliOutput, Output};
use dflow::{DflowError, StartupInfo};
use std::process::ExitCode;

const CANCELLED_MESSAGE: &str = "Execution cancelled by user.";

fn install_interrupt_handler() {
    let result = ctrlc::set_handler(|| {
        // Prompts hide the cursor while they are active.
        if let Err(e) = console::Term::stderr().show_cursor() {
            dflow::log_error!("could not restore the cursor: {e}");
        }
        eprintln!("\n{CANCELLED_MESSAGE}");
        std::process::exit(1);
    });
    if let Err(e) = result {
        dflow::log_warning!("could not install Ctrl+C handler: {e}");
    }
}

fn main() -> ExitCode {
    install_interrupt_handler();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too and are not failures.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match commands::run(cli, StartupInfo::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<DflowError>() {
                Some(DflowError::Cancelled) => eprintln!("\n{CANCELLED_MESSAGE}"),
                Some(e) if !e.is_user_actionable() => {
                    CliOutput::default_output().error(&format!("{err:#}"));
                    dflow::log_info!("Re-run with --verbose to see the git commands dflow ran.");
                }
                _ => CliOutput::default_output().error(&format!("{err:#}")),
            }
            ExitCode::FAILURE
        }
    }
}

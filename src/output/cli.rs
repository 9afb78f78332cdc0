//! Terminal rendering of dflow command output.
//!
//! Command reports (created branch, merge target, init summary) go to
//! stdout and are silenced by `--quiet`. Warnings and errors go to stderr
//! with git-style lowercase prefixes and always show. Workflow steps such as
//! `Pulling latest changes into 'uat'...` only appear with `--verbose`.

use super::{Output, OutputConfig};
use crate::styles::{self, colors_enabled, colors_enabled_stderr};

/// Wrap `msg` in an ANSI style when `enabled`.
fn paint(style: &str, msg: &str, enabled: bool) -> String {
    if enabled {
        format!("{style}{msg}{}", styles::RESET)
    } else {
        msg.to_string()
    }
}

/// Writes to the real stdout/stderr.
#[derive(Debug)]
pub struct CliOutput {
    config: OutputConfig,
}

impl CliOutput {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Used by `main` to report errors before `--quiet`/`--verbose` apply.
    pub fn default_output() -> Self {
        Self::new(OutputConfig::default())
    }

    fn report(&self, style: &str, msg: &str) {
        if !self.config.quiet {
            println!("{}", paint(style, msg, colors_enabled()));
        }
    }

    fn diagnostic(&self, style: &str, prefix: &str, msg: &str) {
        eprintln!("{} {msg}", paint(style, prefix, colors_enabled_stderr()));
    }
}

impl Output for CliOutput {
    fn info(&mut self, msg: &str) {
        if !self.config.quiet {
            println!("{msg}");
        }
    }

    fn success(&mut self, msg: &str) {
        self.report(styles::GREEN, msg);
    }

    fn warning(&mut self, msg: &str) {
        self.diagnostic(styles::YELLOW, "warning:", msg);
    }

    fn error(&mut self, msg: &str) {
        self.diagnostic(styles::RED, "error:", msg);
    }

    fn debug(&mut self, msg: &str) {
        if self.config.verbose {
            eprintln!(
                "{}",
                paint(styles::DIM, &format!("debug: {msg}"), colors_enabled_stderr())
            );
        }
    }

    fn step(&mut self, msg: &str) {
        if self.config.verbose {
            self.report(styles::DIM, msg);
        }
    }

    fn result(&mut self, msg: &str) {
        self.report(styles::BOLD, msg);
    }

    fn detail(&mut self, key: &str, value: &str) {
        if !self.config.quiet {
            let key = paint(styles::BOLD, &format!("{key}:"), colors_enabled());
            println!("  {key} {value}");
        }
    }

    fn list_item(&mut self, item: &str) {
        if !self.config.quiet {
            println!(" - {item}");
        }
    }

    // `config get-author` and `config list` print here; scripts read it even
    // under --quiet.
    fn raw(&mut self, content: &str) {
        print!("{content}");
    }

    fn is_quiet(&self) -> bool {
        self.config.quiet
    }

    fn is_verbose(&self) -> bool {
        self.config.verbose
    }
}

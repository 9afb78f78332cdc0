//! Output abstraction layer for separating IO from business logic.
//!
//! Command handlers render workflow results through `&mut dyn Output` and
//! never print directly, so they can be driven from tests with [`TestOutput`]:
//!
//! ```ignore
//! fn render(result: &DeleteResult, output: &mut dyn Output) {
//!     output.success(&format!("Deleted '{}' ({})", result.branch, result.deleted_parts()));
//! }
//! ```

mod cli;

pub use cli::CliOutput;
pub use test::{OutputEntry, TestOutput};

/// Configuration for output behavior.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Suppress most output when true.
    pub quiet: bool,
    /// Enable debug/verbose output when true.
    pub verbose: bool,
}

impl OutputConfig {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self { quiet, verbose }
    }
}

/// Trait for abstracting output operations.
///
/// Implementors should respect `quiet` and `verbose` modes where appropriate.
pub trait Output {
    // ─────────────────────────────────────────────────────────────────────────
    // Basic Messages
    // ─────────────────────────────────────────────────────────────────────────

    /// Display an informational message.
    /// Respects quiet mode.
    fn info(&mut self, msg: &str);

    /// Display a success message.
    /// Respects quiet mode.
    fn success(&mut self, msg: &str);

    /// Display a warning message to stderr.
    /// Always shown (not affected by quiet mode).
    fn warning(&mut self, msg: &str);

    /// Display an error message to stderr.
    /// Always shown (not affected by quiet mode).
    fn error(&mut self, msg: &str);

    /// Display a debug message.
    /// Only shown in verbose mode.
    fn debug(&mut self, msg: &str);

    // ─────────────────────────────────────────────────────────────────────────
    // Structured Output
    // ─────────────────────────────────────────────────────────────────────────

    /// Display an intermediate step message.
    /// Only shown in verbose mode.
    fn step(&mut self, msg: &str);

    /// Display a final result message.
    /// The primary output of a command, shown unless quiet.
    fn result(&mut self, msg: &str);

    /// Display a key-value detail.
    /// Renders as "  Key: value" in CLI.
    fn detail(&mut self, key: &str, value: &str);

    /// Display a list item.
    /// Renders as " - item" in CLI.
    fn list_item(&mut self, item: &str);

    /// Output raw, unformatted content (banner, `config list` lines).
    fn raw(&mut self, content: &str);

    // ─────────────────────────────────────────────────────────────────────────
    // State Queries
    // ─────────────────────────────────────────────────────────────────────────

    fn is_quiet(&self) -> bool;

    fn is_verbose(&self) -> bool;
}

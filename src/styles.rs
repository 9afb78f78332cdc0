//! Terminal text styling utilities.
//!
//! Provides clean abstractions for ANSI terminal styling, keeping escape codes
//! isolated from application code.

/// ANSI escape code for bold text.
pub const BOLD: &str = "\x1b[1m";

/// ANSI escape code for dim text.
pub const DIM: &str = "\x1b[2m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// ANSI escape code to reset all styling.
pub const RESET: &str = "\x1b[0m";

/// Whether stdout should be coloured (terminal, `NO_COLOR`/`CLICOLOR` respected).
pub fn colors_enabled() -> bool {
    console::colors_enabled()
}

pub fn colors_enabled_stderr() -> bool {
    console::colors_enabled_stderr()
}

/// Wraps text in bold styling.
pub fn bold(text: &str) -> String {
    format!("{BOLD}{text}{RESET}")
}

pub fn cyan(text: &str) -> String {
    format!("{CYAN}{text}{RESET}")
}

/// Formats a definition list item with a bold term.
/// Matches clap's command list formatting (2-space indent, 9-char term width).
pub fn def(term: &str, description: &str) -> String {
    let padding = " ".repeat(9_usize.saturating_sub(term.len()));
    format!("  {BOLD}{term}{RESET}{padding}{description}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_wraps_text() {
        assert_eq!(bold("x"), "\x1b[1mx\x1b[0m");
    }

    #[test]
    fn test_def_pads_short_terms() {
        assert_eq!(def("feat", "Feature"), "  \x1b[1mfeat\x1b[0m     Feature");
        // Long terms get no padding rather than panicking.
        assert!(def("a-very-long-term", "x").ends_with("a-very-long-term\x1b[0mx"));
    }
}

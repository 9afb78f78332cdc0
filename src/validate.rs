//! Branch name validation.
//!
//! Mirrors the ref-name rules from `git-check-ref-format(1)` that matter for
//! branch names a user types. Checks run in a fixed order and the first
//! violation is reported.

use std::fmt;

/// Substrings git refuses anywhere in a ref name.
const FORBIDDEN_SEQUENCES: &[&str] = &["..", "~", "^", ":", "?", "*", "[", "\\", "@{"];

/// Why a branch name was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameViolation {
    Empty,
    LeadingDash,
    LeadingSlash,
    TrailingSlash,
    TrailingDot,
    LockSuffix,
    ForbiddenSequence(&'static str),
    DotComponent,
    EmptyComponent,
    ControlCharacter,
}

impl fmt::Display for NameViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "branch name is empty"),
            Self::LeadingDash => write!(f, "branch name cannot start with '-'"),
            Self::LeadingSlash => write!(f, "branch name cannot start with '/'"),
            Self::TrailingSlash => write!(f, "branch name cannot end with '/'"),
            Self::TrailingDot => write!(f, "branch name cannot end with '.'"),
            Self::LockSuffix => write!(f, "branch name cannot end with '.lock'"),
            Self::ForbiddenSequence(seq) => write!(f, "branch name cannot contain '{seq}'"),
            Self::DotComponent => {
                write!(f, "branch name cannot contain path elements '.' or '..'")
            }
            Self::EmptyComponent => {
                write!(f, "branch name cannot contain empty path segments ('//')")
            }
            Self::ControlCharacter => write!(f, "branch name contains control characters"),
        }
    }
}

/// Validate a branch name.
pub fn validate(name: &str) -> Result<(), NameViolation> {
    if name.is_empty() {
        return Err(NameViolation::Empty);
    }
    if name.starts_with('-') {
        return Err(NameViolation::LeadingDash);
    }
    if name.starts_with('/') {
        return Err(NameViolation::LeadingSlash);
    }
    if name.ends_with('/') {
        return Err(NameViolation::TrailingSlash);
    }
    if name.ends_with('.') {
        return Err(NameViolation::TrailingDot);
    }
    if name.ends_with(".lock") {
        return Err(NameViolation::LockSuffix);
    }

    if let Some(seq) = FORBIDDEN_SEQUENCES.iter().find(|seq| name.contains(*seq)) {
        return Err(NameViolation::ForbiddenSequence(*seq));
    }

    for component in name.split('/') {
        if component == "." || component == ".." {
            return Err(NameViolation::DotComponent);
        }
        if component.is_empty() {
            return Err(NameViolation::EmptyComponent);
        }
    }

    if name.bytes().any(|b| b < 0x20 || b == 0x7f) {
        return Err(NameViolation::ControlCharacter);
    }

    Ok(())
}

pub fn is_valid(name: &str) -> bool {
    validate(name).is_ok()
}

//! Error types for the dflow core.
//!
//! Core modules (config store, resolver, git gateway, workflows) return
//! [`DflowError`]. The command layer wraps these in `anyhow` with extra
//! context; `main` inspects them to pick the message and exit code.

use crate::validate::NameViolation;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DflowError>;

#[derive(Debug, Error)]
pub enum DflowError {
    #[error("dflow is not initialized in this repository ({} not found). Run `dflow init` first", path.display())]
    NotInitialized { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("error generating YAML: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("error writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown branch type '{keyword}'. Use one of: {}", accepted.join(", "))]
    UnknownType {
        keyword: String,
        accepted: &'static [&'static str],
    },

    #[error("invalid branch name '{name}': {reason}")]
    InvalidName { name: String, reason: NameViolation },

    #[error("`{field}` is not set in .dflow.yaml. Re-run `dflow init` to regenerate the configuration")]
    IncompleteConfig { field: &'static str },

    #[error("branch '{0}' already exists")]
    BranchExists(String),

    #[error("branch '{0}' does not exist locally or on the remote")]
    BranchNotFound(String),

    #[error("refusing to delete '{0}': it is one of the configured base branches")]
    ProtectedBranch(String),

    #[error("`{key}` is not set. Use `dflow config set-author`")]
    AuthorNotSet { key: &'static str },

    #[error("git {command} failed: {stderr}")]
    Process { command: String, stderr: String },

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("cancelled by user")]
    Cancelled,
}

impl DflowError {
    pub(crate) fn process(args: &[&str], stderr: &[u8]) -> Self {
        Self::Process {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }

    /// Errors the user can fix by following the message, as opposed to
    /// environment failures.
    pub fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            Self::NotInitialized { .. }
                | Self::UnknownType { .. }
                | Self::InvalidName { .. }
                | Self::IncompleteConfig { .. }
                | Self::BranchExists(_)
                | Self::BranchNotFound(_)
                | Self::ProtectedBranch(_)
                | Self::AuthorNotSet { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_error_keeps_stderr_verbatim() {
        let err = DflowError::process(
            &["checkout", "uat"],
            b"error: pathspec 'uat' did not match any file(s) known to git\n",
        );
        assert_eq!(
            err.to_string(),
            "git checkout uat failed: error: pathspec 'uat' did not match any file(s) known to git"
        );
        assert!(!err.is_user_actionable());
    }

    #[test]
    fn test_not_initialized_message_has_guidance() {
        let err = DflowError::NotInitialized {
            path: PathBuf::from("/repo/.dflow.yaml"),
        };
        assert!(err.to_string().contains("dflow init"));
        assert!(err.is_user_actionable());
    }

    #[test]
    fn test_unknown_type_lists_accepted_keywords() {
        let err = DflowError::UnknownType {
            keyword: "bogus".into(),
            accepted: &["feat", "release"],
        };
        assert_eq!(
            err.to_string(),
            "unknown branch type 'bogus'. Use one of: feat, release"
        );
    }
}

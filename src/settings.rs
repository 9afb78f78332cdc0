//! Git config-based settings for dflow.
//!
//! Branch layout lives in `.dflow.yaml` and is shared by the whole team.
//! Per-clone values (who is authoring changelogs, which remote to push to)
//! live in git's own config under the `dflow.` namespace.
//!
//! # Config Keys
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `dflow.author` | unset | Author name used in changelog footers |
//! | `dflow.email` | unset | Author email used in changelog footers |
//! | `dflow.remote` | `"origin"` | Remote used for push, delete and lookups |
//!
//! # Example
//!
//! ```bash
//! dflow config set-author "Jane Doe" --email=jane@example.com
//! git config dflow.remote upstream
//! ```

use crate::error::Result;
use crate::git::GitGateway;

/// Default values for settings.
pub mod defaults {
    /// Default value for remote setting.
    pub const REMOTE: &str = "origin";
}

/// Git config keys for dflow settings.
pub mod keys {
    /// Namespace shared by every dflow key.
    pub const PREFIX: &str = "dflow.";

    /// Config key for the changelog author name.
    pub const AUTHOR: &str = "dflow.author";

    /// Config key for the changelog author email.
    pub const EMAIL: &str = "dflow.email";

    /// Config key for remote setting.
    pub const REMOTE: &str = "dflow.remote";
}

/// User-configurable settings for dflow commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DflowSettings {
    /// Remote name for push, delete and existence checks.
    pub remote: String,
}

impl Default for DflowSettings {
    fn default() -> Self {
        Self {
            remote: defaults::REMOTE.to_string(),
        }
    }
}

impl DflowSettings {
    /// Load settings from git config, falling back to defaults.
    pub fn load(git: &dyn GitGateway) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(remote) = git.config_get(keys::REMOTE)? {
            if !remote.is_empty() {
                settings.remote = remote;
            }
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::RecordingGit;

    #[test]
    fn test_defaults_when_unset() {
        let git = RecordingGit::new();
        assert_eq!(DflowSettings::load(&git).unwrap(), DflowSettings::default());
        assert_eq!(DflowSettings::default().remote, "origin");
    }

    #[test]
    fn test_remote_from_git_config() {
        let git = RecordingGit::new().with_config(keys::REMOTE, "upstream");
        assert_eq!(DflowSettings::load(&git).unwrap().remote, "upstream");
    }

    #[test]
    fn test_empty_remote_falls_back() {
        let git = RecordingGit::new().with_config(keys::REMOTE, "");
        assert_eq!(DflowSettings::load(&git).unwrap().remote, "origin");
    }

    #[test]
    fn test_keys_share_prefix() {
        for key in [keys::AUTHOR, keys::EMAIL, keys::REMOTE] {
            assert!(key.starts_with(keys::PREFIX));
        }
    }
}

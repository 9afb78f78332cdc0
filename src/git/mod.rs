//! Git access for dflow.
//!
//! Workflows talk to git through the [`GitGateway`] trait. [`GitCommand`]
//! implements it by running the `git` binary; [`RecordingGit`] implements it
//! in memory for tests.

use crate::error::{DflowError, Result};
use crate::settings::defaults;
use std::path::PathBuf;
use std::process::{Command, Output};

mod branch;
mod config;
mod recording;
mod remote;

pub use recording::{GitCall, RecordingGit};

/// The git operations dflow needs.
///
/// Fallible operations return [`DflowError::Process`] carrying git's stderr.
/// Existence checks and listing are best-effort and never fail.
pub trait GitGateway {
    fn branch_exists_locally(&self, name: &str) -> bool;

    /// Create `name` at the current HEAD without switching to it.
    /// Succeeds without doing anything when the branch already exists.
    fn create_local_branch(&self, name: &str) -> Result<()>;

    fn checkout(&self, name: &str) -> Result<()>;

    /// Create `name` from the current position and switch to it.
    fn checkout_new(&self, name: &str) -> Result<()>;

    fn pull_current(&self) -> Result<()>;

    fn push_with_upstream(&self, name: &str) -> Result<()>;

    fn remote_branch_exists(&self, name: &str) -> bool;

    fn delete_local(&self, name: &str) -> Result<()>;

    fn delete_remote(&self, name: &str) -> Result<()>;

    /// Delete the remote branch only if it was ever published.
    ///
    /// Returns whether a deletion happened. `delete_remote` is never called
    /// for a branch the remote does not have.
    fn delete_remote_if_exists(&self, name: &str) -> Result<bool> {
        if !self.remote_branch_exists(name) {
            return Ok(false);
        }
        self.delete_remote(name)?;
        Ok(true)
    }

    /// Local branch names; empty if git fails.
    fn list_local_branch_names(&self) -> Vec<String>;

    /// Read a key from git config. `None` when unset.
    fn config_get(&self, key: &str) -> Result<Option<String>>;

    /// Write a key to the repository-local git config.
    fn config_set(&self, key: &str, value: &str) -> Result<()>;

    /// All `(key, value)` pairs whose key starts with `prefix`.
    fn config_list(&self, prefix: &str) -> Result<Vec<(String, String)>>;
}

/// Runs the `git` binary.
#[derive(Debug, Clone)]
pub struct GitCommand {
    pub(crate) quiet: bool,
    pub(crate) remote: String,
    pub(crate) workdir: Option<PathBuf>,
}

impl GitCommand {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            remote: defaults::REMOTE.to_string(),
            workdir: None,
        }
    }

    /// Use `remote` instead of `origin` for push and remote lookups.
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Run git in `dir` instead of the process working directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    fn command(&self, args: &[&str]) -> Command {
        crate::log_debug!("git {}", args.join(" "));
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Run git and capture its output without judging the exit status.
    pub(crate) fn output(&self, args: &[&str]) -> Result<Output> {
        self.command(args)
            .output()
            .map_err(|e| DflowError::process(args, e.to_string().as_bytes()))
    }

    /// Run git, turning a non-zero exit into [`DflowError::Process`].
    pub(crate) fn run(&self, args: &[&str]) -> Result<Output> {
        let output = self.output(args)?;
        if !output.status.success() {
            return Err(DflowError::process(args, &output.stderr));
        }
        Ok(output)
    }

    pub(crate) fn succeeds(&self, args: &[&str]) -> bool {
        self.output(args)
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Append `--quiet` to `args` when the command runs quietly.
    pub(crate) fn quiet_args<'a>(&self, args: &[&'a str]) -> Vec<&'a str> {
        let mut args = args.to_vec();
        if self.quiet {
            args.push("--quiet");
        }
        args
    }
}

impl GitGateway for GitCommand {
    fn branch_exists_locally(&self, name: &str) -> bool {
        self.show_branch_ref(name)
    }

    fn create_local_branch(&self, name: &str) -> Result<()> {
        if self.show_branch_ref(name) {
            return Ok(());
        }
        self.branch_create(name)
    }

    fn checkout(&self, name: &str) -> Result<()> {
        self.checkout_branch(name, false)
    }

    fn checkout_new(&self, name: &str) -> Result<()> {
        self.checkout_branch(name, true)
    }

    fn pull_current(&self) -> Result<()> {
        self.pull()
    }

    fn push_with_upstream(&self, name: &str) -> Result<()> {
        self.push_set_upstream(name)
    }

    fn remote_branch_exists(&self, name: &str) -> bool {
        self.ls_remote_has_branch(name)
    }

    fn delete_local(&self, name: &str) -> Result<()> {
        self.branch_delete(name)
    }

    fn delete_remote(&self, name: &str) -> Result<()> {
        self.push_delete(name)
    }

    fn list_local_branch_names(&self) -> Vec<String> {
        self.local_branches().unwrap_or_default()
    }

    fn config_get(&self, key: &str) -> Result<Option<String>> {
        self.config_value(key)
    }

    fn config_set(&self, key: &str, value: &str) -> Result<()> {
        self.config_write(key, value)
    }

    fn config_list(&self, prefix: &str) -> Result<Vec<(String, String)>> {
        self.config_entries(prefix)
    }
}

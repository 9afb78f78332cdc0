//! In-memory [`GitGateway`] for tests.
//!
//! Keeps a tiny model of the repository (local branches, remote branches,
//! the checked-out branch, config entries) and records every call so tests
//! can assert on the exact sequence of git operations.
//!
//! ```ignore
//! let git = RecordingGit::new().with_local_branches(["uat"]);
//! start::execute(&params, &config, &git, &mut prompter, &mut NullSink)?;
//! assert_eq!(git.calls()[1], GitCall::Checkout("uat".into()));
//! ```

use super::GitGateway;
use crate::error::{DflowError, Result};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// One recorded gateway call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GitCall {
    BranchExistsLocally(String),
    CreateLocalBranch(String),
    Checkout(String),
    CheckoutNew(String),
    PullCurrent,
    PushWithUpstream(String),
    RemoteBranchExists(String),
    DeleteLocal(String),
    DeleteRemote(String),
    ListLocalBranchNames,
    ConfigGet(String),
    ConfigSet(String, String),
    ConfigList(String),
}

#[derive(Debug, Default)]
struct RepoState {
    calls: Vec<GitCall>,
    local: BTreeSet<String>,
    remote: BTreeSet<String>,
    current: Option<String>,
    config: BTreeMap<String, String>,
    failures: HashMap<GitCall, String>,
}

#[derive(Debug, Default)]
pub struct RecordingGit {
    state: RefCell<RepoState>,
}

impl RecordingGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_local_branches<I, S>(self, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state
            .borrow_mut()
            .local
            .extend(branches.into_iter().map(Into::into));
        self
    }

    pub fn with_remote_branches<I, S>(self, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state
            .borrow_mut()
            .remote
            .extend(branches.into_iter().map(Into::into));
        self
    }

    pub fn with_config(self, key: &str, value: &str) -> Self {
        self.state
            .borrow_mut()
            .config
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Make `call` fail with `stderr` instead of touching the model.
    pub fn fail_on(self, call: GitCall, stderr: &str) -> Self {
        self.state
            .borrow_mut()
            .failures
            .insert(call, stderr.to_string());
        self
    }

    pub fn calls(&self) -> Vec<GitCall> {
        self.state.borrow().calls.clone()
    }

    pub fn current_branch(&self) -> Option<String> {
        self.state.borrow().current.clone()
    }

    pub fn has_local_branch(&self, name: &str) -> bool {
        self.state.borrow().local.contains(name)
    }

    pub fn has_remote_branch(&self, name: &str) -> bool {
        self.state.borrow().remote.contains(name)
    }

    pub fn config_value(&self, key: &str) -> Option<String> {
        self.state.borrow().config.get(key).cloned()
    }

    fn record(&self, call: GitCall) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let failure = state.failures.get(&call).cloned();
        let command = describe(&call);
        state.calls.push(call);
        match failure {
            Some(stderr) => Err(DflowError::Process { command, stderr }),
            None => Ok(()),
        }
    }
}

fn describe(call: &GitCall) -> String {
    match call {
        GitCall::BranchExistsLocally(name) => format!("show-ref refs/heads/{name}"),
        GitCall::CreateLocalBranch(name) => format!("branch {name}"),
        GitCall::Checkout(name) => format!("checkout {name}"),
        GitCall::CheckoutNew(name) => format!("checkout -b {name}"),
        GitCall::PullCurrent => "pull".to_string(),
        GitCall::PushWithUpstream(name) => format!("push --set-upstream origin {name}"),
        GitCall::RemoteBranchExists(name) => format!("ls-remote --heads origin {name}"),
        GitCall::DeleteLocal(name) => format!("branch -D {name}"),
        GitCall::DeleteRemote(name) => format!("push origin --delete {name}"),
        GitCall::ListLocalBranchNames => "for-each-ref refs/heads/".to_string(),
        GitCall::ConfigGet(key) => format!("config --get {key}"),
        GitCall::ConfigSet(key, value) => format!("config {key} {value}"),
        GitCall::ConfigList(prefix) => format!("config --get-regexp ^{prefix}"),
    }
}

fn process_error(command: &str, stderr: String) -> DflowError {
    DflowError::Process {
        command: command.to_string(),
        stderr,
    }
}

impl GitGateway for RecordingGit {
    fn branch_exists_locally(&self, name: &str) -> bool {
        self.record(GitCall::BranchExistsLocally(name.into()))
            .is_ok()
            && self.has_local_branch(name)
    }

    fn create_local_branch(&self, name: &str) -> Result<()> {
        self.record(GitCall::CreateLocalBranch(name.into()))?;
        self.state.borrow_mut().local.insert(name.to_string());
        Ok(())
    }

    fn checkout(&self, name: &str) -> Result<()> {
        self.record(GitCall::Checkout(name.into()))?;
        let mut state = self.state.borrow_mut();
        if !state.local.contains(name) {
            return Err(process_error(
                &format!("checkout {name}"),
                format!("error: pathspec '{name}' did not match any file(s) known to git"),
            ));
        }
        state.current = Some(name.to_string());
        Ok(())
    }

    fn checkout_new(&self, name: &str) -> Result<()> {
        self.record(GitCall::CheckoutNew(name.into()))?;
        let mut state = self.state.borrow_mut();
        if !state.local.insert(name.to_string()) {
            return Err(process_error(
                &format!("checkout -b {name}"),
                format!("fatal: a branch named '{name}' already exists"),
            ));
        }
        state.current = Some(name.to_string());
        Ok(())
    }

    fn pull_current(&self) -> Result<()> {
        self.record(GitCall::PullCurrent)
    }

    fn push_with_upstream(&self, name: &str) -> Result<()> {
        self.record(GitCall::PushWithUpstream(name.into()))?;
        self.state.borrow_mut().remote.insert(name.to_string());
        Ok(())
    }

    fn remote_branch_exists(&self, name: &str) -> bool {
        self.record(GitCall::RemoteBranchExists(name.into()))
            .is_ok()
            && self.has_remote_branch(name)
    }

    fn delete_local(&self, name: &str) -> Result<()> {
        self.record(GitCall::DeleteLocal(name.into()))?;
        if !self.state.borrow_mut().local.remove(name) {
            return Err(process_error(
                &format!("branch -D {name}"),
                format!("error: branch '{name}' not found"),
            ));
        }
        Ok(())
    }

    fn delete_remote(&self, name: &str) -> Result<()> {
        self.record(GitCall::DeleteRemote(name.into()))?;
        if !self.state.borrow_mut().remote.remove(name) {
            return Err(process_error(
                &format!("push origin --delete {name}"),
                format!("error: unable to delete '{name}': remote ref does not exist"),
            ));
        }
        Ok(())
    }

    fn list_local_branch_names(&self) -> Vec<String> {
        if self.record(GitCall::ListLocalBranchNames).is_err() {
            return Vec::new();
        }
        self.state.borrow().local.iter().cloned().collect()
    }

    fn config_get(&self, key: &str) -> Result<Option<String>> {
        self.record(GitCall::ConfigGet(key.into()))?;
        Ok(self.config_value(key))
    }

    fn config_set(&self, key: &str, value: &str) -> Result<()> {
        self.record(GitCall::ConfigSet(key.into(), value.into()))?;
        self.state
            .borrow_mut()
            .config
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn config_list(&self, prefix: &str) -> Result<Vec<(String, String)>> {
        self.record(GitCall::ConfigList(prefix.into()))?;
        Ok(self
            .state
            .borrow()
            .config
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_requires_existing_branch() {
        let git = RecordingGit::new().with_local_branches(["main"]);
        assert!(git.checkout("main").is_ok());
        assert_eq!(git.current_branch().as_deref(), Some("main"));
        assert!(matches!(
            git.checkout("nope"),
            Err(DflowError::Process { .. })
        ));
    }

    #[test]
    fn test_checkout_new_refuses_duplicates() {
        let git = RecordingGit::new().with_local_branches(["main"]);
        assert!(git.checkout_new("feature/a").is_ok());
        assert!(git.checkout_new("feature/a").is_err());
        assert_eq!(git.current_branch().as_deref(), Some("feature/a"));
    }

    #[test]
    fn test_fail_on_reports_stderr() {
        let git = RecordingGit::new().fail_on(GitCall::PullCurrent, "fatal: no upstream");
        match git.pull_current() {
            Err(DflowError::Process { command, stderr }) => {
                assert_eq!(command, "pull");
                assert_eq!(stderr, "fatal: no upstream");
            }
            other => panic!("expected process error, got {other:?}"),
        }
        assert_eq!(git.calls(), vec![GitCall::PullCurrent]);
    }

    #[test]
    fn test_list_local_branch_names_is_best_effort() {
        let git = RecordingGit::new()
            .with_local_branches(["b", "a"])
            .fail_on(GitCall::ListLocalBranchNames, "boom");
        assert!(git.list_local_branch_names().is_empty());

        let git = RecordingGit::new().with_local_branches(["b", "a"]);
        assert_eq!(git.list_local_branch_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_config_list_filters_by_prefix() {
        let git = RecordingGit::new()
            .with_config("dflow.author", "Jane")
            .with_config("user.name", "Someone");
        assert_eq!(
            git.config_list("dflow.").unwrap(),
            vec![("dflow.author".to_string(), "Jane".to_string())]
        );
    }
}

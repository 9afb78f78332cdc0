//! Core logic for `dflow delete`.
//!
//! Deletes a working branch locally and on the remote. The configured base
//! branches are never deleted.

use crate::config::WorkflowConfig;
use crate::core::ProgressSink;
use crate::error::{DflowError, Result};
use crate::git::GitGateway;
use crate::prompt::Prompter;
use crate::validate;

/// Input parameters for the delete operation.
pub struct DeleteParams {
    /// Branch to delete; picked interactively when `None`.
    pub branch: Option<String>,
    /// Skip the confirmation prompt.
    pub assume_yes: bool,
}

/// What was actually deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    pub branch: String,
    pub local_deleted: bool,
    pub remote_deleted: bool,
}

impl DeleteResult {
    /// Human-readable summary, e.g. "local branch, remote branch".
    pub fn deleted_parts(&self) -> String {
        let mut parts = Vec::new();
        if self.local_deleted {
            parts.push("local branch");
        }
        if self.remote_deleted {
            parts.push("remote branch");
        }
        parts.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(DeleteResult),
    /// The user declined the confirmation.
    Aborted(String),
    /// No branch was given and there was nothing to pick from.
    NothingToDelete,
}

/// Whether `branch` is one of the configured long-lived branches.
pub fn is_protected(config: Option<&WorkflowConfig>, branch: &str) -> bool {
    config.is_some_and(|config| {
        config
            .base_branches()
            .iter()
            .any(|base| !base.is_empty() && *base == branch)
    })
}

/// Execute the delete operation.
pub fn execute(
    params: &DeleteParams,
    config: Option<&WorkflowConfig>,
    git: &dyn GitGateway,
    prompter: &mut dyn Prompter,
    sink: &mut dyn ProgressSink,
) -> Result<DeleteOutcome> {
    let branch = match &params.branch {
        Some(branch) => branch.trim().to_string(),
        None => match pick_branch(config, git, prompter)? {
            Some(branch) => branch,
            None => return Ok(DeleteOutcome::NothingToDelete),
        },
    };

    validate::validate(&branch).map_err(|reason| DflowError::InvalidName {
        name: branch.clone(),
        reason,
    })?;
    if is_protected(config, &branch) {
        return Err(DflowError::ProtectedBranch(branch));
    }

    let local = git.branch_exists_locally(&branch);
    let remote = git.remote_branch_exists(&branch);
    sink.on_debug(&format!("'{branch}': local={local}, remote={remote}"));
    if !local && !remote {
        return Err(DflowError::BranchNotFound(branch));
    }

    if !params.assume_yes {
        let location = match (local, remote) {
            (true, true) => "locally and on the remote",
            (true, false) => "locally",
            _ => "on the remote",
        };
        let confirmed =
            prompter.confirm(&format!("Delete branch '{branch}' {location}?"), false)?;
        if !confirmed {
            return Ok(DeleteOutcome::Aborted(branch));
        }
    }

    if local {
        sink.on_step(&format!("Deleting local branch '{branch}'..."));
        git.delete_local(&branch)?;
    } else {
        sink.on_warning(&format!("Local branch '{branch}' not found, skipping"));
    }

    // Re-checked right before deleting; the remote may have changed while
    // the confirmation was pending.
    let remote_deleted = if remote {
        sink.on_step(&format!("Deleting remote branch '{branch}'..."));
        git.delete_remote_if_exists(&branch)?
    } else {
        false
    };

    Ok(DeleteOutcome::Deleted(DeleteResult {
        branch,
        local_deleted: local,
        remote_deleted,
    }))
}

fn pick_branch(
    config: Option<&WorkflowConfig>,
    git: &dyn GitGateway,
    prompter: &mut dyn Prompter,
) -> Result<Option<String>> {
    let candidates: Vec<String> = git
        .list_local_branch_names()
        .into_iter()
        .filter(|branch| !is_protected(config, branch))
        .collect();
    if candidates.is_empty() {
        return Ok(None);
    }
    let index = prompter.select("Select a branch to delete", &candidates, 0)?;
    Ok(candidates.into_iter().nth(index))
}

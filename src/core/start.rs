//! Core logic for `dflow start`.
//!
//! Creates a working branch from the base branch its type is configured to
//! start from: checkout base, pull, create, and optionally publish.

use crate::config::{MergeMode, WorkflowConfig};
use crate::core::ProgressSink;
use crate::error::{DflowError, Result};
use crate::flow;
use crate::git::GitGateway;
use crate::prompt::Prompter;

/// Whether to publish the new branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushPolicy {
    Ask,
    Always,
    Never,
}

impl PushPolicy {
    pub fn from_flags(push: bool, no_push: bool) -> Self {
        match (push, no_push) {
            (true, _) => Self::Always,
            (false, true) => Self::Never,
            (false, false) => Self::Ask,
        }
    }
}

/// Input parameters for the start operation.
pub struct StartParams {
    /// Branch type keyword (`feat`, `release`, `hotfix`, ...).
    pub kind: String,
    /// Free-text short name; whitespace becomes hyphens.
    pub name: String,
    pub push: PushPolicy,
}

/// Where a finished branch is meant to land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeTarget {
    pub branch: String,
    pub mode: MergeMode,
}

/// Result of a start operation.
#[derive(Debug)]
pub struct StartResult {
    pub branch: String,
    pub base: String,
    pub pushed: bool,
    pub merge_target: Option<MergeTarget>,
}

/// Execute the start operation.
///
/// The name is resolved and validated before git is touched; after that each
/// git step aborts the rest of the sequence on failure.
pub fn execute(
    params: &StartParams,
    config: &WorkflowConfig,
    git: &dyn GitGateway,
    prompter: &mut dyn Prompter,
    sink: &mut dyn ProgressSink,
) -> Result<StartResult> {
    let plan = flow::plan(config, &params.kind, &params.name)?;
    let branch = plan.composed_name;
    sink.on_debug(&format!(
        "{} branch '{branch}' from '{}'",
        plan.branch_type, plan.base
    ));

    if git.branch_exists_locally(&branch) {
        return Err(DflowError::BranchExists(branch));
    }

    sink.on_step(&format!("Checking out base branch '{}'...", plan.base));
    git.checkout(&plan.base)?;

    sink.on_step(&format!("Pulling latest changes into '{}'...", plan.base));
    git.pull_current()?;

    sink.on_step(&format!("Creating branch '{branch}'..."));
    git.checkout_new(&branch)?;

    let pushed = match params.push {
        PushPolicy::Always => true,
        PushPolicy::Never => false,
        PushPolicy::Ask => {
            match prompter.confirm(&format!("Publish '{branch}' to the remote?"), true) {
                Ok(answer) => answer,
                Err(DflowError::Prompt(reason)) => {
                    sink.on_warning(&format!("{reason}; skipping push"));
                    false
                }
                Err(e) => return Err(e),
            }
        }
    };

    if pushed {
        sink.on_step(&format!("Pushing '{branch}' and setting upstream..."));
        git.push_with_upstream(&branch)?;
    }

    let merge_target = plan
        .branch_type
        .merge_target(config)
        .map(|target| MergeTarget {
            branch: target.to_string(),
            mode: config.merge_mode_for(target),
        });

    Ok(StartResult {
        branch,
        base: plan.base,
        pushed,
        merge_target,
    })
}

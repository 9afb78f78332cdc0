//! Core logic for `dflow init`.
//!
//! Asks for the long-lived branch names and merge behaviour, writes
//! `.dflow.yaml`, makes sure the base branches exist, and optionally
//! publishes them.

use crate::config::{Branches, ConfigStore, Flow, MergeMode, Workflow, WorkflowConfig};
use crate::core::ProgressSink;
use crate::error::Result;
use crate::git::GitGateway;
use crate::prompt::{branch_name_input, Prompter};
use std::path::PathBuf;

/// Prefixes written into every new configuration.
pub mod prefixes {
    pub const FEATURES: &str = "feature/";
    pub const RELEASES: &str = "release/";
    pub const HOTFIXES: &str = "hotfix/";
    pub const BUGFIXES: &str = "bugfix/";
}

/// Everything the init wizard asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitAnswers {
    pub main: String,
    pub develop: String,
    pub uat: String,
    pub default_merge_mode: MergeMode,
    /// Branches that use the inverse of `default_merge_mode`.
    pub exceptions: Vec<String>,
    /// Push the base branches after creating them.
    pub push: bool,
}

/// Build the configuration `init` writes from the wizard's answers.
pub fn build_config(answers: &InitAnswers) -> WorkflowConfig {
    let inverse = answers.default_merge_mode.inverse();
    WorkflowConfig {
        branches: Branches {
            main: answers.main.clone(),
            develop: answers.develop.clone(),
            uat: answers.uat.clone(),
            features: prefixes::FEATURES.to_string(),
            releases: prefixes::RELEASES.to_string(),
            hotfixes: prefixes::HOTFIXES.to_string(),
            bugfixes: prefixes::BUGFIXES.to_string(),
        },
        flow: Flow {
            feature_base: answers.uat.clone(),
            feature_merge: answers.develop.clone(),
            release_base: answers.uat.clone(),
            hotfix_base: answers.main.clone(),
            bugfix_base: answers.develop.clone(),
        },
        workflow: Workflow {
            default_merge_mode: answers.default_merge_mode,
            branch_rules: answers
                .exceptions
                .iter()
                .map(|branch| (branch.clone(), inverse))
                .collect(),
        },
    }
}

const MERGE_MODE_CHOICES: [(MergeMode, &str); 2] = [
    (MergeMode::Manual, "manual (via pull requests)"),
    (MergeMode::Auto, "auto (direct merge from the CLI)"),
];

/// Run the interactive wizard.
pub fn ask(prompter: &mut dyn Prompter) -> Result<InitAnswers> {
    let main = prompter.input("Main branch name", Some("main"), &branch_name_input)?;
    let develop = prompter.input("Development branch name", Some("develop"), &branch_name_input)?;
    let uat = prompter.input("UAT branch name", Some("uat"), &branch_name_input)?;

    let labels: Vec<String> = MERGE_MODE_CHOICES
        .iter()
        .map(|(_, label)| label.to_string())
        .collect();
    let choice = prompter.select(
        "How do you manage merges by default in this project?",
        &labels,
        0,
    )?;
    let default_merge_mode = MERGE_MODE_CHOICES
        .get(choice)
        .map(|(mode, _)| *mode)
        .unwrap_or_default();

    let branches = dedup([main.as_str(), develop.as_str(), uat.as_str()]);
    let picked = prompter.multi_select(
        &format!(
            "Which branches should use '{}' instead of the default '{default_merge_mode}'?",
            default_merge_mode.inverse()
        ),
        &branches,
    )?;
    let exceptions = picked
        .into_iter()
        .filter_map(|index| branches.get(index).cloned())
        .collect();

    let push = prompter.confirm("Push the base branches to the remote?", true)?;

    Ok(InitAnswers {
        main,
        develop,
        uat,
        default_merge_mode,
        exceptions,
        push,
    })
}

/// Input parameters for the init operation.
pub struct InitParams {
    /// Overwrite an existing `.dflow.yaml` without asking.
    pub force: bool,
}

/// Result of a completed init.
#[derive(Debug)]
pub struct InitResult {
    pub path: PathBuf,
    pub config: WorkflowConfig,
    /// Base branches that did not exist and were created.
    pub created: Vec<String>,
    pub pushed: Vec<String>,
}

#[derive(Debug)]
pub enum InitOutcome {
    Initialized(InitResult),
    /// An existing configuration was kept.
    Kept,
}

/// Execute the init operation.
pub fn execute(
    params: &InitParams,
    store: &ConfigStore,
    git: &dyn GitGateway,
    prompter: &mut dyn Prompter,
    sink: &mut dyn ProgressSink,
) -> Result<InitOutcome> {
    if store.exists() && !params.force {
        let overwrite = prompter.confirm(
            &format!("{} already exists. Overwrite it?", store.path().display()),
            false,
        )?;
        if !overwrite {
            return Ok(InitOutcome::Kept);
        }
    }

    let answers = ask(prompter)?;
    apply(&answers, store, git, sink).map(InitOutcome::Initialized)
}

/// Write the configuration for `answers` and prepare the base branches.
pub fn apply(
    answers: &InitAnswers,
    store: &ConfigStore,
    git: &dyn GitGateway,
    sink: &mut dyn ProgressSink,
) -> Result<InitResult> {
    let config = build_config(answers);
    store.save(&config)?;
    sink.on_step(&format!("Wrote {}", store.path().display()));

    let bases = dedup(config.base_branches());
    let mut created = Vec::new();
    for branch in &bases {
        if git.branch_exists_locally(branch) {
            sink.on_debug(&format!("Branch '{branch}' already exists"));
            continue;
        }
        sink.on_step(&format!("Creating branch '{branch}'..."));
        git.create_local_branch(branch)?;
        created.push(branch.clone());
    }

    let mut pushed = Vec::new();
    if answers.push {
        for branch in &bases {
            sink.on_step(&format!("Pushing '{branch}'..."));
            git.push_with_upstream(branch)?;
            pushed.push(branch.clone());
        }
    }

    Ok(InitResult {
        path: store.path(),
        config,
        created,
        pushed,
    })
}

fn dedup<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for name in names {
        if !name.is_empty() && !unique.iter().any(|seen| seen == name) {
            unique.push(name.to_string());
        }
    }
    unique
}

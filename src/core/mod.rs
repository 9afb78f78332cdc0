//! Core workflows behind the dflow commands.
//!
//! Each submodule exposes an `execute` function that takes its git access,
//! prompts and progress reporting as trait objects and returns a result
//! struct for the command layer to render. Nothing here prints directly.

pub mod author;
pub mod delete;
pub mod init;
mod progress;
pub mod start;

pub use progress::OutputSink;

/// Trait for core operations to report progress without depending on `Output`.
///
/// Commands wrap their `Output` in an [`OutputSink`]. Tests can use
/// [`NullSink`] or wrap a `TestOutput`.
pub trait ProgressSink {
    /// Report an intermediate step (shown in verbose mode).
    fn on_step(&mut self, msg: &str);

    /// Report a warning (always shown).
    fn on_warning(&mut self, msg: &str);

    /// Report a debug message (shown in verbose mode).
    fn on_debug(&mut self, msg: &str);
}

/// A no-op sink that discards all progress messages.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn on_step(&mut self, _msg: &str) {}
    fn on_warning(&mut self, _msg: &str) {}
    fn on_debug(&mut self, _msg: &str) {}
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::config::{Branches, Flow, MergeMode, Workflow, WorkflowConfig};
    use std::collections::BTreeMap;

    /// The configuration `dflow init` writes with every default accepted.
    pub fn config() -> WorkflowConfig {
        WorkflowConfig {
            branches: Branches {
                main: "main".into(),
                develop: "develop".into(),
                uat: "uat".into(),
                features: "feature/".into(),
                releases: "release/".into(),
                hotfixes: "hotfix/".into(),
                bugfixes: "bugfix/".into(),
            },
            flow: Flow {
                feature_base: "uat".into(),
                feature_merge: "develop".into(),
                release_base: "uat".into(),
                hotfix_base: "main".into(),
                bugfix_base: "develop".into(),
            },
            workflow: Workflow {
                default_merge_mode: MergeMode::Manual,
                branch_rules: BTreeMap::from([("develop".to_string(), MergeMode::Auto)]),
            },
        }
    }
}

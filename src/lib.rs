//! dflow: a Git branching workflow helper.
//!
//! Branch layout lives in `.dflow.yaml` ([`config`]); [`flow`] turns a type
//! keyword and a short name into a branch plan; [`git`] runs the branch
//! operations; [`core`] strings them together behind the CLI in
//! [`commands`].

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use which::which;

pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod flow;
pub mod git;
pub mod logging;
pub mod output;
pub mod prompt;
pub mod settings;
pub mod styles;
pub mod validate;

pub use config::{ConfigStore, WorkflowConfig};
pub use error::DflowError;
pub use settings::DflowSettings;

/// Clean package version, used by clap.
pub const VERSION: &str = env!("DFLOW_VERSION");

/// Version shown in the banner; carries the commit hash on dev builds.
pub const VERSION_DISPLAY: &str = env!("DFLOW_VERSION_DISPLAY");

const BANNER: &str = r#"
                ██████╗ ███████╗██╗      ██████╗ ██╗    ██╗
                ██╔══██╗██╔════╝██║     ██╔═══██╗██║    ██║
                ██║  ██║█████╗  ██║     ██║   ██║██║ █╗ ██║
                ██║  ██║██╔══╝  ██║     ██║   ██║██║███╗██║
                ██████╔╝██║     ███████╗╚██████╔╝╚███╔███╔╝
                ╚═════╝ ╚═╝     ╚══════╝ ╚═════╝  ╚══╝╚══╝"#;

/// Process-level facts handed to [`commands::run`].
#[derive(Debug, Clone)]
pub struct StartupInfo {
    pub version: String,
}

impl Default for StartupInfo {
    fn default() -> Self {
        Self {
            version: VERSION_DISPLAY.to_string(),
        }
    }
}

impl StartupInfo {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// The ASCII banner with the version line underneath.
    pub fn banner(&self) -> String {
        format!(
            "{BANNER}\n                   dflow {} - Git branching made simple\n",
            self.version
        )
    }
}

/// Whether `dir` (or the current directory) is inside a git work tree.
pub fn is_git_repository(dir: Option<&Path>) -> Result<bool> {
    let mut cmd = Command::new("git");
    cmd.args(["rev-parse", "--is-inside-work-tree"])
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    let status = cmd
        .status()
        .context("Failed to check if inside Git repository")?;

    Ok(status.success())
}

pub fn check_dependencies() -> Result<()> {
    let missing: Vec<&str> = ["git"]
        .into_iter()
        .filter(|tool| which(tool).is_err())
        .collect();

    if !missing.is_empty() {
        anyhow::bail!("Missing required dependencies: {}", missing.join(", "));
    }

    Ok(())
}

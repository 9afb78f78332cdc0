//! The `.dflow.yaml` workflow configuration.
//!
//! The file lives at the repository root and is written once by `dflow init`.
//! Every other command reads it to resolve branch prefixes and base branches.
//!
//! ```yaml
//! branches:
//!   main: main
//!   develop: develop
//!   uat: uat
//!   features: feature/
//!   releases: release/
//!   hotfixes: hotfix/
//!   bugfixes: bugfix/
//! flow:
//!   feature_base: uat
//!   feature_merge: develop
//!   release_base: uat
//!   hotfix_base: main
//!   bugfix_base: develop
//! workflow:
//!   default_merge_mode: manual
//!   branch_rules:
//!     develop: auto
//! ```

use crate::error::{DflowError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Name of the configuration file at the repository root.
pub const CONFIG_FILE_NAME: &str = ".dflow.yaml";

/// Environment variable that redirects the configuration directory.
pub const CWD_OVERRIDE_ENV: &str = "DFLOW_CWD";

/// Comment block written above the YAML content on every save.
const CONFIG_HEADER: &str = r#"
#
#               ██████╗ ███████╗██╗      ██████╗ ██╗    ██╗
#               ██╔══██╗██╔════╝██║     ██╔═══██╗██║    ██║
#               ██║  ██║█████╗  ██║     ██║   ██║██║ █╗ ██║
#               ██║  ██║██╔══╝  ██║     ██║   ██║██║███╗██║
#               ██████╔╝██║     ███████╗╚██████╔╝╚███╔███╔╝
#               ╚═════╝ ╚═╝     ╚══════╝ ╚═════╝  ╚══╝╚══╝

#            dflow config file - autogenerated by 'dflow init'
"#;

/// How work lands on a branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// dflow merges directly with git.
    Auto,
    /// Changes go through pull requests on the hosting platform.
    #[default]
    Manual,
}

impl MergeMode {
    pub fn inverse(self) -> Self {
        match self {
            Self::Auto => Self::Manual,
            Self::Manual => Self::Auto,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Long-lived branch names and short-lived branch prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branches {
    pub main: String,
    pub develop: String,
    pub uat: String,
    pub features: String,
    pub releases: String,
    pub hotfixes: String,
    pub bugfixes: String,
}

/// Which branch each branch type starts from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flow {
    pub feature_base: String,
    pub feature_merge: String,
    pub release_base: String,
    pub hotfix_base: String,
    pub bugfix_base: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workflow {
    pub default_merge_mode: MergeMode,
    /// Per-branch exceptions to `default_merge_mode`.
    pub branch_rules: BTreeMap<String, MergeMode>,
}

/// The whole `.dflow.yaml` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub branches: Branches,
    pub flow: Flow,
    pub workflow: Workflow,
}

impl WorkflowConfig {
    /// Merge mode for `branch`, falling back to the default mode.
    pub fn merge_mode_for(&self, branch: &str) -> MergeMode {
        resolve_merge_mode(self, branch)
    }

    /// The long-lived branches, in `main`, `develop`, `uat` order.
    pub fn base_branches(&self) -> [&str; 3] {
        [
            self.branches.main.as_str(),
            self.branches.develop.as_str(),
            self.branches.uat.as_str(),
        ]
    }
}

/// Returns `branch_rules[branch]` when present, else `default_merge_mode`.
pub fn resolve_merge_mode(config: &WorkflowConfig, branch: &str) -> MergeMode {
    config
        .workflow
        .branch_rules
        .get(branch)
        .copied()
        .unwrap_or(config.workflow.default_merge_mode)
}

/// Reads and writes `.dflow.yaml` in one directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store for `$DFLOW_CWD`, or the current directory when unset.
    pub fn discover() -> Result<Self> {
        match std::env::var_os(CWD_OVERRIDE_ENV) {
            Some(dir) if !dir.is_empty() => Ok(Self::new(dir)),
            _ => {
                let cwd = std::env::current_dir().map_err(|source| DflowError::Read {
                    path: PathBuf::from("."),
                    source,
                })?;
                Ok(Self::new(cwd))
            }
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    /// Fail with [`DflowError::NotInitialized`] unless `.dflow.yaml` exists.
    pub fn ensure_initialized(&self) -> Result<()> {
        if self.exists() {
            Ok(())
        } else {
            Err(DflowError::NotInitialized { path: self.path() })
        }
    }

    /// Load the configuration.
    ///
    /// A missing file is reported as [`DflowError::NotInitialized`]. A file
    /// holding nothing but comments loads as an empty configuration.
    pub fn load(&self) -> Result<WorkflowConfig> {
        let path = self.path();
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DflowError::NotInitialized { path });
            }
            Err(source) => return Err(DflowError::Read { path, source }),
        };

        if is_blank_document(&contents) {
            crate::log_debug!("{} has no content, using empty config", path.display());
            return Ok(WorkflowConfig::default());
        }

        serde_yaml::from_str(&contents).map_err(|source| DflowError::Parse { path, source })
    }

    /// Write the configuration, replacing any existing file.
    pub fn save(&self, config: &WorkflowConfig) -> Result<()> {
        let yaml = serde_yaml::to_string(config).map_err(DflowError::Serialize)?;
        let contents = format!("{CONFIG_HEADER}\n{yaml}");
        let path = self.path();

        let write_err = |source| DflowError::Write {
            path: path.clone(),
            source,
        };

        // Write next to the target and rename so a failed write never leaves
        // a truncated config behind.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        tmp.write_all(contents.as_bytes()).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        tmp.persist(&path).map_err(|e| write_err(e.error))?;

        crate::log_debug!("Wrote {}", path.display());
        Ok(())
    }
}

fn is_blank_document(contents: &str) -> bool {
    contents.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}

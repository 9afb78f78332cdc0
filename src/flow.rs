//! Branch type resolution.
//!
//! Maps a branch type keyword (`feat`, `hotfix`, ...) to the prefix and base
//! branch configured in `.dflow.yaml`, and composes the full branch name.

use crate::config::WorkflowConfig;
use crate::error::{DflowError, Result};
use crate::validate;
use std::fmt;
use std::str::FromStr;

/// Every keyword `dflow start` accepts, in help order.
pub const ACCEPTED_KEYWORDS: &[&str] = &[
    "feat", "feature", "release", "hot", "hotfix", "fix", "bug", "bugfix",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchType {
    Feature,
    Release,
    Hotfix,
    Bugfix,
}

impl BranchType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Release => "release",
            Self::Hotfix => "hotfix",
            Self::Bugfix => "bugfix",
        }
    }

    /// The prefix and base branch for this type.
    ///
    /// Empty fields (e.g. a config written before bugfix support) are
    /// reported instead of producing a branch off nothing.
    pub fn rule(self, config: &WorkflowConfig) -> Result<BranchRule> {
        let (prefix, prefix_field, base, base_field) = match self {
            Self::Feature => (
                &config.branches.features,
                "branches.features",
                &config.flow.feature_base,
                "flow.feature_base",
            ),
            Self::Release => (
                &config.branches.releases,
                "branches.releases",
                &config.flow.release_base,
                "flow.release_base",
            ),
            Self::Hotfix => (
                &config.branches.hotfixes,
                "branches.hotfixes",
                &config.flow.hotfix_base,
                "flow.hotfix_base",
            ),
            Self::Bugfix => (
                &config.branches.bugfixes,
                "branches.bugfixes",
                &config.flow.bugfix_base,
                "flow.bugfix_base",
            ),
        };

        if prefix.is_empty() {
            return Err(DflowError::IncompleteConfig {
                field: prefix_field,
            });
        }
        if base.is_empty() {
            return Err(DflowError::IncompleteConfig { field: base_field });
        }

        Ok(BranchRule {
            prefix: prefix.clone(),
            base: base.clone(),
        })
    }

    /// Where finished work of this type is meant to be merged, if configured.
    pub fn merge_target(self, config: &WorkflowConfig) -> Option<&str> {
        match self {
            Self::Feature if !config.flow.feature_merge.is_empty() => {
                Some(config.flow.feature_merge.as_str())
            }
            _ => None,
        }
    }
}

impl FromStr for BranchType {
    type Err = DflowError;

    fn from_str(keyword: &str) -> Result<Self> {
        match keyword {
            "feat" | "feature" => Ok(Self::Feature),
            "release" => Ok(Self::Release),
            "hot" | "hotfix" | "fix" => Ok(Self::Hotfix),
            "bug" | "bugfix" => Ok(Self::Bugfix),
            _ => Err(DflowError::UnknownType {
                keyword: keyword.to_string(),
                accepted: ACCEPTED_KEYWORDS,
            }),
        }
    }
}

impl fmt::Display for BranchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRule {
    pub prefix: String,
    pub base: String,
}

/// Everything `dflow start` needs to create a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBranchPlan {
    pub branch_type: BranchType,
    pub prefix: String,
    pub base: String,
    pub composed_name: String,
}

/// Resolve the prefix and base branch for a type keyword.
pub fn resolve(config: &WorkflowConfig, keyword: &str) -> Result<BranchRule> {
    keyword.parse::<BranchType>()?.rule(config)
}

/// Collapse whitespace runs into single hyphens: "fix login bug" -> "fix-login-bug".
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Resolve, compose and validate the branch name for `dflow start`.
///
/// Pure: nothing here touches git, so a bad name aborts before any checkout.
pub fn plan(config: &WorkflowConfig, keyword: &str, raw_name: &str) -> Result<ResolvedBranchPlan> {
    let branch_type: BranchType = keyword.parse()?;
    let BranchRule { prefix, base } = branch_type.rule(config)?;
    let composed_name = format!("{prefix}{}", normalize_name(raw_name));

    validate::validate(&composed_name).map_err(|reason| DflowError::InvalidName {
        name: composed_name.clone(),
        reason,
    })?;

    Ok(ResolvedBranchPlan {
        branch_type,
        prefix,
        base,
        composed_name,
    })
}

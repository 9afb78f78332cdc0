mod common;

use anyhow::Result;
use assert_cmd::Command;
use common::TestRepo;
use dflow::config::{ConfigStore, MergeMode, CWD_OVERRIDE_ENV};
use dflow::core::init::{build_config, InitAnswers};
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn dflow(dir: &Path) -> Result<Command> {
    let mut cmd = Command::cargo_bin("dflow")?;
    cmd.current_dir(dir).env(CWD_OVERRIDE_ENV, dir);
    Ok(cmd)
}

/// A repository with `.dflow.yaml` and published main/develop/uat branches.
fn initialized_repo() -> Result<TestRepo> {
    let repo = TestRepo::new()?;
    let config = build_config(&InitAnswers {
        main: "main".into(),
        develop: "develop".into(),
        uat: "uat".into(),
        default_merge_mode: MergeMode::Manual,
        exceptions: vec!["develop".into()],
        push: true,
    });
    ConfigStore::new(&repo.path).save(&config)?;
    for branch in ["develop", "uat"] {
        repo.git(&["branch", branch])?;
    }
    for branch in ["main", "develop", "uat"] {
        repo.git(&["push", "--quiet", "--set-upstream", "origin", branch])?;
    }
    Ok(repo)
}

#[test]
fn test_help_lists_commands() -> Result<()> {
    let dir = TempDir::new()?;
    dflow(dir.path())?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("DFLOW_CWD"));
    Ok(())
}

#[test]
fn test_version() -> Result<()> {
    let dir = TempDir::new()?;
    dflow(dir.path())?
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn test_usage_errors_exit_with_one() -> Result<()> {
    let dir = TempDir::new()?;
    dflow(dir.path())?
        .args(["start", "feat"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("NAME"));
    Ok(())
}

#[test]
fn test_outside_git_repository() -> Result<()> {
    let dir = TempDir::new()?;
    dflow(dir.path())?
        .args(["start", "feat", "x", "--no-push"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a Git repository"));
    Ok(())
}

#[test]
fn test_start_requires_init() -> Result<()> {
    let repo = TestRepo::new()?;
    dflow(&repo.path)?
        .args(["start", "feat", "x", "--no-push"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("dflow init"));
    Ok(())
}

#[test]
fn test_start_unknown_type() -> Result<()> {
    let repo = initialized_repo()?;
    dflow(&repo.path)?
        .args(["start", "bogus", "x", "--no-push"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown branch type 'bogus'"))
        .stderr(predicate::str::contains("feat, feature"));
    assert_eq!(repo.current_branch()?, "main");
    Ok(())
}

#[test]
fn test_start_invalid_name() -> Result<()> {
    let repo = initialized_repo()?;
    dflow(&repo.path)?
        .args(["start", "feat", "bad..name", "--no-push"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot contain '..'"));
    assert_eq!(repo.current_branch()?, "main");
    Ok(())
}

#[test]
fn test_start_then_delete() -> Result<()> {
    let repo = initialized_repo()?;

    dflow(&repo.path)?
        .args(["start", "feat", "login", "form", "--push"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Created and switched to branch 'feature/login-form' from 'uat'",
        ))
        .stdout(predicate::str::contains("develop (auto merge)"));
    assert_eq!(repo.current_branch()?, "feature/login-form");
    assert!(repo.has_remote_branch("feature/login-form"));

    dflow(&repo.path)?
        .args(["start", "feat", "login-form", "--no-push"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    repo.git(&["checkout", "--quiet", "main"])?;
    dflow(&repo.path)?
        .args(["-q", "delete", "feature/login-form", "--yes"])
        .assert()
        .success();
    assert!(!repo.has_local_branch("feature/login-form"));
    assert!(!repo.has_remote_branch("feature/login-form"));
    Ok(())
}

#[test]
fn test_delete_protects_base_branches() -> Result<()> {
    let repo = initialized_repo()?;
    dflow(&repo.path)?
        .args(["delete", "uat", "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("refusing to delete 'uat'"));
    assert!(repo.has_local_branch("uat"));
    Ok(())
}

#[test]
fn test_delete_unknown_branch() -> Result<()> {
    let repo = TestRepo::new()?;
    dflow(&repo.path)?
        .args(["delete", "feature/ghost", "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist locally or on the remote"));
    Ok(())
}

#[test]
fn test_config_requires_init() -> Result<()> {
    let repo = TestRepo::new()?;
    for args in [
        &["config", "get-author"][..],
        &["config", "list"][..],
        &["config", "set-author", "Jane Doe", "--email", "jane@example.com"][..],
    ] {
        dflow(&repo.path)?
            .args(args)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("dflow init"));
    }
    assert!(repo.git(&["config", "--local", "dflow.author"]).is_err());
    Ok(())
}

#[test]
fn test_author_config() -> Result<()> {
    let repo = initialized_repo()?;

    dflow(&repo.path)?
        .args(["config", "get-author"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("dflow config set-author"));

    dflow(&repo.path)?
        .args(["config", "set-author", "Jane Doe", "--email", "jane@example.com"])
        .assert()
        .success();

    dflow(&repo.path)?
        .args(["config", "get-author"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Author: Jane Doe"))
        .stdout(predicate::str::contains("Email: jane@example.com"));

    dflow(&repo.path)?
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dflow.author Jane Doe"));
    Ok(())
}

#[test]
fn test_completion_script() -> Result<()> {
    let dir = TempDir::new()?;
    dflow(dir.path())?
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dflow"))
        .stdout(predicate::str::contains("set-author"));
    Ok(())
}

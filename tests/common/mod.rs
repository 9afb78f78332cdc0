#![allow(dead_code)]

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A scratch repository with one commit on `main` and a bare `origin`.
pub struct TestRepo {
    _root: TempDir,
    pub path: PathBuf,
    pub remote: PathBuf,
}

impl TestRepo {
    pub fn new() -> Result<Self> {
        let root = TempDir::new()?;
        let path = root.path().join("work");
        let remote = root.path().join("origin.git");
        std::fs::create_dir_all(&path)?;

        git(root.path(), &["init", "--quiet", "--bare", "origin.git"])?;
        git(&path, &["init", "--quiet"])?;
        git(&path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
        git(
            &path,
            &[
                "-c",
                "user.name=dflow",
                "-c",
                "user.email=dflow@example.com",
                "commit",
                "--quiet",
                "--allow-empty",
                "-m",
                "initial",
            ],
        )?;
        let remote_url = remote.to_string_lossy().to_string();
        git(&path, &["remote", "add", "origin", &remote_url])?;

        Ok(Self {
            _root: root,
            path,
            remote,
        })
    }

    pub fn git(&self, args: &[&str]) -> Result<String> {
        git(&self.path, args)
    }

    pub fn current_branch(&self) -> Result<String> {
        self.git(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    pub fn has_local_branch(&self, name: &str) -> bool {
        self.git(&["show-ref", "--verify", "--quiet", &format!("refs/heads/{name}")])
            .is_ok()
    }

    pub fn has_remote_branch(&self, name: &str) -> bool {
        git(
            &self.remote,
            &["show-ref", "--verify", "--quiet", &format!("refs/heads/{name}")],
        )
        .is_ok()
    }
}

/// Run git in `dir`, returning trimmed stdout.
pub fn git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git").args(args).current_dir(dir).output()?;
    if !output.status.success() {
        bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

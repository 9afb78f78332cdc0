use super::GitCommand;
use crate::error::Result;

impl GitCommand {
    pub(crate) fn pull(&self) -> Result<()> {
        let args = self.quiet_args(&["pull"]);
        self.run(&args)?;
        Ok(())
    }

    pub(crate) fn push_set_upstream(&self, branch: &str) -> Result<()> {
        let mut args = self.quiet_args(&["push"]);
        args.extend(["--set-upstream", self.remote.as_str(), branch]);
        self.run(&args)?;
        Ok(())
    }

    /// Delete a remote branch via `git push <remote> --delete <branch>`.
    pub(crate) fn push_delete(&self, branch: &str) -> Result<()> {
        let mut args = self.quiet_args(&["push"]);
        args.extend([self.remote.as_str(), "--delete", branch]);
        self.run(&args)?;
        Ok(())
    }

    /// Whether the remote has `refs/heads/<branch>`.
    ///
    /// Uses the full ref so `x` does not match `feature/x`. Any failure
    /// (no such remote, network error) counts as "not there".
    pub(crate) fn ls_remote_has_branch(&self, branch: &str) -> bool {
        let ref_name = format!("refs/heads/{branch}");
        match self.output(&["ls-remote", "--heads", self.remote.as_str(), &ref_name]) {
            Ok(output) => output.status.success() && !output.stdout.trim_ascii().is_empty(),
            Err(_) => false,
        }
    }
}

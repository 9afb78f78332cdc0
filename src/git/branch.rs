use super::GitCommand;
use crate::error::Result;

impl GitCommand {
    pub(crate) fn show_branch_ref(&self, branch: &str) -> bool {
        let ref_name = format!("refs/heads/{branch}");
        self.succeeds(&["show-ref", "--verify", "--quiet", &ref_name])
    }

    pub(crate) fn branch_create(&self, branch: &str) -> Result<()> {
        self.run(&["branch", branch])?;
        Ok(())
    }

    /// Force-delete a local branch. dflow confirms with the user first, so
    /// unmerged work is not a reason to refuse.
    pub(crate) fn branch_delete(&self, branch: &str) -> Result<()> {
        self.run(&["branch", "-D", branch])?;
        Ok(())
    }

    pub(crate) fn checkout_branch(&self, branch: &str, create: bool) -> Result<()> {
        let mut args = self.quiet_args(&["checkout"]);
        if create {
            args.push("-b");
        }
        args.push(branch);
        self.run(&args)?;
        Ok(())
    }

    pub(crate) fn local_branches(&self) -> Result<Vec<String>> {
        let output = self.run(&["for-each-ref", "--format=%(refname:short)", "refs/heads/"])?;
        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

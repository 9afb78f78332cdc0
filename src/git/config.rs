use super::GitCommand;
use crate::error::{DflowError, Result};

impl GitCommand {
    /// Get a git config value (local config layered over global).
    pub(crate) fn config_value(&self, key: &str) -> Result<Option<String>> {
        let args = ["config", "--get", key];
        let output = self.output(&args)?;

        if output.status.success() {
            let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
            return Ok(Some(value));
        }
        // Exit code 1 means the key was not found, which is not an error
        if output.status.code() == Some(1) {
            return Ok(None);
        }
        Err(DflowError::process(&args, &output.stderr))
    }

    /// Set a value in the repository-local config.
    pub(crate) fn config_write(&self, key: &str, value: &str) -> Result<()> {
        self.run(&["config", "--local", key, value])?;
        Ok(())
    }

    pub(crate) fn config_entries(&self, prefix: &str) -> Result<Vec<(String, String)>> {
        let pattern = format!("^{}", prefix.replace('.', "\\."));
        let args = ["config", "--get-regexp", pattern.as_str()];
        let output = self.output(&args)?;

        if output.status.code() == Some(1) {
            return Ok(Vec::new());
        }
        if !output.status.success() {
            return Err(DflowError::process(&args, &output.stderr));
        }

        Ok(parse_config_entries(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse `git config --get-regexp` output: one `key value` pair per line,
/// where the value may contain spaces or be absent.
fn parse_config_entries(stdout: &str) -> Vec<(String, String)> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once(' ') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (line.to_string(), String::new()),
        })
        .collect()
}

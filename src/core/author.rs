//! Core logic for `dflow config`: author metadata in git config.

use crate::error::{DflowError, Result};
use crate::git::GitGateway;
use crate::prompt::{required_input, Prompter};
use crate::settings::keys;

/// Changelog author stored under `dflow.author` / `dflow.email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,
}

/// Save the author, prompting for whichever value was not given.
pub fn set_author(
    name: Option<String>,
    email: Option<String>,
    git: &dyn GitGateway,
    prompter: &mut dyn Prompter,
) -> Result<Author> {
    let name = match name.filter(|name| !name.trim().is_empty()) {
        Some(name) => name.trim().to_string(),
        None => prompter.input("Author name", None, &required_input)?,
    };
    let email = match email.filter(|email| !email.trim().is_empty()) {
        Some(email) => email.trim().to_string(),
        None => prompter.input("Author email", None, &required_input)?,
    };

    git.config_set(keys::AUTHOR, &name)?;
    git.config_set(keys::EMAIL, &email)?;
    Ok(Author { name, email })
}

/// Read the author; both values must be set.
pub fn get_author(git: &dyn GitGateway) -> Result<Author> {
    let name = git
        .config_get(keys::AUTHOR)?
        .ok_or(DflowError::AuthorNotSet { key: keys::AUTHOR })?;
    let email = git
        .config_get(keys::EMAIL)?
        .ok_or(DflowError::AuthorNotSet { key: keys::EMAIL })?;
    Ok(Author { name, email })
}

/// Every `dflow.*` entry in git config.
pub fn list(git: &dyn GitGateway) -> Result<Vec<(String, String)>> {
    git.config_list(keys::PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{GitCall, RecordingGit};
    use crate::prompt::{Answer, ScriptedPrompter};

    #[test]
    fn test_set_author_from_arguments() {
        let git = RecordingGit::new();
        let mut prompter = ScriptedPrompter::default();
        let author = set_author(
            Some("Jane Doe".into()),
            Some("jane@example.com".into()),
            &git,
            &mut prompter,
        )
        .unwrap();

        assert_eq!(author.name, "Jane Doe");
        assert!(prompter.asked().is_empty());
        assert_eq!(
            git.calls(),
            vec![
                GitCall::ConfigSet("dflow.author".into(), "Jane Doe".into()),
                GitCall::ConfigSet("dflow.email".into(), "jane@example.com".into()),
            ]
        );
    }

    #[test]
    fn test_set_author_prompts_for_missing_values() {
        let git = RecordingGit::new();
        let mut prompter = ScriptedPrompter::new([Answer::Text("jane@example.com".into())]);
        set_author(Some("Jane".into()), None, &git, &mut prompter).unwrap();
        assert_eq!(prompter.asked(), ["Author email"]);
        assert_eq!(
            git.config_value("dflow.email").as_deref(),
            Some("jane@example.com")
        );
    }

    #[test]
    fn test_set_author_blank_prompt_writes_nothing() {
        let git = RecordingGit::new();
        let mut prompter = ScriptedPrompter::new([Answer::Text("  ".into())]);
        assert!(set_author(None, Some("a@b.c".into()), &git, &mut prompter).is_err());
        assert!(git.calls().is_empty());
    }

    #[test]
    fn test_get_author() {
        let git = RecordingGit::new()
            .with_config("dflow.author", "Jane")
            .with_config("dflow.email", "jane@example.com");
        assert_eq!(
            get_author(&git).unwrap(),
            Author {
                name: "Jane".into(),
                email: "jane@example.com".into(),
            }
        );
    }

    #[test]
    fn test_get_author_requires_both_values() {
        let git = RecordingGit::new().with_config("dflow.author", "Jane");
        let err = get_author(&git).unwrap_err();
        assert!(matches!(err, DflowError::AuthorNotSet { key: "dflow.email" }));
        assert!(err.to_string().contains("dflow config set-author"));
    }

    #[test]
    fn test_list_only_dflow_keys() {
        let git = RecordingGit::new()
            .with_config("dflow.author", "Jane")
            .with_config("dflow.remote", "upstream")
            .with_config("user.name", "Someone else");
        let entries = list(&git).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|(key, _)| key.starts_with("dflow.")));
    }
}

//! `dflow config`: project-local metadata kept in git config.
//!
//! - `set-author [name] [--email]` - save the changelog author
//! - `get-author` - show the saved author
//! - `list` - show every `dflow.*` entry

use super::Repo;
use crate::core::author::{self, Author};
use crate::output::Output;
use crate::prompt::TerminalPrompter;
use anyhow::Result;
use clap::Subcommand;

#[derive(clap::Args)]
#[command(arg_required_else_help = true)]
#[command(long_about = r#"
Manage project-local configuration used by dflow commands, such as the
author name and email used in changelog footers. Requires an initialized
project (run `dflow init` first).

These settings are stored in the repository's .git/config and are specific
to each project.
"#)]
pub struct Args {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Set project-local author name and email
    SetAuthor {
        #[arg(help = "Author name (prompted when omitted)")]
        name: Option<String>,

        #[arg(long, help = "Author email (prompted when omitted)")]
        email: Option<String>,
    },

    /// Show project-local author name and email
    GetAuthor,

    /// List all dflow configuration values for this project
    List,
}

pub fn run(args: Args, quiet: bool, output: &mut dyn Output) -> Result<()> {
    let repo = Repo::open(quiet)?;
    repo.store.ensure_initialized()?;

    match args.command {
        ConfigCommand::SetAuthor { name, email } => {
            let mut prompter = TerminalPrompter::new();
            author::set_author(name, email, &repo.git, &mut prompter)?;
            output.success("Author and email saved to project-local git config");
        }
        ConfigCommand::GetAuthor => render_author(&author::get_author(&repo.git)?, output),
        ConfigCommand::List => render_entries(&author::list(&repo.git)?, output),
    }
    Ok(())
}

fn render_author(author: &Author, output: &mut dyn Output) {
    output.raw(&format!("Author: {}\n", author.name));
    output.raw(&format!("Email: {}\n", author.email));
}

fn render_entries(entries: &[(String, String)], output: &mut dyn Output) {
    if entries.is_empty() {
        output.warning("No dflow configuration found in this project.");
        return;
    }
    for (key, value) in entries {
        output.raw(&format!("{key} {value}\n"));
    }
}

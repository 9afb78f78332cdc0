//! The `dflow` command tree.
//!
//! Each submodule owns its clap `Args` and a `run` function that wires the
//! real git, terminal prompts and CLI output into a [`crate::core`] workflow
//! and renders the result.

pub mod completion;
pub mod config;
pub mod delete;
pub mod init;
pub mod start;

use crate::config::ConfigStore;
use crate::git::GitCommand;
use crate::logging::init_logging;
use crate::output::{CliOutput, Output, OutputConfig};
use crate::settings::DflowSettings;
use crate::styles::{self, def};
use crate::{check_dependencies, is_git_repository, StartupInfo};
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

fn long_about() -> String {
    [
        "Manage feature, release, hotfix and bugfix branches with a shared",
        "configuration stored in .dflow.yaml at the repository root.",
        "",
        "Commands:",
        &def("init", "Create .dflow.yaml and the base branches"),
        &def("start", "Create a working branch from its base branch"),
        &def("delete", "Delete a working branch locally and on the remote"),
        &def("config", "Manage project-local author metadata"),
        "",
        "Set DFLOW_CWD to run against a repository other than the current directory.",
    ]
    .join("\n")
}

#[derive(Parser)]
#[command(name = "dflow")]
#[command(version = crate::VERSION)]
#[command(about = "Git branching flow manager")]
#[command(long_about = long_about())]
pub struct Cli {
    #[arg(short, long, global = true, help = "Operate quietly; suppress progress reporting")]
    pub quiet: bool,

    #[arg(short, long, global = true, help = "Be verbose; show detailed progress")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize the dflow branching configuration
    Init(init::Args),

    /// Create and switch to a new feature, release, hotfix or bugfix branch
    Start(start::Args),

    /// Delete a branch locally and on the remote
    Delete(delete::Args),

    /// Manage dflow configuration for this project
    Config(config::Args),

    /// Generate or install shell completion scripts
    Completion(completion::Args),
}

impl Command {
    /// Commands that show the startup banner.
    fn shows_banner(&self) -> bool {
        matches!(self, Self::Init(_) | Self::Start(_) | Self::Delete(_))
    }
}

/// A repository dflow operates on: its config store and a git runner bound
/// to the same directory.
pub(crate) struct Repo {
    pub store: ConfigStore,
    pub git: GitCommand,
}

impl Repo {
    /// Locate the repository (honouring `DFLOW_CWD`) and load git settings.
    pub fn open(quiet: bool) -> Result<Self> {
        check_dependencies()?;
        let store = ConfigStore::discover()?;
        if !is_git_repository(Some(store.dir()))? {
            anyhow::bail!("{} is not a Git repository", store.dir().display());
        }

        let git = GitCommand::new(quiet).in_dir(store.dir());
        let settings = DflowSettings::load(&git)?;
        crate::log_debug!("using remote '{}'", settings.remote);
        Ok(Self {
            store,
            git: git.with_remote(settings.remote),
        })
    }
}

/// Run a parsed command line.
pub fn run(cli: Cli, startup: StartupInfo) -> Result<()> {
    init_logging(cli.quiet, cli.verbose);
    let mut output = CliOutput::new(OutputConfig::new(cli.quiet, cli.verbose));

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if command.shows_banner() && !output.is_quiet() {
        print_banner(&startup, &mut output);
    }

    match command {
        Command::Init(args) => init::run(args, cli.quiet, &mut output),
        Command::Start(args) => start::run(args, cli.quiet, &mut output),
        Command::Delete(args) => delete::run(args, cli.quiet, &mut output),
        Command::Config(args) => config::run(args, cli.quiet, &mut output),
        Command::Completion(args) => completion::run(args, &mut output),
    }
}

fn print_banner(startup: &StartupInfo, output: &mut dyn Output) {
    let banner = startup.banner();
    if styles::colors_enabled() {
        output.raw(&styles::cyan(&banner));
    } else {
        output.raw(&banner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::TestOutput;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_start_collects_name_words() {
        let cli = Cli::try_parse_from(["dflow", "start", "feat", "login", "form", "--no-push"])
            .unwrap();
        let Some(Command::Start(args)) = cli.command else {
            panic!("expected start");
        };
        assert_eq!(args.kind, "feat");
        assert_eq!(args.name, vec!["login", "form"]);
        assert!(args.no_push && !args.push);
    }

    #[test]
    fn test_push_flags_conflict() {
        assert!(Cli::try_parse_from(["dflow", "start", "feat", "x", "--push", "--no-push"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["dflow", "delete", "feature/x", "-y", "-q"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Some(Command::Delete(_))));
    }

    #[test]
    fn test_banner_only_for_branch_commands() {
        let cli = Cli::try_parse_from(["dflow", "config", "list"]).unwrap();
        assert!(!cli.command.unwrap().shows_banner());
        let cli = Cli::try_parse_from(["dflow", "init"]).unwrap();
        assert!(cli.command.unwrap().shows_banner());
    }

    #[test]
    fn test_print_banner_writes_raw() {
        let mut output = TestOutput::new();
        print_banner(&StartupInfo::new("9.9.9"), &mut output);
        assert!(output
            .entries()
            .iter()
            .any(|entry| matches!(entry, crate::output::OutputEntry::Raw(text) if text.contains("dflow 9.9.9"))));
    }
}

use super::Repo;
use crate::core::start::{self, PushPolicy, StartParams, StartResult};
use crate::core::OutputSink;
use crate::output::Output;
use crate::prompt::TerminalPrompter;
use crate::styles::{bold, def};
use anyhow::{Context, Result};

fn start_long_about() -> String {
    [
        "Start a new branch following the dflow branching model.",
        "",
        "Types:",
        &def("feat", "feature/ branch from flow.feature_base (alias: feature)"),
        &def("release", "release/ branch from flow.release_base"),
        &def("hotfix", "hotfix/ branch from flow.hotfix_base (aliases: hot, fix)"),
        &def("bugfix", "bugfix/ branch from flow.bugfix_base (alias: bug)"),
        "",
        "The base branch is checked out and pulled before the new branch is created.",
        "Words in NAME are joined with hyphens.",
        "",
        "Examples:",
        &format!("  {}", bold("dflow start feat login form")),
        &format!("  {}", bold("dflow start release v1.0.0 --push")),
    ]
    .join("\n")
}

#[derive(clap::Args)]
#[command(long_about = start_long_about())]
pub struct Args {
    #[arg(value_name = "TYPE", help = "Branch type (feat, release, hotfix, bugfix)")]
    pub kind: String,

    #[arg(required = true, value_name = "NAME", help = "Short branch name")]
    pub name: Vec<String>,

    #[arg(long, conflicts_with = "no_push", help = "Publish the branch without asking")]
    pub push: bool,

    #[arg(long, help = "Do not publish the branch")]
    pub no_push: bool,
}

pub fn run(args: Args, quiet: bool, output: &mut dyn Output) -> Result<()> {
    let repo = Repo::open(quiet)?;
    let config = repo.store.load()?;

    let params = StartParams {
        kind: args.kind,
        name: args.name.join(" "),
        push: PushPolicy::from_flags(args.push, args.no_push),
    };

    let mut prompter = TerminalPrompter::new();
    let result = {
        let mut sink = OutputSink(&mut *output);
        start::execute(&params, &config, &repo.git, &mut prompter, &mut sink)
            .with_context(|| format!("Could not start {} branch", params.kind))?
    };

    render_start_result(&result, repo.git.remote(), output);
    Ok(())
}

fn render_start_result(result: &StartResult, remote: &str, output: &mut dyn Output) {
    output.success(&format!(
        "Created and switched to branch '{}' from '{}'",
        result.branch, result.base
    ));
    if result.pushed {
        output.success(&format!("Branch '{}' pushed to {remote}", result.branch));
    }
    if let Some(target) = &result.merge_target {
        output.detail(
            "Merges into",
            &format!("{} ({} merge)", target.branch, target.mode),
        );
    }
}

use super::Repo;
use crate::config::CONFIG_FILE_NAME;
use crate::core::init::{self, InitOutcome, InitParams, InitResult};
use crate::core::OutputSink;
use crate::output::Output;
use crate::prompt::TerminalPrompter;
use crate::styles::def;
use anyhow::Result;

fn init_long_about() -> String {
    [
        "Initialize the dflow branching configuration and generate .dflow.yaml.",
        "",
        "The wizard asks for the main, develop and UAT branch names, the default",
        "merge mode and any branches that use the other mode. It writes these",
        "prefixes and flow rules:",
        "",
        &def("feature/", "start from UAT, merge to develop"),
        &def("release/", "start from UAT"),
        &def("hotfix/", "start from main"),
        &def("bugfix/", "start from develop"),
        "",
        "The base branches are created locally when missing and can be pushed",
        "to the remote. Run this once per repository.",
    ]
    .join("\n")
}

#[derive(clap::Args)]
#[command(long_about = init_long_about())]
pub struct Args {
    #[arg(short, long, help = "Overwrite an existing .dflow.yaml without asking")]
    pub force: bool,
}

pub fn run(args: Args, quiet: bool, output: &mut dyn Output) -> Result<()> {
    let repo = Repo::open(quiet)?;

    output.info("dflow supports two merge modes:");
    output.list_item("manual: open pull requests and merge on your hosting platform");
    output.list_item("auto: dflow merges branches directly with git");

    let params = InitParams { force: args.force };
    let mut prompter = TerminalPrompter::new();
    let outcome = {
        let mut sink = OutputSink(&mut *output);
        init::execute(&params, &repo.store, &repo.git, &mut prompter, &mut sink)?
    };

    match outcome {
        InitOutcome::Initialized(result) => render_init_result(&result, repo.git.remote(), output),
        InitOutcome::Kept => output.info(&format!("Kept the existing {CONFIG_FILE_NAME}")),
    }
    Ok(())
}

fn render_init_result(result: &InitResult, remote: &str, output: &mut dyn Output) {
    output.success(&format!("Created {}", result.path.display()));

    let workflow = &result.config.workflow;
    output.info("Merge behavior summary:");
    output.detail("Default mode", workflow.default_merge_mode.as_str());
    if workflow.branch_rules.is_empty() {
        output.info("No branch exceptions defined.");
    } else {
        let exceptions: Vec<&str> = workflow.branch_rules.keys().map(String::as_str).collect();
        output.detail(
            &format!("Exceptions ({})", workflow.default_merge_mode.inverse()),
            &exceptions.join(", "),
        );
    }

    for branch in &result.created {
        output.list_item(&format!("created branch '{branch}'"));
    }
    if !result.pushed.is_empty() {
        output.success(&format!(
            "Pushed {} to {remote}",
            result.pushed.join(", ")
        ));
    }

    output.result("dflow is ready! Use `dflow start` to begin a new branch.");
}

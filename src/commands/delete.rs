use super::Repo;
use crate::core::delete::{self, DeleteOutcome, DeleteParams};
use crate::core::OutputSink;
use crate::error::DflowError;
use crate::output::Output;
use crate::prompt::TerminalPrompter;
use anyhow::Result;

#[derive(clap::Args)]
#[command(long_about = r#"
Deletes a branch locally and on the remote. The remote branch is only
deleted when the remote actually has it; a branch that exists only on the
remote is still deleted there.

The configured main, develop and uat branches are never deleted. Without a
branch argument, pick one of the local branches interactively.
"#)]
pub struct Args {
    #[arg(help = "Branch to delete")]
    pub branch: Option<String>,

    #[arg(short, long, help = "Do not ask for confirmation")]
    pub yes: bool,
}

pub fn run(args: Args, quiet: bool, output: &mut dyn Output) -> Result<()> {
    let repo = Repo::open(quiet)?;
    // Without a configuration nothing is protected, but deleting still works.
    let config = match repo.store.load() {
        Ok(config) => Some(config),
        Err(DflowError::NotInitialized { .. }) => None,
        Err(e) => return Err(e.into()),
    };

    let params = DeleteParams {
        branch: args.branch,
        assume_yes: args.yes,
    };
    let mut prompter = TerminalPrompter::new();
    let outcome = {
        let mut sink = OutputSink(&mut *output);
        delete::execute(
            &params,
            config.as_ref(),
            &repo.git,
            &mut prompter,
            &mut sink,
        )?
    };

    render_delete_outcome(&outcome, output);
    Ok(())
}

fn render_delete_outcome(outcome: &DeleteOutcome, output: &mut dyn Output) {
    match outcome {
        DeleteOutcome::Deleted(result) => output.success(&format!(
            "Deleted '{}' ({})",
            result.branch,
            result.deleted_parts()
        )),
        DeleteOutcome::Aborted(branch) => {
            output.info(&format!("Kept '{branch}'; operation aborted by user."))
        }
        DeleteOutcome::NothingToDelete => output.info("No branches to delete."),
    }
}

//! Shell completion scripts for `dflow`.
//!
//! Prints the script for a shell to stdout, or installs it into the shell's
//! standard user completion directory with `--install`.

use super::Cli;
use crate::output::Output;
use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::{self, Write};
use std::path::PathBuf;

const BIN_NAME: &str = "dflow";

#[derive(clap::Args)]
#[command(long_about = r#"
Generates a completion script for bash, zsh, fish, elvish or powershell and
prints it to stdout. When the shell is omitted it is detected from $SHELL.

With --install the script is written to the standard per-user location for
bash, zsh or fish instead.
"#)]
pub struct Args {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Option<Shell>,

    #[arg(short, long, help = "Install completions to the standard shell location")]
    pub install: bool,
}

pub fn run(args: Args, output: &mut dyn Output) -> Result<()> {
    let shell = match args.shell {
        Some(shell) => shell,
        None => Shell::from_env()
            .context("Could not detect the shell from $SHELL; pass it explicitly")?,
    };

    if args.install {
        return install_completions(shell, output);
    }

    let mut stdout = io::stdout().lock();
    write_completions(shell, &mut stdout);
    stdout.flush()?;
    Ok(())
}

/// Write the completion script for `shell` into `writer`.
pub fn write_completions(shell: Shell, writer: &mut dyn Write) {
    generate(shell, &mut Cli::command(), BIN_NAME, writer);
}

fn install_completions(shell: Shell, output: &mut dyn Output) -> Result<()> {
    let install_dir = completion_dir(shell)?;
    std::fs::create_dir_all(&install_dir).with_context(|| {
        format!(
            "Failed to create completion directory: {}",
            install_dir.display()
        )
    })?;

    let file_path = install_dir.join(completion_filename(shell));
    let file = std::fs::File::create(&file_path)
        .with_context(|| format!("Failed to create completion file: {}", file_path.display()))?;
    let mut writer = io::BufWriter::new(file);
    write_completions(shell, &mut writer);
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", file_path.display()))?;

    output.success(&format!("Completions installed to {}", file_path.display()));
    for line in post_install_message(shell) {
        output.info(line);
    }
    Ok(())
}

/// Standard per-user completion directory for a shell.
fn completion_dir(shell: Shell) -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;

    let dir = match shell {
        Shell::Bash => {
            let xdg_data = std::env::var("XDG_DATA_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| home.join(".local/share"));
            xdg_data.join("bash-completion/completions")
        }
        Shell::Zsh => home.join(".zfunc"),
        Shell::Fish => {
            let xdg_config = std::env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| home.join(".config"));
            xdg_config.join("fish/completions")
        }
        _ => anyhow::bail!("--install is not supported for {shell}; redirect the script instead"),
    };

    Ok(dir)
}

fn completion_filename(shell: Shell) -> String {
    match shell {
        Shell::Bash => BIN_NAME.to_string(),
        Shell::Zsh => format!("_{BIN_NAME}"),
        Shell::Fish => format!("{BIN_NAME}.fish"),
        _ => format!("{BIN_NAME}.{shell}"),
    }
}

fn post_install_message(shell: Shell) -> &'static [&'static str] {
    match shell {
        Shell::Bash => &[
            "Make sure bash-completion is installed and loaded from your ~/.bashrc.",
        ],
        Shell::Zsh => &[
            "Add this to your ~/.zshrc, then restart your shell:",
            "  fpath=(~/.zfunc $fpath)",
            "  autoload -Uz compinit && compinit",
        ],
        Shell::Fish => &["Completions are loaded automatically by fish."],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_filenames() {
        assert_eq!(completion_filename(Shell::Bash), "dflow");
        assert_eq!(completion_filename(Shell::Zsh), "_dflow");
        assert_eq!(completion_filename(Shell::Fish), "dflow.fish");
    }

    #[test]
    fn test_generated_script_mentions_subcommands() {
        let mut buffer = Vec::new();
        write_completions(Shell::Bash, &mut buffer);
        let script = String::from_utf8(buffer).unwrap();
        assert!(script.contains("dflow"));
        assert!(script.contains("start"));
        assert!(script.contains("set-author"));
    }

    #[test]
    fn test_install_unsupported_shell() {
        assert!(completion_dir(Shell::PowerShell).is_err());
    }
}

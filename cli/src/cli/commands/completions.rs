//! Shell completion generation.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::args::{Cli, ShellType};
use crate::error::Result;

/// Handles the `tecli completions` command.
pub fn handle_completions(shell: ShellType) -> Result<()> {
    write_completions(shell, &mut io::stdout());
    Ok(())
}

fn write_completions(shell: ShellType, out: &mut impl Write) {
    let shell = match shell {
        ShellType::Bash => Shell::Bash,
        ShellType::Zsh => Shell::Zsh,
        ShellType::Fish => Shell::Fish,
    };

    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "tecli", out);
}

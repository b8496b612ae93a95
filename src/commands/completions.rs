//! Shell completion output.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use vignette::cli::Cli;

/// Print completions for `shell` to stdout.
pub fn handle(shell: Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut io::stdout());
}

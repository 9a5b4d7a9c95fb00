//! `hearth completions` — shell completion scripts.

use clap::Args;
use clap_complete::{Shell, generate};
use std::io;

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: &CompletionsArgs, command: &mut clap::Command) -> anyhow::Result<()> {
    generate(args.shell, command, "hearth", &mut io::stdout());
    Ok(())
}

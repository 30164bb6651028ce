//! Storybook CLI: the `storybook` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    support::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Csf {
            manifest,
            story,
            compact,
        } => commands::csf::run(manifest, story, compact),

        Commands::Check { manifest, json } => commands::check::run(manifest, json),
    }
}

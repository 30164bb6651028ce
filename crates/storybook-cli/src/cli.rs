use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "storybook",
    about = "Storybook: validate story manifests and emit Component Story Format parameters",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Emit CSF parameters for the stories in a manifest
    Csf {
        /// Path to the story manifest (TOML)
        manifest: String,

        /// Emit only the story with this id
        #[arg(long)]
        story: Option<String>,

        /// Output compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Validate every story in a manifest
    Check {
        /// Path to the story manifest (TOML)
        manifest: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

//! matter CLI - Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "matter")]
#[command(version)]
#[command(about = "Edit document front matter without losing comments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the header style and decoded header values as JSON
    Show {
        /// Document to read
        input: PathBuf,
    },

    /// Set or remove header keys, keeping everything else as written
    Patch {
        /// Document to patch
        input: PathBuf,

        /// JSON object of updates, `null` removes a key (use '-' for stdin)
        #[arg(long, value_name = "FILE")]
        patch: Option<String>,

        /// Header value (KEY:VALUE), VALUE is read as YAML
        #[arg(short = 'M', long)]
        metadata: Vec<String>,

        /// Header key to remove
        #[arg(long, value_name = "KEY")]
        unset: Vec<String>,

        /// Spaces used to indent new nested values
        #[arg(long, default_value_t = 2)]
        indent: usize,

        /// Write the result back to INPUT instead of stdout
        #[arg(long)]
        in_place: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging (stdout carries command output)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "matter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { input } => commands::show::execute(&input),
        Commands::Patch {
            input,
            patch,
            metadata,
            unset,
            indent,
            in_place,
        } => commands::patch::execute(commands::patch::PatchArgs {
            input,
            patch,
            metadata,
            unset,
            indent,
            in_place,
        }),
    }
}

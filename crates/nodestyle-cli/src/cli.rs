//! CLI argument definitions for nodestyle.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "nodestyle",
    version,
    about = "List the stylesheets contributed by a project's dependencies",
    long_about = "nodestyle reads package.json, looks up the `style` entry of every declared \
                  dependency under node_modules, and prints the resulting stylesheet paths \
                  in a stable order."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved stylesheet paths
    Resolve {
        #[command(flatten)]
        config: ConfigArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Lines)]
        format: OutputFormat,
    },

    /// Print the effective configuration as TOML
    Config {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

/// Configuration sources shared by every command.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Configuration file (defaults to ./nodestyle.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the root package.json
    #[arg(long)]
    pub manifest: Option<String>,

    /// Directory holding the installed dependencies
    #[arg(long)]
    pub modules_dir: Option<String>,

    /// Leave a dependency out (repeatable)
    #[arg(long, value_name = "NAME")]
    pub skip: Vec<String>,

    /// Replace a dependency's stylesheet; a comma-separated list gives several
    #[arg(long = "override", value_name = "NAME=PATH[,PATH...]")]
    pub overrides: Vec<String>,

    /// Give a dependency an explicit position (repeatable)
    #[arg(long, value_name = "NAME=N")]
    pub order: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One path per line
    Lines,
    /// A JSON array of paths
    Json,
    /// A JSON array of per-dependency entries
    Entries,
}

pub fn parse() -> Cli {
    Cli::parse()
}

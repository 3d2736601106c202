//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Flatten repos and generate symbol trees for LLM contexts
#[derive(Parser, Debug)]
#[command(name = "treeline")]
#[command(about = "Flatten repos and generate symbol trees for LLM contexts")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Flatten repository files into a single document
    Flatten {
        /// Path to the repository
        repo_path: PathBuf,

        /// Output file name
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Additional directories to exclude (can be repeated)
        #[arg(long = "exclude-dir", value_name = "DIR")]
        exclude_dirs: Vec<String>,

        /// Additional file extensions to exclude (can be repeated)
        #[arg(long = "exclude-ext", value_name = "EXT")]
        exclude_exts: Vec<String>,

        /// Respect the repository's .gitignore
        #[arg(long)]
        use_gitignore: bool,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate a Python symbol tree for a repository
    Tree {
        /// Path to the repository
        repo_path: PathBuf,

        /// Output file name
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Annotate entries with first-line docstrings
        #[arg(long)]
        docs: bool,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show version information
    Version,
}

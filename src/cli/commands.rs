//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - run: execute one development cycle for an instruction
//! - diff: print the current three-tier diff snapshot

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tandem - programmer/reviewer development-cycle automation
#[derive(Parser, Debug)]
#[command(name = "tandem")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one development cycle for a free-text instruction
    Run {
        /// Instruction describing the desired change
        instruction: String,

        /// Maximum programmer/reviewer rounds
        #[arg(short = 'i', long)]
        max_iterations: Option<usize>,

        /// Working branch name (derived from the instruction if omitted)
        #[arg(short, long)]
        branch: Option<String>,

        /// Base branch pull requests merge into
        #[arg(long)]
        base: Option<String>,

        /// GitHub repository in owner/name form
        #[arg(short, long)]
        repo: Option<String>,

        /// Restrict diffs and publication to this subtree
        #[arg(long)]
        scope: Option<String>,
    },

    /// Print the current diff snapshot (working tree, staged, or untracked)
    Diff {
        /// Restrict the diff to this path
        #[arg(long)]
        scope: Option<String>,
    },
}

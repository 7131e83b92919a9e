use clap::{Parser, Subcommand};
use crumbs::validation::clap_id_validator;

pub const ABOUT: &str = "crumbs - Tiny, git-friendly memory CLI for coding agents";

#[derive(Parser)]
#[command(name = "cr")]
#[command(about = ABOUT, long_about = None)]
#[command(version)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a WHAT: constraints/facts/gotchas (short, atomic)
    What {
        /// Memory text (max 100 chars by default). Read from stdin if omitted.
        text: Option<String>,
    },

    /// Record a WHY: rationale/intent (short, atomic)
    Why {
        /// Memory text (max 100 chars by default). Read from stdin if omitted.
        text: Option<String>,
    },

    /// List the last N memories, oldest first (default: 20)
    Ls {
        /// Number of memories to show
        n: Option<usize>,
    },

    /// Show a memory by id or unique prefix (e.g. cr-k3x9 or k3x9)
    Show {
        #[arg(value_parser = clap_id_validator)]
        id: String,
    },

    /// Find memories by case-insensitive substring
    Find {
        query: String,

        /// Max results (default: 20)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Mark or open the handoff checkpoint (default: open)
    Handoff {
        #[command(subcommand)]
        command: Option<HandoffCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type: bash, zsh, fish
        shell: String,
    },
}

#[derive(Subcommand)]
pub enum HandoffCommands {
    /// Move the checkpoint so the last N memories come after it
    Mark {
        /// Memories to leave after the checkpoint (default: 10)
        #[arg(long)]
        window: Option<usize>,
    },

    /// Print the memories after the checkpoint, newest first
    Open {
        /// Max memories to show (default: all)
        #[arg(long)]
        limit: Option<usize>,
    },
}

use anyhow::Result;
use clap::CommandFactory;
use crumbs::commands::{handoff, memory, onboarding};
use crumbs::completions::{generate_completions, Shell};
use crumbs::models::EntryKind;
use std::str::FromStr;

use super::types::{Cli, Commands, HandoffCommands};

pub fn dispatch(command: Option<Commands>) -> Result<()> {
    let Some(command) = command else {
        return onboarding::execute();
    };

    match command {
        Commands::What { text } => memory::record(EntryKind::What, text),
        Commands::Why { text } => memory::record(EntryKind::Why, text),
        Commands::Ls { n } => memory::list(n),
        Commands::Show { id } => memory::show(id),
        Commands::Find { query, limit } => memory::find(query, limit),
        Commands::Handoff { command } => match command {
            Some(HandoffCommands::Mark { window }) => handoff::mark(window),
            Some(HandoffCommands::Open { limit }) => handoff::open(limit),
            None => handoff::open(None),
        },
        Commands::Completions { shell } => {
            let shell = Shell::from_str(&shell)?;
            let mut cmd = Cli::command();
            generate_completions(&mut cmd, shell);
            Ok(())
        }
    }
}

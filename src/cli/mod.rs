mod dispatch;
mod types;

use clap::error::ErrorKind;
use clap::{Command, CommandFactory, FromArgMatches};
use crumbs::commands::onboarding;

pub use dispatch::dispatch;
pub use types::{Cli, ABOUT};

/// Parse the command line. `--help` also prints the onboarding block.
pub fn parse() -> Cli {
    let matches = match Cli::command().try_get_matches() {
        Ok(matches) => matches,
        // Store discovery only runs when help is actually shown
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            with_onboarding(Cli::command(), &onboarding::help_text()).get_matches()
        }
        Err(e) => e.exit(),
    };
    Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn with_onboarding(cmd: Command, block: &str) -> Command {
    cmd.long_about(format!("{ABOUT}\n\n{block}"))
}

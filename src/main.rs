mod cli;

use crumbs::commands::common::exit_code;
use std::io::IsTerminal;

use cli::dispatch;

fn main() {
    let cli = cli::parse();
    crumbs::logging::init(cli.verbose);

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    if let Err(e) = dispatch(cli.command) {
        eprintln!("error: {e:#}");
        std::process::exit(exit_code(&e));
    }
}

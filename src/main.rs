use anyhow::Result;

use norcal_smash_ranking::cli::Command;
use norcal_smash_ranking::{handle_direct, handle_discover, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Discover {
            start_date,
            end_date,
            coords,
            min_entrants,
            out,
        } => handle_discover(
            start_date.as_deref(),
            end_date.as_deref(),
            coords,
            *min_entrants,
            out,
        ),
        Command::Direct {
            url,
            tournament_slug,
            event_slug,
            out,
        } => handle_direct(
            url.as_deref(),
            tournament_slug.as_deref(),
            event_slug.as_deref(),
            out,
        ),
    }
}

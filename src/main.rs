use anyhow::Result;

use league_ranking::cli::Command;
use league_ranking::{handle_leaderboard, handle_scores, handle_seasons, interpret};

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
        Command::Leaderboard {
            dataset,
            season,
            country,
        } => handle_leaderboard(dataset, season.as_deref(), country.as_deref()),
        Command::Scores {
            dataset,
            player,
            season,
        } => handle_scores(dataset, *player, season.as_deref()),
        Command::Seasons => handle_seasons(),
    }
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "league ranking engine")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Print the leaderboard of a season
    Leaderboard {
        /// Path to the JSON dataset
        dataset: PathBuf,
        /// Season slug (defaults to the current season)
        #[arg(short, long)]
        season: Option<String>,
        /// Country code, for seasons with per-country qualification
        #[arg(short, long)]
        country: Option<String>,
    },
    /// Print the per-event score breakdown of one player
    Scores {
        /// Path to the JSON dataset
        dataset: PathBuf,
        /// Player id
        player: i64,
        /// Season slug (defaults to the current season)
        #[arg(short, long)]
        season: Option<String>,
    },
    /// List the known seasons
    Seasons,
}

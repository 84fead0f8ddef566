pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod score;
pub mod season;
pub mod services;

#[cfg(test)]
pub mod testing;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use std::path::Path;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::domain::Dataset;
use crate::season::{default_season, Domain};
use crate::services::LeaderboardService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_leaderboard(
    dataset_path: &Path,
    season: Option<&str>,
    country: Option<&str>,
) -> Result<()> {
    let service = load_service(dataset_path)?;
    let slug = resolve_slug(season, country);
    let entries = service.leaderboard(&slug, country)?;
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

pub fn handle_scores(dataset_path: &Path, player_id: i64, season: Option<&str>) -> Result<()> {
    let service = load_service(dataset_path)?;
    let slug = resolve_slug(season, None);
    let scores = service.scores_for_player(player_id, &slug)?;
    println!("{}", serde_json::to_string_pretty(&scores)?);
    Ok(())
}

pub fn handle_seasons() -> Result<()> {
    for season in season::all_seasons().iter().filter(|s| s.visible) {
        println!(
            "{:<26} {} .. {}  ({:?})",
            season.slug, season.start_date, season.end_date, season.domain
        );
    }
    Ok(())
}

fn load_service(dataset_path: &Path) -> Result<LeaderboardService> {
    let dataset = Dataset::from_json_file(dataset_path)?;
    Ok(LeaderboardService::new(dataset, &AppConfig::new()))
}

/// A country implies the global calendar; otherwise the national one applies.
fn resolve_slug(season: Option<&str>, country: Option<&str>) -> String {
    match season {
        Some(slug) => slug.to_string(),
        None if country.is_some() => default_season(Domain::Global).slug.clone(),
        None => default_season(Domain::Swiss).slug.clone(),
    }
}

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::models::{
    Event, EventId, NationalLeaderboard, Player, PlayerId, ResultRecord, SpecialReward,
};

/// The stored data the engine computes from: players, events and their
/// results. This is the boundary to the (out of scope) persistence layer; the
/// engine only ever reads it and recomputes scores on demand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub players: Vec<Player>,
    pub events: Vec<Event>,
    pub results: Vec<ResultRecord>,
    #[serde(default)]
    pub special_rewards: Vec<SpecialReward>,
    #[serde(default)]
    pub national_leaderboards: Vec<NationalLeaderboard>,
}

impl Dataset {
    /// Load a dataset from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset file {}", path.display()))?;
        let dataset: Dataset = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse dataset file {}", path.display()))?;

        info!(
            "Loaded dataset: {} players, {} events, {} results",
            dataset.players.len(),
            dataset.events.len(),
            dataset.results.len()
        );
        Ok(dataset)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn is_hidden(&self, player_id: PlayerId) -> bool {
        self.player(player_id)
            .is_some_and(|p| p.hidden_from_leaderboard)
    }

    /// Events whose date falls in `[start, end]`, in date order. Events on the
    /// same day keep a stable order by id.
    pub fn events_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Event> {
        let mut events: Vec<&Event> = self
            .events
            .iter()
            .filter(|e| start <= e.date && e.date <= end)
            .collect();
        events.sort_by_key(|e| (e.date, e.id));
        events
    }

    pub fn results_for_event(&self, event_id: EventId) -> Vec<&ResultRecord> {
        self.results
            .iter()
            .filter(|r| r.event_id == event_id)
            .collect()
    }

    pub fn result_for(&self, event_id: EventId, player_id: PlayerId) -> Option<&ResultRecord> {
        self.results
            .iter()
            .find(|r| r.event_id == event_id && r.player_id == player_id)
    }

    pub fn national_leaderboard(
        &self,
        country: &str,
        season_slug: &str,
    ) -> Option<&NationalLeaderboard> {
        self.national_leaderboards
            .iter()
            .find(|n| n.country == country && n.season_slug == season_slug)
    }
}

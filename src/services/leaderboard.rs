use chrono::{Local, NaiveDate};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::cache::TtlCache;
use crate::config::settings::AppConfig;
use crate::domain::models::{EventId, OrganizerLeague, PlayerId, ResultRecord};
use crate::domain::Dataset;
use crate::errors::ScoringError;
use crate::score::aggregator::{build_season_view, compute_scores, EventStandings};
use crate::score::season_all::SeasonAll;
use crate::score::{
    policy_for_season, ranked_players, LeaderboardScore, QualificationType, Score, ScoringPolicy,
};
use crate::season::{all_seasons, find_season_by_slug};

/// One row of a rendered leaderboard: the computed score joined with player
/// display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_id: PlayerId,
    pub player_name: String,
    pub rank: u32,
    pub total_score: i32,
    pub byes: i32,
    pub qualification_type: QualificationType,
    pub qualification_reason: String,
}

/// Per-event score annotation for a player detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEventScore {
    pub event_id: EventId,
    pub event_name: String,
    pub date: NaiveDate,
    pub score: Score,
}

/// Serves leaderboards from the dataset, caching computed boards and
/// invalidating them synchronously when results change.
pub struct LeaderboardService {
    dataset: Dataset,
    leaderboard_cache: TtlCache<Vec<LeaderboardEntry>>,
    league_cache: TtlCache<Vec<LeaderboardEntry>>,
}

impl LeaderboardService {
    pub fn new(dataset: Dataset, config: &AppConfig) -> Self {
        Self {
            dataset,
            leaderboard_cache: TtlCache::new(Duration::from_secs(
                config.cache.leaderboard_ttl_secs,
            )),
            league_cache: TtlCache::new(Duration::from_secs(config.cache.league_ttl_secs)),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// The full leaderboard for one season, best rank first. `country` only
    /// matters for seasons with per-country qualification.
    pub fn leaderboard(
        &self,
        slug: &str,
        country: Option<&str>,
    ) -> Result<Vec<LeaderboardEntry>, ScoringError> {
        let season = find_season_by_slug(slug)?;
        let key = format!("{}:{}", season.slug, country.unwrap_or(""));

        if let Some(entries) = self.leaderboard_cache.get(&key) {
            return Ok(entries);
        }

        let scores = compute_scores(&self.dataset, season, country, Self::today())?;
        let entries = self.join_players(scores);
        self.leaderboard_cache.insert(key, entries.clone());
        Ok(entries)
    }

    /// Per-event score breakdown for one player in one season, in date order.
    pub fn scores_for_player(
        &self,
        player_id: PlayerId,
        slug: &str,
    ) -> Result<Vec<PlayerEventScore>, ScoringError> {
        let season = find_season_by_slug(slug)?;
        let policy = policy_for_season(season)?;
        let view = build_season_view(&self.dataset, season, None, Self::today());

        let mut scores = Vec::new();
        for standings in &view.events {
            for result in &standings.results {
                if result.player_id != player_id {
                    continue;
                }
                if let Some(score) =
                    policy.score_for_result(result, standings.event, &standings.ctx)
                {
                    scores.push(PlayerEventScore {
                        event_id: standings.event.id,
                        event_name: standings.event.name.clone(),
                        date: standings.event.date,
                        score,
                    });
                }
            }
        }
        Ok(scores)
    }

    /// The leaderboard of an organizer league: the organizer's matching events
    /// in the league's time frame, each result scored with the formula of the
    /// main season its event fell into. Rank only, no qualification.
    pub fn league_leaderboard(&self, league: &OrganizerLeague) -> Vec<LeaderboardEntry> {
        // Every field that changes which results are selected must be part of
        // the key, or two differently filtered leagues would share a board.
        let key = format!(
            "{}:{}:{}:{}:{}:{}:{}",
            league.organizer_id,
            league.name,
            league.start_date,
            league.end_date,
            league.format.as_deref().unwrap_or(""),
            league.max_category.display(),
            league.include_playoffs,
        );
        if let Some(entries) = self.league_cache.get(&key) {
            return entries;
        }

        let mut scores_by_player: HashMap<PlayerId, Score> = HashMap::new();
        for event in self
            .dataset
            .events_in_range(league.start_date, league.end_date)
        {
            if event.organizer_id != league.organizer_id {
                continue;
            }
            if !league.included_categories().contains(&event.category) {
                continue;
            }
            if let Some(format) = &league.format {
                if event.format.as_ref() != Some(format) {
                    continue;
                }
            }
            let standings = EventStandings::new(event, self.dataset.results_for_event(event.id));
            if standings.ctx.has_playoffs && !league.include_playoffs {
                continue;
            }
            for result in &standings.results {
                if self.dataset.is_hidden(result.player_id) {
                    continue;
                }
                if let Some(score) = SeasonAll.score_for_result(result, event, &standings.ctx) {
                    *scores_by_player.entry(result.player_id).or_default() += score;
                }
            }
        }

        let mut entries = Vec::new();
        for (i, (player_id, score)) in ranked_players(&scores_by_player).into_iter().enumerate() {
            let Some(player) = self.dataset.player(player_id) else {
                continue;
            };
            entries.push(LeaderboardEntry {
                player_id,
                player_name: player.name.clone(),
                rank: (i + 1) as u32,
                total_score: score.qps,
                byes: 0,
                qualification_type: QualificationType::None,
                qualification_reason: String::new(),
            });
        }

        self.league_cache.insert(key, entries.clone());
        entries
    }

    /// Record a new result. Every cached board whose season covers the
    /// result's event is dropped before this returns.
    pub fn add_result(&mut self, result: ResultRecord) -> Result<(), ScoringError> {
        let event = self
            .dataset
            .event(result.event_id)
            .ok_or(ScoringError::UnknownEvent(result.event_id))?;
        let (date, organizer_id) = (event.date, event.organizer_id);

        self.dataset.results.push(result);
        self.invalidate_for(date, organizer_id);
        Ok(())
    }

    /// Replace the result identified by `(event_id, player_id)`. The updated
    /// record may point to a different event; boards covering either event's
    /// date are dropped.
    pub fn update_result(
        &mut self,
        event_id: EventId,
        player_id: PlayerId,
        updated: ResultRecord,
    ) -> Result<(), ScoringError> {
        let old_event = self
            .dataset
            .event(event_id)
            .ok_or(ScoringError::UnknownEvent(event_id))?;
        let (old_date, old_organizer) = (old_event.date, old_event.organizer_id);
        let new_event = self
            .dataset
            .event(updated.event_id)
            .ok_or(ScoringError::UnknownEvent(updated.event_id))?;
        let (new_date, new_organizer) = (new_event.date, new_event.organizer_id);

        let position = self
            .dataset
            .results
            .iter()
            .position(|r| r.event_id == event_id && r.player_id == player_id)
            .ok_or(ScoringError::UnknownResult {
                event_id,
                player_id,
            })?;
        self.dataset.results[position] = updated;

        self.invalidate_for(old_date, old_organizer);
        if new_date != old_date || new_organizer != old_organizer {
            self.invalidate_for(new_date, new_organizer);
        }
        Ok(())
    }

    /// Delete the result identified by `(event_id, player_id)`.
    pub fn remove_result(
        &mut self,
        event_id: EventId,
        player_id: PlayerId,
    ) -> Result<(), ScoringError> {
        let event = self
            .dataset
            .event(event_id)
            .ok_or(ScoringError::UnknownEvent(event_id))?;
        let (date, organizer_id) = (event.date, event.organizer_id);

        let position = self
            .dataset
            .results
            .iter()
            .position(|r| r.event_id == event_id && r.player_id == player_id)
            .ok_or(ScoringError::UnknownResult {
                event_id,
                player_id,
            })?;
        self.dataset.results.remove(position);

        self.invalidate_for(date, organizer_id);
        Ok(())
    }

    /// Drop every cached board a result on `date` can influence: season
    /// boards of every season containing the date, and the organizer's
    /// league boards.
    fn invalidate_for(&self, date: NaiveDate, organizer_id: i64) {
        for season in all_seasons() {
            if season.includes_date(date) {
                let prefix = format!("{}:", season.slug);
                self.leaderboard_cache
                    .invalidate_where(|key| key.starts_with(&prefix));
            }
        }
        let league_prefix = format!("{organizer_id}:");
        self.league_cache
            .invalidate_where(|key| key.starts_with(&league_prefix));
        info!("Invalidated cached leaderboards for results dated {date}");
    }

    fn join_players(&self, scores: HashMap<PlayerId, LeaderboardScore>) -> Vec<LeaderboardEntry> {
        let mut entries = Vec::new();
        for (player_id, score) in scores {
            let Some(player) = self.dataset.player(player_id) else {
                continue;
            };
            if player.hidden_from_leaderboard {
                continue;
            }
            entries.push(LeaderboardEntry {
                player_id,
                player_name: player.name.clone(),
                rank: score.rank,
                total_score: score.total_score,
                byes: score.byes,
                qualification_type: score.qualification_type,
                qualification_reason: score.qualification_reason,
            });
        }
        entries.sort_by_key(|e| e.rank);
        entries
    }
}

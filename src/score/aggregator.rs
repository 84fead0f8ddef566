use chrono::NaiveDate;
use log::{debug, warn};
use std::collections::HashMap;

use crate::domain::models::{Event, NationalLeaderboard, PlayerId, ResultRecord, SpecialReward};
use crate::domain::Dataset;
use crate::errors::ScoringError;
use crate::score::{policy_for_season, LeaderboardScore, Score, ScoringPolicy};
use crate::season::Season;

/// Facts about an event that scoring needs but a single result does not
/// carry, derived from all results of the event.
#[derive(Debug, Clone, Copy)]
pub struct EventContext {
    /// Number of results, i.e. players who entered.
    pub event_size: usize,
    /// Whether at least one player has a playoff placement.
    pub has_playoffs: bool,
    /// Maximum number of rounds any player completed. Using the maximum
    /// tolerates players who dropped early.
    pub total_rounds: u32,
}

impl EventContext {
    pub fn from_results(results: &[&ResultRecord]) -> Self {
        Self {
            event_size: results.len(),
            has_playoffs: results.iter().any(|r| r.playoff_result.is_some()),
            total_rounds: results.iter().map(|r| r.rounds_played()).max().unwrap_or(0),
        }
    }
}

/// One event with its results in standings order (playoff finishes first,
/// then Swiss ranking).
#[derive(Debug)]
pub struct EventStandings<'a> {
    pub event: &'a Event,
    pub results: Vec<&'a ResultRecord>,
    pub ctx: EventContext,
}

impl<'a> EventStandings<'a> {
    pub fn new(event: &'a Event, mut results: Vec<&'a ResultRecord>) -> Self {
        results.sort_by_key(|r| r.standing_key());
        let ctx = EventContext::from_results(&results);
        Self {
            event,
            results,
            ctx,
        }
    }
}

/// A special reward joined with the result and event it was awarded for.
#[derive(Debug)]
pub struct RewardedResult<'a> {
    pub reward: &'a SpecialReward,
    pub result: &'a ResultRecord,
    pub event: &'a Event,
}

/// Everything a scoring formula may look at while finalizing a season: the
/// in-season events in date order, special rewards, and the current date
/// (which only influences the wording of qualification reasons).
#[derive(Debug)]
pub struct SeasonView<'a> {
    pub season: &'a Season,
    pub events: Vec<EventStandings<'a>>,
    pub rewards: Vec<RewardedResult<'a>>,
    pub national: Option<&'a NationalLeaderboard>,
    pub today: NaiveDate,
}

impl<'a> SeasonView<'a> {
    pub fn reward_byes_for(&self, player_id: PlayerId) -> i32 {
        self.rewards
            .iter()
            .filter(|r| r.reward.player_id == player_id)
            .map(|r| r.reward.byes)
            .sum()
    }

    pub fn direct_invite_rewards(&self) -> impl Iterator<Item = &RewardedResult<'a>> {
        self.rewards.iter().filter(|r| r.reward.direct_invite)
    }
}

/// Collect the in-season slice of the dataset for one season.
pub fn build_season_view<'a>(
    dataset: &'a Dataset,
    season: &'a Season,
    country: Option<&str>,
    today: NaiveDate,
) -> SeasonView<'a> {
    let events: Vec<EventStandings> = dataset
        .events_in_range(season.start_date, season.end_date)
        .into_iter()
        .map(|event| EventStandings::new(event, dataset.results_for_event(event.id)))
        .collect();

    let mut rewards = Vec::new();
    for reward in &dataset.special_rewards {
        let Some(event) = dataset.event(reward.event_id) else {
            warn!("Special reward references unknown event {}", reward.event_id);
            continue;
        };
        if !season.includes_date(event.date) {
            continue;
        }
        match dataset.result_for(reward.event_id, reward.player_id) {
            Some(result) => rewards.push(RewardedResult {
                reward,
                result,
                event,
            }),
            None => warn!(
                "Special reward for player {} has no result in event {}",
                reward.player_id, reward.event_id
            ),
        }
    }

    let national = country.and_then(|c| dataset.national_leaderboard(c, &season.slug));

    SeasonView {
        season,
        events,
        rewards,
        national,
        today,
    }
}

/// Sum per-result scores into per-player season totals. Hidden players are
/// skipped entirely; results the policy declines do not appear in the output,
/// not even as zero.
pub fn aggregate(
    dataset: &Dataset,
    view: &SeasonView,
    policy: &dyn ScoringPolicy,
) -> HashMap<PlayerId, Score> {
    let mut scores_by_player: HashMap<PlayerId, Score> = HashMap::new();
    let mut counted = 0usize;

    for standings in &view.events {
        for result in &standings.results {
            if dataset.is_hidden(result.player_id) {
                continue;
            }
            if let Some(score) = policy.score_for_result(result, standings.event, &standings.ctx) {
                *scores_by_player.entry(result.player_id).or_default() += score;
                counted += 1;
            }
        }
    }

    debug!(
        "Aggregated {} results into {} player scores for season {}",
        counted,
        scores_by_player.len(),
        view.season.slug
    );
    scores_by_player
}

/// Full recomputation for one season: aggregate every in-season result, then
/// let the season's formula rank, cap byes and assign qualification.
///
/// This is a pure function of the dataset; callers cache its output.
pub fn compute_scores(
    dataset: &Dataset,
    season: &Season,
    country: Option<&str>,
    today: NaiveDate,
) -> Result<HashMap<PlayerId, LeaderboardScore>, ScoringError> {
    let policy = policy_for_season(season)?;
    let view = build_season_view(dataset, season, country, today);
    let scores_by_player = aggregate(dataset, &view, policy);
    Ok(policy.finalize_scores(&scores_by_player, &view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::PlayoffResult;
    use crate::testing::{dataset_with, event, result, EventSpec};

    #[test]
    fn test_event_context_from_results() {
        let r1 = result(1, 1, (3, 0, 0), 1, None);
        let r2 = result(2, 1, (2, 1, 0), 2, Some(PlayoffResult::Winner));
        let r3 = result(3, 1, (0, 1, 0), 3, None); // dropped after round 1
        let refs = vec![&r1, &r2, &r3];
        let ctx = EventContext::from_results(&refs);
        assert_eq!(ctx.event_size, 3);
        assert!(ctx.has_playoffs);
        assert_eq!(ctx.total_rounds, 3);
    }

    #[test]
    fn test_standings_order_playoffs_first() {
        let dataset = dataset_with(vec![EventSpec {
            event: event(1, "Premier Cup", 2024, 5, 4, crate::domain::Category::Premier),
            results: vec![
                result(1, 1, (5, 0, 0), 1, None),
                result(2, 1, (4, 1, 0), 2, Some(PlayoffResult::Winner)),
                result(3, 1, (4, 1, 0), 3, Some(PlayoffResult::Finalist)),
            ],
        }]);
        let season = crate::season::find_season_by_slug("2024").unwrap();
        let view = build_season_view(
            &dataset,
            season,
            None,
            chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        );
        let order: Vec<PlayerId> = view.events[0].results.iter().map(|r| r.player_id).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_hidden_players_are_absent_from_aggregation() {
        let mut dataset = dataset_with(vec![EventSpec {
            event: event(1, "Weekly", 2024, 5, 4, crate::domain::Category::Regular),
            results: vec![
                result(1, 1, (3, 0, 0), 1, None),
                result(2, 1, (2, 1, 0), 2, None),
            ],
        }]);
        dataset.players[1].hidden_from_leaderboard = true;

        let season = crate::season::find_season_by_slug("2024").unwrap();
        let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let scores = compute_scores(&dataset, season, None, today).unwrap();
        assert!(scores.contains_key(&1));
        assert!(!scores.contains_key(&2));
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let dataset = Dataset::default();
        let season = crate::season::find_season_by_slug("2024").unwrap();
        let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let scores = compute_scores(&dataset, season, None, today).unwrap();
        assert!(scores.is_empty());
    }

    #[test]
    fn test_idempotent_recomputation() {
        let dataset = dataset_with(vec![EventSpec {
            event: event(1, "Regional Open", 2024, 5, 4, crate::domain::Category::Regional),
            results: vec![
                result(1, 1, (3, 1, 0), 1, None),
                result(2, 1, (3, 1, 0), 2, None),
                result(3, 1, (2, 2, 0), 3, None),
            ],
        }]);
        let season = crate::season::find_season_by_slug("2024").unwrap();
        let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let first = compute_scores(&dataset, season, None, today).unwrap();
        let second = compute_scores(&dataset, season, None, today).unwrap();
        assert_eq!(first, second);
    }
}

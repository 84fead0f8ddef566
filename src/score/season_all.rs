use std::collections::HashMap;

use crate::domain::models::{Event, PlayerId, ResultRecord};
use crate::score::aggregator::{EventContext, SeasonView};
use crate::score::{policy_for_season, ranked_players, LeaderboardScore, Score, ScoringPolicy};
use crate::season::{main_season_for_date, Domain};

/// The all-time leaderboard. Every result is scored with the formula of the
/// main season its event fell into, so historical points keep their original
/// value; no byes or qualification are at stake.
pub struct SeasonAll;

impl ScoringPolicy for SeasonAll {
    fn score_for_result(
        &self,
        result: &ResultRecord,
        event: &Event,
        ctx: &EventContext,
    ) -> Option<Score> {
        let season = main_season_for_date(Domain::Swiss, event.date)?;
        let policy = policy_for_season(season).ok()?;
        policy.score_for_result(result, event, ctx)
    }

    fn finalize_scores(
        &self,
        scores_by_player: &HashMap<PlayerId, Score>,
        _view: &SeasonView,
    ) -> HashMap<PlayerId, LeaderboardScore> {
        let mut scores = HashMap::new();
        for (i, (player_id, score)) in ranked_players(scores_by_player).into_iter().enumerate() {
            let rank = (i + 1) as u32;
            scores.insert(player_id, LeaderboardScore::new(score.qps, rank, 0));
        }
        scores
    }
}

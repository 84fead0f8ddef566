use std::collections::HashMap;

use crate::domain::models::{Event, PlayerId, ResultRecord};
use crate::score::aggregator::{EventContext, SeasonView};
use crate::score::season_2024::Season2024;
use crate::score::{ranked_players, LeaderboardScore, QualificationType, Score, ScoringPolicy};

/// The 2024 Trial leaderboard: same per-result scoring as season 2024, but a
/// much wider cutoff and no byes or direct invites on the line.
pub struct Trial2024;

impl Trial2024 {
    const TOTAL_QUALIFICATION_SLOTS: u32 = 80;
}

impl ScoringPolicy for Trial2024 {
    fn score_for_result(
        &self,
        result: &ResultRecord,
        event: &Event,
        ctx: &EventContext,
    ) -> Option<Score> {
        Season2024.score_for_result(result, event, ctx)
    }

    fn finalize_scores(
        &self,
        scores_by_player: &HashMap<PlayerId, Score>,
        _view: &SeasonView,
    ) -> HashMap<PlayerId, LeaderboardScore> {
        let mut scores = HashMap::new();
        for (i, (player_id, score)) in ranked_players(scores_by_player).into_iter().enumerate() {
            let rank = (i + 1) as u32;
            let mut leaderboard_score = LeaderboardScore::new(score.qps, rank, 0);
            if rank <= Self::TOTAL_QUALIFICATION_SLOTS {
                leaderboard_score.qualification_type = QualificationType::Leaderboard;
                leaderboard_score.qualification_reason = "Qualified for SUL Trial 2024".to_string();
            }
            scores.insert(player_id, leaderboard_score);
        }
        scores
    }
}

use std::collections::HashMap;

use crate::domain::models::{Category, Event, PlayerId, ResultRecord};
use crate::score::aggregator::{EventContext, EventStandings, SeasonView};
use crate::score::qualification::award_direct_slots;
use crate::score::season_2024::Season2024;
use crate::score::season_2025::Season2025;
use crate::score::{ranked_players, LeaderboardScore, QualificationType, Score, ScoringPolicy};

/// The Spring Invitational leaderboard, running over the first half of season
/// 2025 with its scoring: Premier events hand out two direct invites each,
/// Regional events one.
pub struct InvitationalSpring2025;

impl InvitationalSpring2025 {
    const LEADERBOARD_QUALIFICATION_RANK: u32 = 80;

    fn direct_slots(standings: &EventStandings) -> usize {
        if !standings.ctx.has_playoffs {
            return 0;
        }
        match standings.event.category {
            Category::Premier => 2,
            Category::Regional => 1,
            _ => 0,
        }
    }
}

impl ScoringPolicy for InvitationalSpring2025 {
    fn score_for_result(
        &self,
        result: &ResultRecord,
        event: &Event,
        ctx: &EventContext,
    ) -> Option<Score> {
        Season2025.score_for_result(result, event, ctx)
    }

    fn finalize_scores(
        &self,
        scores_by_player: &HashMap<PlayerId, Score>,
        view: &SeasonView,
    ) -> HashMap<PlayerId, LeaderboardScore> {
        let mut direct_reasons: HashMap<PlayerId, String> = HashMap::new();
        award_direct_slots(
            &view.events,
            Self::direct_slots,
            Season2024::direct_reason,
            &mut direct_reasons,
        );

        let leaderboard_reason = if view.season.can_enter_results(view.today) {
            "At the end of the season this place qualifies for the SUL Invitational Spring 2025"
        } else {
            "Qualified for the SUL Invitational Spring 2025"
        };

        let mut scores = HashMap::new();
        for (i, (player_id, score)) in ranked_players(scores_by_player).into_iter().enumerate() {
            let rank = (i + 1) as u32;
            let mut leaderboard_score = LeaderboardScore::new(score.qps, rank, 0);
            if let Some(reason) = direct_reasons.get(&player_id) {
                leaderboard_score.qualification_type = QualificationType::Direct;
                leaderboard_score.qualification_reason = reason.clone();
            } else if rank <= Self::LEADERBOARD_QUALIFICATION_RANK {
                leaderboard_score.qualification_type = QualificationType::Leaderboard;
                leaderboard_score.qualification_reason = leaderboard_reason.to_string();
            }
            scores.insert(player_id, leaderboard_score);
        }
        scores
    }
}

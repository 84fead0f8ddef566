use std::collections::HashMap;

use crate::domain::models::{Category, Event, PlayerId, PlayoffResult, ResultRecord};
use crate::score::aggregator::{EventContext, EventStandings, SeasonView};
use crate::score::qualification::award_direct_slots;
use crate::score::season_2024::Season2024;
use crate::score::{ranked_players, LeaderboardScore, QualificationType, Score, ScoringPolicy};

/// The 2025 formula. Regular events gained small playoff bonuses, every
/// Premier event with playoffs awards a direct invite, and the leaderboard
/// cutoff became a fixed rank instead of a shrinking slot pool.
pub struct Season2025;

impl Season2025 {
    const PARTICIPATION_POINTS: i32 = 3;
    const MAX_BYES: i32 = 1;
    const LEADERBOARD_QUALIFICATION_RANK: u32 = 36;

    fn multiplier(category: Category) -> i32 {
        match category {
            Category::Regular => 1,
            Category::Regional => 4,
            Category::Premier => 6,
            other => panic!("season 2025 has no multiplier for {other:?} events"),
        }
    }

    fn playoff_points(category: Category, playoff: PlayoffResult) -> i32 {
        match category {
            Category::Premier => match playoff {
                PlayoffResult::Winner => 400,
                PlayoffResult::Finalist => 240,
                PlayoffResult::SemiFinalist => 160,
                PlayoffResult::QuarterFinalist => 120,
            },
            Category::Regional => match playoff {
                PlayoffResult::Winner => 100,
                PlayoffResult::Finalist => 60,
                PlayoffResult::SemiFinalist => 40,
                PlayoffResult::QuarterFinalist => 30,
            },
            Category::Regular => match playoff {
                PlayoffResult::Winner => 12,
                PlayoffResult::Finalist => 9,
                PlayoffResult::SemiFinalist => 6,
                PlayoffResult::QuarterFinalist => 3,
            },
            other => panic!("season 2025 has no playoff points for {other:?} events"),
        }
    }

    pub(crate) fn qps_for_result(result: &ResultRecord, event: &Event, ctx: &EventContext) -> i32 {
        let category = event.category;
        let mut points =
            (result.points() + Self::PARTICIPATION_POINTS) * Self::multiplier(category);

        if let Some(playoff) = result.playoff_result {
            points += Self::playoff_points(category, playoff);
        } else if ctx.has_playoffs && matches!(category, Category::Premier | Category::Regional) {
            // The match-point-rate tiers are unchanged from 2024.
            points += Season2024::matchpoint_rate_bonus(result, category, ctx.total_rounds);
        }

        points
    }

    fn byes_for_rank(rank: u32) -> i32 {
        if rank <= 4 { 1 } else { 0 }
    }

    fn direct_slots(standings: &EventStandings) -> usize {
        let qualifies =
            standings.event.category == Category::Premier && standings.ctx.has_playoffs;
        if qualifies { 1 } else { 0 }
    }
}

impl ScoringPolicy for Season2025 {
    fn score_for_result(
        &self,
        result: &ResultRecord,
        event: &Event,
        ctx: &EventContext,
    ) -> Option<Score> {
        if !Category::RANKED.contains(&event.category) {
            return None;
        }
        Some(Score {
            qps: Self::qps_for_result(result, event, ctx),
            byes: 0,
        })
    }

    fn finalize_scores(
        &self,
        scores_by_player: &HashMap<PlayerId, Score>,
        view: &SeasonView,
    ) -> HashMap<PlayerId, LeaderboardScore> {
        // Special rewards claim their invites before the event scan, so a
        // rewarded player never blocks an event slot from trickling down.
        let mut direct_reasons: HashMap<PlayerId, String> = HashMap::new();
        for rewarded in view.direct_invite_rewards() {
            direct_reasons.insert(
                rewarded.reward.player_id,
                Season2024::direct_reason(rewarded.result, rewarded.event),
            );
        }
        award_direct_slots(
            &view.events,
            Self::direct_slots,
            Season2024::direct_reason,
            &mut direct_reasons,
        );

        let leaderboard_reason = if view.season.can_enter_results(view.today) {
            "This place qualifies for the SUL Championship tournament at the end of the Season"
        } else {
            "Qualified for SUL Championship tournament"
        };

        let mut scores = HashMap::new();
        for (i, (player_id, score)) in ranked_players(scores_by_player).into_iter().enumerate() {
            let rank = (i + 1) as u32;
            let byes = (Self::byes_for_rank(rank) + score.byes + view.reward_byes_for(player_id))
                .min(Self::MAX_BYES);

            let mut leaderboard_score = LeaderboardScore::new(score.qps, rank, byes);
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

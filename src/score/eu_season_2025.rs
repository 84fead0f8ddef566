use std::collections::HashMap;

use crate::domain::models::{Category, Event, PlayerId, PlayoffResult, ResultRecord};
use crate::score::aggregator::{EventContext, EventStandings, SeasonView};
use crate::score::qualification::award_direct_slots;
use crate::score::{ranked_players, LeaderboardScore, QualificationType, Score, ScoringPolicy};

/// The 2025 European season. Instead of flat playoff bonuses it converts a
/// playoff finish into win-equivalents and scores the better of the Swiss
/// record and the playoff-derived record. Qualification is per country, driven
/// by the national leaderboard configuration.
pub struct EuSeason2025;

impl EuSeason2025 {
    const PARTICIPATION_POINTS: i32 = 3;

    /// Extra win-equivalents for placing high at a large event, on top of the
    /// playoff finish itself. Thresholds are cumulative.
    const EXTRA_WINS: [(u32, u32); 5] = [(12, 6), (16, 7), (32, 8), (64, 9), (128, 10)];

    fn multiplier(category: Category) -> Option<i32> {
        match category {
            Category::Regular => Some(1),
            Category::Regional => Some(3),
            Category::Premier => Some(3),
            Category::National => Some(4),
            Category::Qualifier => Some(5),
            Category::GrandPrix => Some(6),
            Category::Other => None,
        }
    }

    fn win_equivalents(playoff: PlayoffResult) -> u32 {
        match playoff {
            PlayoffResult::Winner => 16,
            PlayoffResult::Finalist => 10,
            PlayoffResult::SemiFinalist => 7,
            PlayoffResult::QuarterFinalist => 5,
        }
    }

    /// Rounds a sensibly-run Swiss event of this size would play.
    fn estimated_rounds(event_size: usize) -> u32 {
        if event_size <= 1 {
            return 0;
        }
        event_size.next_power_of_two().ilog2()
    }

    fn qps_for_result(result: &ResultRecord, mult: i32, ctx: &EventContext) -> i32 {
        let swiss = (result.points() + Self::PARTICIPATION_POINTS) * mult;

        let est_rounds = Self::estimated_rounds(ctx.event_size);
        let mut win_eq = result
            .playoff_result
            .map(Self::win_equivalents)
            .unwrap_or(0);
        for &(max_rank, min_rounds) in &Self::EXTRA_WINS {
            if result.ranking <= max_rank && est_rounds >= min_rounds {
                win_eq += 1;
            }
        }

        if ctx.has_playoffs && win_eq > 0 {
            let top_points = ((win_eq + est_rounds - 1) as i32 * 3 + 3) * mult;
            swiss.max(top_points)
        } else {
            swiss
        }
    }

    fn direct_slots(standings: &EventStandings) -> usize {
        let qualifies =
            standings.event.category == Category::Qualifier && standings.ctx.has_playoffs;
        if qualifies { 1 } else { 0 }
    }

    fn direct_reason(result: &ResultRecord, event: &Event) -> String {
        format!(
            "Invite to European Magic Cup for {} place at '{}'",
            result.ranking_display(),
            event.name
        )
    }
}

impl ScoringPolicy for EuSeason2025 {
    fn score_for_result(
        &self,
        result: &ResultRecord,
        event: &Event,
        ctx: &EventContext,
    ) -> Option<Score> {
        let mult = Self::multiplier(event.category)?;
        if result.points() == 0 && result.playoff_result.is_none() {
            return None;
        }
        Some(Score {
            qps: Self::qps_for_result(result, mult, ctx),
            byes: 0,
        })
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
            Self::direct_reason,
            &mut direct_reasons,
        );

        let national_reason = if view.season.can_enter_results(view.today) {
            "This place qualifies for the National Championship at the end of the season"
        } else {
            "Qualified for National Championship"
        };

        let mut scores = HashMap::new();
        for (i, (player_id, score)) in ranked_players(scores_by_player).into_iter().enumerate() {
            let rank = (i + 1) as u32;
            let mut leaderboard_score = LeaderboardScore::new(score.qps, rank, 0);
            if let Some(reason) = direct_reasons.get(&player_id) {
                leaderboard_score.qualification_type = QualificationType::Direct;
                leaderboard_score.qualification_reason = reason.clone();
            } else if let Some(national) = view.national {
                if rank <= national.continental_invites {
                    leaderboard_score.qualification_type = QualificationType::Direct;
                    leaderboard_score.qualification_reason =
                        "Invite to European Magic Cup at the end of the season".to_string();
                } else if rank <= national.national_invites {
                    leaderboard_score.qualification_type = QualificationType::Leaderboard;
                    leaderboard_score.qualification_reason = national_reason.to_string();
                }
            }
            scores.insert(player_id, leaderboard_score);
        }
        scores
    }
}

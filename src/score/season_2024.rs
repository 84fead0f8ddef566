use std::collections::HashMap;

use crate::domain::models::{Category, Event, PlayerId, PlayoffResult, ResultRecord};
use crate::score::aggregator::{EventContext, EventStandings, SeasonView};
use crate::score::qualification::award_direct_slots;
use crate::score::{ranked_players, LeaderboardScore, QualificationType, Score, ScoringPolicy};

/// The 2024 formula. Playoff bonuses were rebalanced against 2023, the
/// match-point-rate bonus replaced the raw placement bonuses, and large
/// Premier events started awarding direct invites to their winners.
pub struct Season2024;

impl Season2024 {
    const PARTICIPATION_POINTS: i32 = 3;
    const MAX_BYES: i32 = 1;
    pub(crate) const TOTAL_QUALIFICATION_SLOTS: usize = 40;
    const MIN_PLAYERS_FOR_DIRECT_QUALIFICATION: usize = 40;
    pub(crate) const DIRECT_QUALIFICATION_REASON: &'static str =
        "Direct qualification for {ranking} place at '{event_name}'";

    /// Match-point-rate tiers, highest first; the first match wins.
    const POINTS_FOR_MATCHPOINT_RATE: [(f64, fn(Category) -> i32); 2] = [
        (0.70, Self::points_for_mpr_70),
        (0.65, Self::points_for_mpr_65),
    ];

    fn multiplier(category: Category) -> i32 {
        match category {
            Category::Regular => 1,
            Category::Regional => 4,
            Category::Premier => 6,
            other => panic!("season 2024 has no multiplier for {other:?} events"),
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
            other => panic!("season 2024 has no playoff points for {other:?} events"),
        }
    }

    fn points_for_mpr_70(category: Category) -> i32 {
        match category {
            Category::Premier => 60,
            Category::Regional => 20,
            Category::Regular => 0,
            other => panic!("season 2024 has no match-point-rate points for {other:?} events"),
        }
    }

    fn points_for_mpr_65(category: Category) -> i32 {
        match category {
            Category::Premier => 30,
            Category::Regional => 10,
            Category::Regular => 0,
            other => panic!("season 2024 has no match-point-rate points for {other:?} events"),
        }
    }

    pub(crate) fn qps_for_result(result: &ResultRecord, event: &Event, ctx: &EventContext) -> i32 {
        let category = event.category;
        let mut points =
            (result.points() + Self::PARTICIPATION_POINTS) * Self::multiplier(category);

        if matches!(category, Category::Premier | Category::Regional) {
            if let Some(playoff) = result.playoff_result {
                points += Self::playoff_points(category, playoff);
            } else if ctx.has_playoffs {
                points += Self::matchpoint_rate_bonus(result, category, ctx.total_rounds);
            }
        }

        points
    }

    /// Players who miss the playoffs still get a bonus for a strong Swiss
    /// record. An event with zero recorded rounds is incomplete historical
    /// data; the bonus simply does not apply there.
    pub(crate) fn matchpoint_rate_bonus(
        result: &ResultRecord,
        category: Category,
        total_rounds: u32,
    ) -> i32 {
        if total_rounds == 0 {
            return 0;
        }
        let maximum_match_points = 3.0 * f64::from(total_rounds);
        let rate = result.points() as f64 / maximum_match_points;
        for (threshold, points_for_category) in Self::POINTS_FOR_MATCHPOINT_RATE {
            if rate >= threshold {
                return points_for_category(category);
            }
        }
        0
    }

    fn byes_for_rank(rank: u32) -> i32 {
        if rank <= 4 { 1 } else { 0 }
    }

    pub(crate) fn direct_reason(result: &ResultRecord, event: &Event) -> String {
        Self::DIRECT_QUALIFICATION_REASON
            .replace("{ranking}", &result.ranking_display())
            .replace("{event_name}", &event.name)
    }

    fn direct_slots(standings: &EventStandings) -> usize {
        let qualifies = standings.event.category == Category::Premier
            && standings.ctx.event_size >= Self::MIN_PLAYERS_FOR_DIRECT_QUALIFICATION
            && standings.ctx.has_playoffs;
        if qualifies { 1 } else { 0 }
    }
}

impl ScoringPolicy for Season2024 {
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
        // Direct invites go out first: one per large Premier event, passed to
        // the next finisher if the natural recipient already holds one.
        let mut direct_reasons: HashMap<PlayerId, String> = HashMap::new();
        award_direct_slots(
            &view.events,
            Self::direct_slots,
            Self::direct_reason,
            &mut direct_reasons,
        );
        for rewarded in view.direct_invite_rewards() {
            direct_reasons.insert(
                rewarded.reward.player_id,
                Self::direct_reason(rewarded.result, rewarded.event),
            );
        }

        let leaderboard_reason = if view.season.can_enter_results(view.today) {
            "This place qualifies for the SUL Invitational tournament at the end of the Season"
        } else {
            "Qualified for SUL Invitational tournament"
        };

        // Every direct invite takes one slot away from the leaderboard.
        let mut leaderboard_slots = Self::TOTAL_QUALIFICATION_SLOTS
            .saturating_sub(direct_reasons.len());

        let mut scores = HashMap::new();
        for (i, (player_id, score)) in ranked_players(scores_by_player).into_iter().enumerate() {
            let rank = (i + 1) as u32;
            let byes = (Self::byes_for_rank(rank) + score.byes + view.reward_byes_for(player_id))
                .min(Self::MAX_BYES);

            let mut leaderboard_score = LeaderboardScore::new(score.qps, rank, byes);
            if let Some(reason) = direct_reasons.get(&player_id) {
                leaderboard_score.qualification_type = QualificationType::Direct;
                leaderboard_score.qualification_reason = reason.clone();
            } else if leaderboard_slots > 0 {
                leaderboard_score.qualification_type = QualificationType::Leaderboard;
                leaderboard_score.qualification_reason = leaderboard_reason.to_string();
                leaderboard_slots -= 1;
            }
            scores.insert(player_id, leaderboard_score);
        }
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::aggregator::compute_scores;
    use crate::testing::{dataset_with, event, result, EventSpec};
    use chrono::NaiveDate;

    fn ctx(event_size: usize, has_playoffs: bool, total_rounds: u32) -> EventContext {
        EventContext {
            event_size,
            has_playoffs,
            total_rounds,
        }
    }

    #[test]
    fn test_regional_swiss_points() {
        // 4 players, points [10, 10, 9, 5]: qps = (points + 3) * 4.
        let ev = event(1, "Regional", 2024, 5, 4, Category::Regional);
        let context = ctx(4, false, 4);
        let records = [(3, 0, 1), (3, 0, 1), (3, 1, 0), (1, 2, 2)];
        let expected = [52, 52, 48, 32];
        for (i, (record, want)) in records.iter().zip(expected).enumerate() {
            let r = result(i as i64 + 1, 1, *record, i as u32 + 1, None);
            let score = Season2024.score_for_result(&r, &ev, &context).unwrap();
            assert_eq!(score.qps, want);
        }
    }

    #[test]
    fn test_premier_swiss_points() {
        // Same records at a Premier event: qps = (points + 3) * 6.
        let ev = event(1, "Premier", 2024, 5, 4, Category::Premier);
        let context = ctx(4, false, 4);
        let records = [(3, 0, 1), (3, 0, 1), (3, 1, 0), (1, 2, 2)];
        let expected = [78, 78, 72, 48];
        for (i, (record, want)) in records.iter().zip(expected).enumerate() {
            let r = result(i as i64 + 1, 1, *record, i as u32 + 1, None);
            let score = Season2024.score_for_result(&r, &ev, &context).unwrap();
            assert_eq!(score.qps, want);
        }
    }

    #[test]
    fn test_matchpoint_rate_bonus_tiers() {
        let ev = event(1, "Premier", 2024, 5, 4, Category::Premier);
        let context = ctx(64, true, 10);

        // 7-2-1 over 10 rounds: 22/30 = 0.733 -> top tier.
        let strong = result(1, 1, (7, 2, 1), 9, None);
        let score = Season2024.score_for_result(&strong, &ev, &context).unwrap();
        assert_eq!(score.qps, (22 + 3) * 6 + 60);

        // 6-3-2 would be 11 rounds; use 6-3-1 -> 19 points, 0.633 -> no bonus.
        let weak = result(2, 1, (6, 3, 1), 15, None);
        let score = Season2024.score_for_result(&weak, &ev, &context).unwrap();
        assert_eq!(score.qps, (19 + 3) * 6);

        // 20/30 = 0.667 -> second tier.
        let middle = result(3, 1, (6, 2, 2), 12, None);
        let score = Season2024.score_for_result(&middle, &ev, &context).unwrap();
        assert_eq!(score.qps, (20 + 3) * 6 + 30);
    }

    #[test]
    fn test_zero_round_event_gives_no_mpr_bonus() {
        let ev = event(1, "Premier", 2024, 5, 4, Category::Premier);
        let r = result(1, 1, (0, 0, 0), 9, None);
        let score = Season2024.score_for_result(&r, &ev, &ctx(64, true, 0)).unwrap();
        assert_eq!(score.qps, 3 * 6);
    }

    #[test]
    fn test_playoff_placement_overrides_mpr_bonus() {
        let ev = event(1, "Premier", 2024, 5, 4, Category::Premier);
        let r = result(1, 1, (9, 0, 1), 1, Some(PlayoffResult::Winner));
        let score = Season2024.score_for_result(&r, &ev, &ctx(64, true, 10)).unwrap();
        assert_eq!(score.qps, (28 + 3) * 6 + 400);
    }

    fn big_premier(event_id: i64, day: u32, winner: PlayerId, finalist: PlayerId) -> EventSpec {
        let mut results = vec![
            result(winner, event_id, (6, 0, 0), 1, Some(PlayoffResult::Winner)),
            result(finalist, event_id, (5, 1, 0), 2, Some(PlayoffResult::Finalist)),
        ];
        // Pad the event to the direct-qualification size with fresh players.
        for i in 0..38 {
            let filler = 1000 + event_id * 100 + i;
            results.push(result(filler, event_id, (2, 4, 0), (i + 3) as u32, None));
        }
        EventSpec {
            event: event(event_id, &format!("Premier {event_id}"), 2024, 3, day, Category::Premier),
            results,
        }
    }

    #[test]
    fn test_direct_invite_trickles_down_and_reduces_leaderboard_slots() {
        // Player 1 wins both qualifying events; the second invite passes to
        // player 3, the finalist of the second event.
        let dataset = dataset_with(vec![
            big_premier(1, 2, 1, 2),
            big_premier(2, 9, 1, 3),
        ]);
        let season = crate::season::find_season_by_slug("2024").unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let scores = compute_scores(&dataset, season, None, today).unwrap();

        assert_eq!(scores[&1].qualification_type, QualificationType::Direct);
        assert_eq!(
            scores[&1].qualification_reason,
            "Direct qualification for 1st place at 'Premier 1'"
        );
        assert_eq!(scores[&3].qualification_type, QualificationType::Direct);
        assert_eq!(
            scores[&3].qualification_reason,
            "Direct qualification for 1st place at 'Premier 2'"
        );
        // Player 2 only made one final and must qualify via the leaderboard.
        assert_eq!(scores[&2].qualification_type, QualificationType::Leaderboard);

        let qualified = scores
            .values()
            .filter(|s| s.qualification_type != QualificationType::None)
            .count();
        assert_eq!(qualified, Season2024::TOTAL_QUALIFICATION_SLOTS);
    }

    #[test]
    fn test_small_premier_awards_no_direct_invite() {
        let dataset = dataset_with(vec![EventSpec {
            event: event(1, "Small Premier", 2024, 3, 2, Category::Premier),
            results: vec![
                result(1, 1, (4, 0, 0), 1, Some(PlayoffResult::Winner)),
                result(2, 1, (3, 1, 0), 2, Some(PlayoffResult::Finalist)),
            ],
        }]);
        let season = crate::season::find_season_by_slug("2024").unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let scores = compute_scores(&dataset, season, None, today).unwrap();
        assert_eq!(scores[&1].qualification_type, QualificationType::Leaderboard);
    }

    #[test]
    fn test_byes_capped_at_one() {
        let dataset = dataset_with(vec![EventSpec {
            event: event(1, "Regional", 2024, 3, 2, Category::Regional),
            results: vec![
                result(1, 1, (4, 0, 0), 1, None),
                result(2, 1, (3, 1, 0), 2, None),
            ],
        }]);
        let season = crate::season::find_season_by_slug("2024").unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let scores = compute_scores(&dataset, season, None, today).unwrap();
        assert_eq!(scores[&1].byes, 1);
        assert_eq!(scores[&2].byes, 1);
    }

    #[test]
    fn test_leaderboard_reason_changes_after_deadline() {
        let dataset = dataset_with(vec![EventSpec {
            event: event(1, "Regional", 2024, 3, 2, Category::Regional),
            results: vec![result(1, 1, (4, 0, 0), 1, None)],
        }]);
        let season = crate::season::find_season_by_slug("2024").unwrap();

        let during = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let scores = compute_scores(&dataset, season, None, during).unwrap();
        assert_eq!(
            scores[&1].qualification_reason,
            "This place qualifies for the SUL Invitational tournament at the end of the Season"
        );

        let after = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let scores = compute_scores(&dataset, season, None, after).unwrap();
        assert_eq!(
            scores[&1].qualification_reason,
            "Qualified for SUL Invitational tournament"
        );
    }
}

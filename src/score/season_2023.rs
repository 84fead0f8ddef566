use std::collections::HashMap;

use crate::domain::models::{Category, Event, PlayerId, PlayoffResult, ResultRecord};
use crate::score::aggregator::{EventContext, SeasonView};
use crate::score::{ranked_players, LeaderboardScore, QualificationType, Score, ScoringPolicy};

/// The 2023 formula. Playoff finishes add flat bonuses on top of Swiss
/// points, and large events pay out placement bonuses below the playoff cut.
pub struct Season2023;

impl Season2023 {
    const PARTICIPATION_POINTS: i32 = 3;
    const MAX_BYES: i32 = 2;
    const LEADERBOARD_QUALIFICATION_RANK: u32 = 40;
    const MIN_SIZE_EXTRA_BYE: usize = 128;

    fn multiplier(category: Category) -> i32 {
        match category {
            Category::Regular => 1,
            Category::Regional => 4,
            Category::Premier => 6,
            other => panic!("season 2023 has no multiplier for {other:?} events"),
        }
    }

    fn playoff_points(category: Category, playoff: PlayoffResult) -> i32 {
        match category {
            Category::Premier => match playoff {
                PlayoffResult::Winner => 500,
                PlayoffResult::Finalist => 300,
                PlayoffResult::SemiFinalist => 200,
                PlayoffResult::QuarterFinalist => 150,
            },
            Category::Regional => match playoff {
                PlayoffResult::Winner => 100,
                PlayoffResult::Finalist => 60,
                PlayoffResult::SemiFinalist => 40,
                PlayoffResult::QuarterFinalist => 30,
            },
            other => panic!("season 2023 has no playoff points for {other:?} events"),
        }
    }

    fn points_top_9_12(category: Category) -> i32 {
        match category {
            Category::Premier => 75,
            Category::Regional => 15,
            Category::Regular => 0,
            other => panic!("season 2023 has no 9th-12th points for {other:?} events"),
        }
    }

    fn points_top_13_16(category: Category) -> i32 {
        match category {
            Category::Premier => 50,
            Category::Regional => 10,
            Category::Regular => 0,
            other => panic!("season 2023 has no 13th-16th points for {other:?} events"),
        }
    }

    fn qps_for_result(result: &ResultRecord, event: &Event, ctx: &EventContext) -> i32 {
        let category = event.category;
        let mut points =
            (result.points() + Self::PARTICIPATION_POINTS) * Self::multiplier(category);

        if !matches!(category, Category::Premier | Category::Regional) {
            return points;
        }

        if let Some(playoff) = result.playoff_result {
            points += Self::playoff_points(category, playoff);
        } else if ctx.has_playoffs {
            // Large events pay for placing even outside the playoffs.
            if ctx.event_size > 32 && (9..=12).contains(&result.ranking) {
                points += Self::points_top_9_12(category);
            } else if ctx.event_size > 48 && (13..=16).contains(&result.ranking) {
                points += Self::points_top_13_16(category);
            } else if result.ranking <= 8 {
                // The event only played a top4; 5th-8th still get the
                // quarter-finalist bonus.
                points += Self::playoff_points(category, PlayoffResult::QuarterFinalist);
            }
        }

        points
    }

    /// Winning a very large Premier event awards byes directly.
    fn byes_for_result(result: &ResultRecord, event: &Event, ctx: &EventContext) -> i32 {
        if ctx.event_size > Self::MIN_SIZE_EXTRA_BYE
            && event.category == Category::Premier
            && result.playoff_result == Some(PlayoffResult::Winner)
        {
            2
        } else {
            0
        }
    }

    fn byes_for_rank(rank: u32) -> i32 {
        match rank {
            1 => 2,
            2..=5 => 1,
            _ => 0,
        }
    }
}

impl ScoringPolicy for Season2023 {
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
            byes: Self::byes_for_result(result, event, ctx),
        })
    }

    fn finalize_scores(
        &self,
        scores_by_player: &HashMap<PlayerId, Score>,
        _view: &SeasonView,
    ) -> HashMap<PlayerId, LeaderboardScore> {
        let mut scores = HashMap::new();
        for (i, (player_id, score)) in ranked_players(scores_by_player).into_iter().enumerate() {
            let rank = (i + 1) as u32;
            let byes = (Self::byes_for_rank(rank) + score.byes).min(Self::MAX_BYES);

            let mut leaderboard_score = LeaderboardScore::new(score.qps, rank, byes);
            if rank <= Self::LEADERBOARD_QUALIFICATION_RANK {
                leaderboard_score.qualification_type = QualificationType::Leaderboard;
                leaderboard_score.qualification_reason =
                    "Qualified for the SUL Invitational tournament".to_string();
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
    fn test_regular_event_scores_plain_swiss_points() {
        let ev = event(1, "FNM", 2023, 5, 5, Category::Regular);
        let r = result(1, 1, (3, 1, 0), 2, None);
        let score = Season2023.score_for_result(&r, &ev, &ctx(8, false, 4)).unwrap();
        assert_eq!(score.qps, (9 + 3) * 1);
    }

    #[test]
    fn test_playoff_bonus_is_additive() {
        let ev = event(1, "Premier 1k", 2023, 5, 5, Category::Premier);
        let r = result(1, 1, (4, 1, 0), 3, Some(PlayoffResult::Winner));
        let score = Season2023.score_for_result(&r, &ev, &ctx(30, true, 5)).unwrap();
        assert_eq!(score.qps, (12 + 3) * 6 + 500);
    }

    #[test]
    fn test_large_event_placement_bonuses() {
        let ev = event(1, "Regional Open", 2023, 5, 5, Category::Regional);
        let context = ctx(50, true, 6);

        let tenth = result(1, 1, (4, 2, 0), 10, None);
        let score = Season2023.score_for_result(&tenth, &ev, &context).unwrap();
        assert_eq!(score.qps, (12 + 3) * 4 + 15);

        let fourteenth = result(2, 1, (4, 2, 0), 14, None);
        let score = Season2023.score_for_result(&fourteenth, &ev, &context).unwrap();
        assert_eq!(score.qps, (12 + 3) * 4 + 10);
    }

    #[test]
    fn test_top4_only_event_pays_quarterfinalist_points() {
        let ev = event(1, "Regional Cut", 2023, 5, 5, Category::Regional);
        // 6th place, event played a top4 only.
        let sixth = result(1, 1, (3, 2, 0), 6, None);
        let score = Season2023.score_for_result(&sixth, &ev, &ctx(20, true, 5)).unwrap();
        assert_eq!(score.qps, (9 + 3) * 4 + 30);
    }

    #[test]
    fn test_other_category_does_not_contribute() {
        let ev = event(1, "Chaos Draft", 2023, 5, 5, Category::Other);
        let r = result(1, 1, (5, 0, 0), 1, None);
        assert!(Season2023.score_for_result(&r, &ev, &ctx(8, false, 5)).is_none());
    }

    #[test]
    fn test_huge_premier_winner_byes_capped_at_max() {
        // 130-player Premier with a playoff winner: the result alone grants 2
        // byes, the rank-1 bye rule would add 2 more, and the cap keeps it at 2.
        let results = (1..=130)
            .map(|p| {
                let playoff = if p == 1 { Some(PlayoffResult::Winner) } else { None };
                result(p, 1, (6, 2, 0), p as u32, playoff)
            })
            .collect();
        let dataset = dataset_with(vec![EventSpec {
            event: event(1, "Championship Premier", 2023, 6, 3, Category::Premier),
            results,
        }]);
        let season = crate::season::find_season_by_slug("2023").unwrap();
        let today = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
        let scores = compute_scores(&dataset, season, None, today).unwrap();

        let winner = &scores[&1];
        assert_eq!(winner.rank, 1);
        assert_eq!(winner.byes, 2);
    }

    #[test]
    fn test_top_40_qualify_via_leaderboard() {
        let results = (1..=45)
            .map(|p| result(p, 1, (8 - (p as u32).min(7), 1, 0), p as u32, None))
            .collect();
        let dataset = dataset_with(vec![EventSpec {
            event: event(1, "Regional", 2023, 6, 3, Category::Regional),
            results,
        }]);
        let season = crate::season::find_season_by_slug("2023").unwrap();
        let today = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
        let scores = compute_scores(&dataset, season, None, today).unwrap();

        let qualified = scores
            .values()
            .filter(|s| s.qualification_type == QualificationType::Leaderboard)
            .count();
        assert_eq!(qualified, 40);
        for score in scores.values() {
            if score.rank > 40 {
                assert_eq!(score.qualification_type, QualificationType::None);
            }
        }
    }
}

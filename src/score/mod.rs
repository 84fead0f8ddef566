pub mod aggregator;
pub mod eu_season_2025;
pub mod invitational_spring_2025;
pub mod qualification;
pub mod season_2023;
pub mod season_2024;
pub mod season_2025;
pub mod season_all;
pub mod trial_2024;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::{Add, AddAssign};

use crate::domain::models::{Event, PlayerId, ResultRecord};
use crate::errors::ScoringError;
use crate::season::Season;

pub use aggregator::{compute_scores, EventContext, EventStandings, SeasonView};

/// Season-scoped partial score for one player. Values of the same player and
/// season are summed across events; addition is associative and commutative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub qps: i32,
    pub byes: i32,
}

impl Add for Score {
    type Output = Score;

    fn add(self, other: Score) -> Score {
        Score {
            qps: self.qps + other.qps,
            byes: self.byes + other.byes,
        }
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, other: Score) {
        *self = *self + other;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualificationType {
    #[default]
    None,
    Leaderboard,
    Direct,
}

/// Final, season-agnostic leaderboard entry for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardScore {
    pub total_score: i32,
    /// 1-based position on the leaderboard.
    pub rank: u32,
    /// Byes for the season finale, already capped at the season maximum.
    pub byes: i32,
    pub qualification_type: QualificationType,
    pub qualification_reason: String,
}

impl LeaderboardScore {
    pub fn new(total_score: i32, rank: u32, byes: i32) -> Self {
        Self {
            total_score,
            rank,
            byes,
            qualification_type: QualificationType::None,
            qualification_reason: String::new(),
        }
    }
}

/// One scoring formula. Every season has exactly one implementation; the
/// constants of a season live next to its implementation so that adding a new
/// season never touches an old one.
pub trait ScoringPolicy: Sync {
    /// Score a single result. `None` means the result does not contribute to
    /// the leaderboard at all (excluded category, or nothing scored); such
    /// results must be absent from aggregation, not counted as zero.
    fn score_for_result(
        &self,
        result: &ResultRecord,
        event: &Event,
        ctx: &EventContext,
    ) -> Option<Score>;

    /// Rank the aggregated scores, assign byes and qualification slots.
    fn finalize_scores(
        &self,
        scores_by_player: &HashMap<PlayerId, Score>,
        view: &SeasonView,
    ) -> HashMap<PlayerId, LeaderboardScore>;
}

/// Explicit season-to-formula registry.
pub fn policy_for_season(season: &Season) -> Result<&'static dyn ScoringPolicy, ScoringError> {
    static S2023: season_2023::Season2023 = season_2023::Season2023;
    static S2024: season_2024::Season2024 = season_2024::Season2024;
    static S2025: season_2025::Season2025 = season_2025::Season2025;
    static TRIAL_2024: trial_2024::Trial2024 = trial_2024::Trial2024;
    static INVITATIONAL_SPRING_2025: invitational_spring_2025::InvitationalSpring2025 =
        invitational_spring_2025::InvitationalSpring2025;
    static EU_2025: eu_season_2025::EuSeason2025 = eu_season_2025::EuSeason2025;
    static ALL: season_all::SeasonAll = season_all::SeasonAll;

    match season.slug.as_str() {
        "2023" => Ok(&S2023),
        "2024" => Ok(&S2024),
        "2025" => Ok(&S2025),
        "sul-trial-2024" => Ok(&TRIAL_2024),
        "invitational-spring-2025" => Ok(&INVITATIONAL_SPRING_2025),
        "eu-2025" => Ok(&EU_2025),
        "all" => Ok(&ALL),
        other => Err(ScoringError::NoScoringMethod(other.to_string())),
    }
}

/// Players ordered for ranking: best qps first, ties broken by player id
/// ascending. The tie-break is a deliberate, documented rule so that repeated
/// runs over the same data always produce the same leaderboard.
pub(crate) fn ranked_players(scores_by_player: &HashMap<PlayerId, Score>) -> Vec<(PlayerId, Score)> {
    let mut ranked: Vec<(PlayerId, Score)> =
        scores_by_player.iter().map(|(&p, &s)| (p, s)).collect();
    ranked.sort_by(|a, b| b.1.qps.cmp(&a.1.qps).then(a.0.cmp(&b.0)));
    ranked
}

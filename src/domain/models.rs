use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type PlayerId = i64;
pub type EventId = i64;
pub type OrganizerId = i64;

/// A player in the league, across many tournaments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Hidden players (e.g. virtual placeholder entries from tournament
    /// software) never appear on any leaderboard.
    #[serde(default)]
    pub hidden_from_leaderboard: bool,
}

/// Competitive tier of an event. The tier decides which multiplier and bonus
/// tables apply in a given season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Regular,
    Regional,
    Premier,
    National,
    Qualifier,
    GrandPrix,
    Other,
}

impl Category {
    /// Categories that award qualification points in the main seasons,
    /// lowest tier first.
    pub const RANKED: [Category; 3] = [Category::Regular, Category::Regional, Category::Premier];

    pub fn display(&self) -> &'static str {
        match self {
            Category::Regular => "Regular",
            Category::Regional => "Regional",
            Category::Premier => "Premier",
            Category::National => "National",
            Category::Qualifier => "Qualifier",
            Category::GrandPrix => "Grand Prix",
            Category::Other => "Other",
        }
    }
}

/// A single tournament.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub organizer_id: OrganizerId,
    /// For multi-day events, the first day.
    pub date: NaiveDate,
    pub category: Category,
    #[serde(default)]
    pub format: Option<String>,
}

/// Single-elimination bracket finish. The wire value is the ordinal standing
/// the finish guarantees, so lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PlayoffResult {
    Winner = 1,
    Finalist = 2,
    SemiFinalist = 4,
    QuarterFinalist = 8,
}

impl PlayoffResult {
    pub fn ordinal(&self) -> u32 {
        *self as u32
    }

    pub fn ranking_display(&self) -> &'static str {
        match self {
            PlayoffResult::Winner => "1st",
            PlayoffResult::Finalist => "2nd",
            PlayoffResult::SemiFinalist => "3rd-4th",
            PlayoffResult::QuarterFinalist => "5th-8th",
        }
    }
}

impl From<PlayoffResult> for u8 {
    fn from(value: PlayoffResult) -> u8 {
        value as u8
    }
}

impl TryFrom<u8> for PlayoffResult {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlayoffResult::Winner),
            2 => Ok(PlayoffResult::Finalist),
            4 => Ok(PlayoffResult::SemiFinalist),
            8 => Ok(PlayoffResult::QuarterFinalist),
            other => Err(format!("invalid playoff result ordinal: {other}")),
        }
    }
}

/// A result for a single player in a single event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub player_id: PlayerId,
    pub event_id: EventId,
    pub win_count: u32,
    pub loss_count: u32,
    pub draw_count: u32,
    /// Standing after the Swiss rounds, 1-based, unique per event.
    pub ranking: u32,
    #[serde(default)]
    pub playoff_result: Option<PlayoffResult>,
}

impl ResultRecord {
    /// Match points scored in the Swiss rounds (3 per win, 1 per draw).
    pub fn points(&self) -> i32 {
        (3 * self.win_count + self.draw_count) as i32
    }

    pub fn rounds_played(&self) -> u32 {
        self.win_count + self.loss_count + self.draw_count
    }

    /// Sort key for event standings: playoff finishes first (a missing finish
    /// sorts behind any bracket placement), then Swiss ranking.
    pub fn standing_key(&self) -> (u32, u32) {
        let bracket = self.playoff_result.map_or(32, |p| p.ordinal());
        (bracket, self.ranking)
    }

    /// Human-readable final placement, e.g. "1st" or "3rd-4th" for playoff
    /// finishes and "9th" for a Swiss-only standing.
    pub fn ranking_display(&self) -> String {
        match self.playoff_result {
            Some(playoff) => playoff.ranking_display().to_string(),
            None => ordinal(self.ranking),
        }
    }
}

/// An extra reward attached to a result by the league admins, e.g. for winning
/// a community tournament outside the regular calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialReward {
    pub player_id: PlayerId,
    pub event_id: EventId,
    #[serde(default)]
    pub byes: i32,
    #[serde(default)]
    pub direct_invite: bool,
}

/// Per-country invite allocation for a continental season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NationalLeaderboard {
    pub country: String,
    pub season_slug: String,
    pub national_invites: u32,
    pub continental_invites: u32,
}

/// A league of events run by a single organizer over a time frame, ranked
/// separately from the season leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizerLeague {
    pub name: String,
    pub organizer_id: OrganizerId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// None means all formats count.
    #[serde(default)]
    pub format: Option<String>,
    /// Events of this category and lower are included.
    pub max_category: Category,
    /// Whether events with playoffs count towards the league.
    pub include_playoffs: bool,
}

impl OrganizerLeague {
    /// The event categories counting towards this league.
    pub fn included_categories(&self) -> &'static [Category] {
        let index = Category::RANKED
            .iter()
            .position(|c| *c == self.max_category)
            .unwrap_or_else(|| {
                panic!(
                    "organizer league '{}' has non-ranked category {:?}",
                    self.name, self.max_category
                )
            });
        &Category::RANKED[..=index]
    }
}

/// English ordinal suffix, with the usual 11th/12th/13th exceptions.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

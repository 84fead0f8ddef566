pub mod calendar;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub use calendar::{
    all_seasons, default_season, find_season_by_slug, main_season_for_date, seasons_for_domain,
};

/// Which site a season belongs to. Each domain has its own calendar and its
/// own default season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Swiss,
    Global,
}

/// An immutable description of a competitive season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub name: String,
    /// URL-safe identifier, `[a-zA-Z0-9-]+`.
    pub slug: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Grace period after the end date during which organizers may still
    /// upload results.
    pub result_deadline_days: u64,
    pub domain: Domain,
    /// Whether it's a main (yearly) season and not a special one.
    pub main_season: bool,
    /// Whether this is the default season to show.
    pub default: bool,
    /// Whether the season is shown in season pickers.
    pub visible: bool,
}

impl Season {
    /// Checks if results can still be added to this season on a given date.
    pub fn can_enter_results(&self, on_date: NaiveDate) -> bool {
        on_date <= self.end_date + Days::new(self.result_deadline_days)
    }

    pub fn includes_date(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

impl PartialEq for Season {
    fn eq(&self, other: &Self) -> bool {
        (self.start_date, self.end_date) == (other.start_date, other.end_date)
    }
}

impl Eq for Season {}

impl PartialOrd for Season {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Season {
    /// Newest season first; for equal start dates, the shorter season first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .start_date
            .cmp(&self.start_date)
            .then(self.end_date.cmp(&other.end_date))
    }
}

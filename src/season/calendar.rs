use chrono::NaiveDate;
use std::sync::LazyLock;

use crate::errors::ScoringError;
use crate::season::{Domain, Season};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

fn season(name: &str, slug: &str, start: NaiveDate, end: NaiveDate) -> Season {
    Season {
        name: name.to_string(),
        slug: slug.to_string(),
        start_date: start,
        end_date: end,
        result_deadline_days: 7,
        domain: Domain::Swiss,
        main_season: false,
        default: false,
        visible: true,
    }
}

/// Every season the engine knows about, newest first within each domain.
///
/// The scoring formulas for these seasons live in `crate::score`; a new season
/// needs an entry here and its own policy in the registry.
static SEASONS: LazyLock<Vec<Season>> = LazyLock::new(|| {
    let season_2023 = Season {
        main_season: true,
        ..season("Season 2023", "2023", date(2023, 1, 1), date(2023, 10, 31))
    };
    let season_2024 = Season {
        main_season: true,
        ..season("Season 2024", "2024", date(2023, 11, 1), date(2024, 10, 31))
    };
    let season_2025 = Season {
        main_season: true,
        default: true,
        ..season("Season 2025", "2025", date(2024, 11, 1), date(2025, 10, 31))
    };
    let trial_2024 = Season {
        visible: false,
        ..season(
            "SUL Trial 2024",
            "sul-trial-2024",
            season_2024.start_date,
            date(2024, 4, 30),
        )
    };
    let invitational_spring_2025 = season(
        "Spring Invitational 2025",
        "invitational-spring-2025",
        season_2025.start_date,
        date(2025, 3, 31),
    );
    let eu_season_2025 = Season {
        domain: Domain::Global,
        main_season: true,
        default: true,
        ..season("Season 2025", "eu-2025", date(2025, 1, 1), date(2025, 9, 30))
    };
    let season_all = season(
        "all seasons",
        "all",
        season_2023.start_date,
        season_2025.end_date,
    );

    vec![
        season_2025,
        invitational_spring_2025,
        trial_2024,
        season_2024,
        season_2023,
        eu_season_2025,
        season_all,
    ]
});

pub fn all_seasons() -> &'static [Season] {
    &SEASONS
}

/// Seasons of one domain, newest first.
pub fn seasons_for_domain(domain: Domain) -> Vec<&'static Season> {
    let mut seasons: Vec<&Season> = SEASONS.iter().filter(|s| s.domain == domain).collect();
    seasons.sort();
    seasons
}

pub fn find_season_by_slug(slug: &str) -> Result<&'static Season, ScoringError> {
    SEASONS
        .iter()
        .find(|s| s.slug == slug)
        .ok_or_else(|| ScoringError::UnknownSeason(slug.to_string()))
}

/// The season shown when no slug is given. There is exactly one per domain.
pub fn default_season(domain: Domain) -> &'static Season {
    SEASONS
        .iter()
        .find(|s| s.domain == domain && s.default)
        .expect("every domain has a default season")
}

/// The main (yearly) season whose date range contains the given date, if any.
pub fn main_season_for_date(domain: Domain, date: NaiveDate) -> Option<&'static Season> {
    SEASONS
        .iter()
        .filter(|s| s.domain == domain && s.main_season)
        .find(|s| s.includes_date(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_season_by_slug() {
        let season = find_season_by_slug("2024").unwrap();
        assert_eq!(season.name, "Season 2024");
        assert_eq!(season.start_date, date(2023, 11, 1));
    }

    #[test]
    fn test_unknown_slug_is_an_error() {
        let err = find_season_by_slug("season-9000").unwrap_err();
        assert_eq!(err, ScoringError::UnknownSeason("season-9000".to_string()));
    }

    #[test]
    fn test_exactly_one_default_per_domain() {
        for domain in [Domain::Swiss, Domain::Global] {
            let defaults = SEASONS
                .iter()
                .filter(|s| s.domain == domain && s.default)
                .count();
            assert_eq!(defaults, 1, "expected one default season for {domain:?}");
        }
    }

    #[test]
    fn test_main_seasons_do_not_overlap() {
        let mains: Vec<&Season> = SEASONS
            .iter()
            .filter(|s| s.domain == Domain::Swiss && s.main_season)
            .collect();
        for a in &mains {
            for b in &mains {
                if a.slug != b.slug {
                    assert!(
                        a.end_date < b.start_date || b.end_date < a.start_date,
                        "{} overlaps {}",
                        a.slug,
                        b.slug
                    );
                }
            }
        }
    }

    #[test]
    fn test_main_season_for_date() {
        let season = main_season_for_date(Domain::Swiss, date(2024, 5, 1)).unwrap();
        assert_eq!(season.slug, "2024");
        assert!(main_season_for_date(Domain::Swiss, date(2022, 5, 1)).is_none());
    }

    #[test]
    fn test_seasons_for_domain_sorted_newest_first() {
        let seasons = seasons_for_domain(Domain::Swiss);
        let slugs: Vec<&str> = seasons.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(
            slugs,
            vec![
                "invitational-spring-2025",
                "2025",
                "sul-trial-2024",
                "2024",
                "2023",
                "all",
            ]
        );
    }
}

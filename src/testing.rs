//! Fixture builders shared by unit tests.

use chrono::NaiveDate;

use crate::domain::models::{Category, Event, EventId, Player, PlayerId, PlayoffResult, ResultRecord};
use crate::domain::Dataset;

pub struct EventSpec {
    pub event: Event,
    pub results: Vec<ResultRecord>,
}

pub fn event(id: EventId, name: &str, year: i32, month: u32, day: u32, category: Category) -> Event {
    Event {
        id,
        name: name.to_string(),
        organizer_id: 1,
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        category,
        format: None,
    }
}

pub fn result(
    player_id: PlayerId,
    event_id: EventId,
    record: (u32, u32, u32),
    ranking: u32,
    playoff_result: Option<PlayoffResult>,
) -> ResultRecord {
    ResultRecord {
        player_id,
        event_id,
        win_count: record.0,
        loss_count: record.1,
        draw_count: record.2,
        ranking,
        playoff_result,
    }
}

/// Build a dataset from events with results, creating one visible player per
/// distinct player id (ordered by id, so `dataset.players[i]` is predictable).
pub fn dataset_with(specs: Vec<EventSpec>) -> Dataset {
    let mut dataset = Dataset::default();
    let mut player_ids: Vec<PlayerId> = Vec::new();

    for spec in specs {
        for result in &spec.results {
            if !player_ids.contains(&result.player_id) {
                player_ids.push(result.player_id);
            }
        }
        dataset.results.extend(spec.results);
        dataset.events.push(spec.event);
    }

    player_ids.sort_unstable();
    dataset.players = player_ids
        .into_iter()
        .map(|id| Player {
            id,
            name: format!("Player {id}"),
            hidden_from_leaderboard: false,
        })
        .collect();
    dataset
}

//! Direct-qualification slot assignment.
//!
//! Some seasons award invites for winning specific events rather than through
//! leaderboard rank. The scan is order-sensitive: events are visited in date
//! order, finishers best-to-worst, and a finisher who already holds an invite
//! from this pass lets the slot trickle down to the next finisher of the same
//! event. It runs before any rank-based qualification.

use std::collections::HashMap;

use crate::domain::models::{Event, PlayerId, ResultRecord};
use crate::score::aggregator::EventStandings;

/// Walk `events` (already in date order) and hand out direct-qualification
/// slots, storing a reason string per newly qualified player.
///
/// `slots_for_event` decides how many slots an event awards; returning 0
/// skips the event (e.g. no playoffs were played). Entries already present in
/// `reasons_by_player` keep their original reason and make the holder
/// ineligible for further slots, which is what lets slots trickle down.
pub fn award_direct_slots<F, R>(
    events: &[EventStandings],
    slots_for_event: F,
    reason: R,
    reasons_by_player: &mut HashMap<PlayerId, String>,
) where
    F: Fn(&EventStandings) -> usize,
    R: Fn(&ResultRecord, &Event) -> String,
{
    for standings in events {
        let mut remaining = slots_for_event(standings);
        if remaining == 0 {
            continue;
        }
        for result in &standings.results {
            if remaining == 0 {
                break;
            }
            if reasons_by_player.contains_key(&result.player_id) {
                continue;
            }
            reasons_by_player.insert(result.player_id, reason(result, standings.event));
            remaining -= 1;
        }
    }
}

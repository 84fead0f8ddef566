use thiserror::Error;

use crate::domain::models::{EventId, PlayerId};

/// Errors a caller can act on. Misconfigured season tables are bugs, not
/// errors, and panic instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    #[error("unknown season '{0}'")]
    UnknownSeason(String),

    #[error("no scoring method registered for season '{0}'")]
    NoScoringMethod(String),

    #[error("unknown event {0}")]
    UnknownEvent(EventId),

    #[error("no result for player {player_id} in event {event_id}")]
    UnknownResult {
        event_id: EventId,
        player_id: PlayerId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ScoringError::UnknownSeason("199".to_string()).to_string(),
            "unknown season '199'"
        );
        assert_eq!(
            ScoringError::UnknownResult {
                event_id: 3,
                player_id: 7
            }
            .to_string(),
            "no result for player 7 in event 3"
        );
    }
}

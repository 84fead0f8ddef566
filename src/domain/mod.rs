pub mod dataset;
pub mod models;

pub use dataset::Dataset;
pub use models::{
    Category, Event, EventId, NationalLeaderboard, OrganizerId, OrganizerLeague, Player, PlayerId,
    PlayoffResult, ResultRecord, SpecialReward,
};

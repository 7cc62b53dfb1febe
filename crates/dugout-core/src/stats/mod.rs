// Stats store: typed per-season records and the repository that owns them.

pub mod repository;
pub mod types;

pub use repository::{
    canonical_name, DailyAttributes, PlayerEntry, PlayerId, PlayerSeason, PlayerStat,
    StatsRepository, TeamEntry, TeamStat,
};
pub use types::{FieldingPosition, Hand, Venue};

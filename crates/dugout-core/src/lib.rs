// Library root: stats repository, ingestion, lineup feed handling, identity
// resolution and the projection engine.

pub mod error;
pub mod identity;
pub mod ingest;
pub mod lineup;
pub mod optimizer;
pub mod projection;
pub mod stats;
pub mod teams;

pub use error::StatsError;
pub use projection::{PlayerProjection, ProjectionEngine, ScoreBreakdown};
pub use stats::{PlayerId, StatsRepository};

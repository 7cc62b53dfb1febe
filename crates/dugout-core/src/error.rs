// Error taxonomy shared by the repository, lineup application and projection engine.

use thiserror::Error;

/// Errors raised while reading from or writing daily facts into the stats repository.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    /// A lookup outside the guaranteed-total contract: unknown entity, a split that was
    /// never ingested, or a team queried before its matchup was parsed.
    #[error("missing key: {entity} / {key}")]
    MissingKey { entity: String, key: String },

    /// Identity resolution found no repository entry for a feed token.
    #[error("player not found: {token}")]
    PlayerNotFound { token: String },

    /// A lineup row did not tokenize into the expected shape.
    #[error("malformed lineup row: {row}")]
    MalformedLineupRow { row: String },

    /// A projection denominator was zero. Formulas recover from this locally and never
    /// return it; it exists so helpers can name the condition.
    #[error("degenerate stat: {stat} has a zero denominator")]
    DegenerateStat { stat: String },

    /// A feed team name that is not in the franchise table.
    #[error("unknown team: {name}")]
    UnknownTeam { name: String },

    /// A second matchup event for a team on the same day.
    #[error("matchup already recorded for {team} (opponent {opponent})")]
    MatchupAlreadySet { team: String, opponent: String },
}

impl StatsError {
    pub(crate) fn missing(entity: impl Into<String>, key: impl Into<String>) -> Self {
        StatsError::MissingKey {
            entity: entity.into(),
            key: key.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;

use thiserror::Error;

use crate::chart::ChartKey;

/// Errors for depth chart rules.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Rank {requested} is out of range for {key}, expected 1..={max}")]
    RankOutOfRange {
        key: ChartKey,
        requested: u32,
        max: u32,
    },

    #[error("Player #{number} is already ranked in {key}")]
    PlayerAlreadyRanked { key: ChartKey, number: u32 },

    #[error("Invalid position code '{0}'")]
    InvalidPosition(String),

    #[error("Invalid sport or team '{0}'")]
    InvalidScope(String),

    #[error("Invalid player: {0}")]
    InvalidPlayer(String),

    #[error("{field} {value} is out of range")]
    OutOfRange { field: &'static str, value: u32 },
}

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::ChartError;

/// Rank held by the starter of every depth chart.
pub const STARTER_RANK: u32 = 1;

const MAX_POSITION_LEN: usize = 8;

/// Largest jersey number a player can wear.
pub const MAX_PLAYER_NUMBER: u32 = i32::MAX as u32;

/// Accepts jersey numbers in `0..=MAX_PLAYER_NUMBER`.
pub fn check_player_number(number: u32) -> Result<u32, ChartError> {
    if number > MAX_PLAYER_NUMBER {
        return Err(ChartError::InvalidPlayer(format!(
            "number {number} is out of range, expected 0..={MAX_PLAYER_NUMBER}"
        )));
    }
    Ok(number)
}

/// Short position code, e.g. `QB`, `LWR`, `DT`.
///
/// Codes are stored upper case; parsing accepts any case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position(String);

impl Position {
    pub fn new(code: &str) -> Result<Self, ChartError> {
        let code = code.trim();
        if code.is_empty()
            || code.len() > MAX_POSITION_LEN
            || !code.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(ChartError::InvalidPosition(code.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Position {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::new(s)
    }
}

impl TryFrom<String> for Position {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Position::new(&value)
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.0
    }
}

/// The team a set of depth charts belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamScope {
    pub sport: String,
    pub team: String,
}

impl TeamScope {
    pub fn new(sport: &str, team: &str) -> Result<Self, ChartError> {
        Ok(Self {
            sport: Self::slug(sport)?,
            team: Self::slug(team)?,
        })
    }

    fn slug(value: &str) -> Result<String, ChartError> {
        let value = value.trim();
        if value.is_empty() || value.contains('/') {
            return Err(ChartError::InvalidScope(value.to_string()));
        }
        Ok(value.to_string())
    }
}

impl fmt::Display for TeamScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.sport, self.team)
    }
}

/// Namespace of a single depth chart: one position of one team.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartKey {
    pub scope: TeamScope,
    pub position: Position,
}

impl ChartKey {
    pub fn new(scope: TeamScope, position: Position) -> Self {
        Self { scope, position }
    }
}

impl fmt::Display for ChartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.scope, self.position)
    }
}

/// Where a player lands when added to a depth chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Placement {
    /// Behind everybody already in the chart.
    #[default]
    Append,
    /// At an explicit rank, pushing the current occupant and everyone behind back by one.
    At(u32),
}

impl From<Option<u32>> for Placement {
    fn from(rank: Option<u32>) -> Self {
        match rank {
            Some(rank) => Placement::At(rank),
            None => Placement::Append,
        }
    }
}

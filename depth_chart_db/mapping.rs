use depth_chart_core::models::{self as core_models};
use depth_chart_types::{
    chart::{ChartKey, Position, TeamScope},
    errors::{ChartError, DbError},
};

use crate::models::{self as db_models};

fn corrupt(what: impl std::fmt::Display) -> DbError {
    DbError::CorruptRow(what.to_string())
}

fn to_u32(value: i32, column: &str) -> Result<u32, DbError> {
    u32::try_from(value).map_err(|_| corrupt(format!("negative {column}: {value}")))
}

/// Converts a rank or jersey number into its column value.
/// Values the column cannot hold are bad input, not bad data.
pub fn to_db_int(value: u32, column: &'static str) -> Result<i32, ChartError> {
    i32::try_from(value).map_err(|_| ChartError::OutOfRange {
        field: column,
        value,
    })
}

impl TryFrom<db_models::Player> for core_models::player::Player {
    type Error = DbError;

    fn try_from(row: db_models::Player) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            scope: TeamScope::new(&row.sport, &row.team).map_err(corrupt)?,
            name: row.name,
            number: to_u32(row.number, "number")?,
            position: Position::new(&row.position).map_err(corrupt)?,
        })
    }
}

impl TryFrom<db_models::DepthChartEntry> for core_models::depth_chart::DepthChartEntry {
    type Error = DbError;

    fn try_from(row: db_models::DepthChartEntry) -> Result<Self, Self::Error> {
        let scope = TeamScope::new(&row.sport, &row.team).map_err(corrupt)?;
        let key = ChartKey::new(
            scope.clone(),
            Position::new(&row.position).map_err(corrupt)?,
        );

        let player = core_models::player::Player {
            id: row.player_id,
            scope,
            name: row.player_name,
            number: to_u32(row.player_number, "number")?,
            position: Position::new(&row.player_position).map_err(corrupt)?,
        };

        Ok(Self {
            key,
            player,
            rank: to_u32(row.depth, "depth")?,
        })
    }
}

/// Converts a list of rows, failing on the first corrupted one.
pub fn into_entries(
    rows: Vec<db_models::DepthChartEntry>,
) -> Result<Vec<core_models::depth_chart::DepthChartEntry>, DbError> {
    rows.into_iter()
        .map(core_models::depth_chart::DepthChartEntry::try_from)
        .collect()
}

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use depth_chart_app::{
    command_handlers::{
        AddPlayerToDepthChartCommandHandler, RemovePlayerFromDepthChartCommandHandler,
    },
    cqrs::{
        commands::{AddPlayerToDepthChart, RemovePlayerFromDepthChart},
        queries::{GetBackups, GetFullDepthChart},
    },
    queries_handlers::{GetBackupsHandler, GetFullDepthChartHandler},
};
use depth_chart_core::models::{depth_chart::DepthChartEntry, player::Player};
use depth_chart_types::chart::{ChartKey, Placement, Position, TeamScope, check_player_number};

use crate::{handlers::ApiError, http::AppState};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddPlayerRequest {
    pub name: String,
    pub number: u32,
    pub position: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AddPlayerParams {
    /// 1-based rank; the player is appended when missing.
    pub position_depth: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemovePlayerRequest {
    pub number: u32,
    pub position: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackupsParams {
    pub position: String,
    pub number: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerResponse {
    pub id: Uuid,
    pub name: String,
    pub number: u32,
    pub position: String,
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            name: player.name,
            number: player.number,
            position: player.position.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EntryResponse {
    pub position: String,
    pub rank: u32,
    pub player: PlayerResponse,
}

impl From<DepthChartEntry> for EntryResponse {
    fn from(entry: DepthChartEntry) -> Self {
        Self {
            position: entry.key.position.into(),
            rank: entry.rank,
            player: entry.player.into(),
        }
    }
}

fn chart_key(sport: &str, team: &str, position: &str) -> Result<ChartKey, ApiError> {
    let scope = TeamScope::new(sport, team)?;
    let position = position.parse::<Position>()?;
    Ok(ChartKey::new(scope, position))
}

/// POST /sport/{sport}/team/{team}/depthchart/add
pub async fn add_player(
    State(state): State<AppState>,
    Path((sport, team)): Path<(String, String)>,
    Query(params): Query<AddPlayerParams>,
    Json(body): Json<AddPlayerRequest>,
) -> Result<StatusCode, ApiError> {
    let scope = TeamScope::new(&sport, &team)?;
    let position = body.position.parse::<Position>()?;
    let player = Player::new(scope, &body.name, body.number, position)?;

    let command = AddPlayerToDepthChart::new(player, Placement::from(params.position_depth));
    state
        .app_bus
        .execute(command, AddPlayerToDepthChartCommandHandler::new())
        .await?;

    Ok(StatusCode::CREATED)
}

/// DELETE /sport/{sport}/team/{team}/depthchart/remove
///
/// Answers `null` when the player was not in the chart.
pub async fn remove_player(
    State(state): State<AppState>,
    Path((sport, team)): Path<(String, String)>,
    Json(body): Json<RemovePlayerRequest>,
) -> Result<Json<Option<EntryResponse>>, ApiError> {
    let command = RemovePlayerFromDepthChart {
        key: chart_key(&sport, &team, &body.position)?,
        number: check_player_number(body.number)?,
    };

    let removed = state
        .app_bus
        .execute(command, RemovePlayerFromDepthChartCommandHandler::new())
        .await?;

    Ok(Json(removed.map(EntryResponse::from)))
}

/// GET /sport/{sport}/team/{team}/depthchart/backups?position=QB&number=12
pub async fn list_backups(
    State(state): State<AppState>,
    Path((sport, team)): Path<(String, String)>,
    Query(params): Query<BackupsParams>,
) -> Result<Json<Vec<PlayerResponse>>, ApiError> {
    let query = GetBackups {
        key: chart_key(&sport, &team, &params.position)?,
        number: check_player_number(params.number)?,
    };

    let backups = state.app_bus.query(query, GetBackupsHandler::new()).await?;

    Ok(Json(backups.into_iter().map(PlayerResponse::from).collect()))
}

/// GET /sport/{sport}/team/{team}/depthchart/full
pub async fn full_depth_chart(
    State(state): State<AppState>,
    Path((sport, team)): Path<(String, String)>,
) -> Result<Json<BTreeMap<String, Vec<PlayerResponse>>>, ApiError> {
    let query = GetFullDepthChart {
        scope: TeamScope::new(&sport, &team)?,
    };

    let full = state
        .app_bus
        .query(query, GetFullDepthChartHandler::new())
        .await?;

    let body: BTreeMap<String, Vec<PlayerResponse>> = full
        .into_iter()
        .map(|(position, players)| {
            let players = players.into_iter().map(PlayerResponse::from).collect();
            (String::from(position), players)
        })
        .collect();

    Ok(Json(body))
}

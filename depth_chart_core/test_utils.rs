use rand::Rng;
use uuid::Uuid;

use depth_chart_types::chart::{ChartKey, Position, TeamScope};

use crate::models::{
    depth_chart::{DepthChart, DepthChartEntry},
    player::Player,
};

#[derive(Default, Clone)]
pub struct PlayerFactoryOptions<'a> {
    pub id: Option<Uuid>,
    pub scope: Option<TeamScope>,
    pub name: Option<&'a str>,
    pub number: Option<u32>,
    pub position: Option<Position>,
}

pub fn team_scope() -> TeamScope {
    TeamScope::new("nfl", "tampa-bay").unwrap()
}

pub fn qb_key() -> ChartKey {
    ChartKey::new(team_scope(), Position::new("QB").unwrap())
}

pub fn player_factory(options: PlayerFactoryOptions) -> Player {
    let number = options
        .number
        .unwrap_or_else(|| rand::thread_rng().gen_range(0..100));
    let default_name = format!("Player {number}");

    Player {
        id: options.id.unwrap_or_else(Uuid::new_v4),
        scope: options.scope.unwrap_or_else(team_scope),
        name: options.name.unwrap_or(&default_name).to_string(),
        number,
        position: options
            .position
            .unwrap_or_else(|| Position::new("QB").unwrap()),
    }
}

/// An entry for player `number` (same scope and position as `key`) at `rank`.
pub fn entry_factory(key: &ChartKey, number: u32, rank: u32) -> DepthChartEntry {
    let player = player_factory(PlayerFactoryOptions {
        scope: Some(key.scope.clone()),
        number: Some(number),
        position: Some(key.position.clone()),
        ..Default::default()
    });

    DepthChartEntry {
        key: key.clone(),
        player,
        rank,
    }
}

/// A contiguous chart holding `numbers` in the given order, starting at rank 1.
pub fn chart_factory(key: ChartKey, numbers: &[u32]) -> DepthChart {
    let entries = numbers
        .iter()
        .zip(1..)
        .map(|(&number, rank)| entry_factory(&key, number, rank))
        .collect();
    DepthChart::new(key, entries)
}

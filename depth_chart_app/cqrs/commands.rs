use depth_chart_core::models::{depth_chart::DepthChartEntry, player::Player};
use depth_chart_types::chart::{ChartKey, Placement};

use crate::cqrs::Command;

/// Ranks `player` in the chart of `key`.
#[derive(Debug, Clone)]
pub struct AddPlayerToDepthChart {
    pub key: ChartKey,
    pub player: Player,
    pub placement: Placement,
}

impl AddPlayerToDepthChart {
    /// The chart is the one of the player's own position.
    pub fn new(player: Player, placement: Placement) -> Self {
        let key = ChartKey::new(player.scope.clone(), player.position.clone());
        Self {
            key,
            player,
            placement,
        }
    }
}

impl Command for AddPlayerToDepthChart {
    type Output = ();

    fn chart_key(&self) -> &ChartKey {
        &self.key
    }
}

/// Takes player `number` out of the chart of `key` and closes the gap.
#[derive(Debug, Clone)]
pub struct RemovePlayerFromDepthChart {
    pub key: ChartKey,
    pub number: u32,
}

impl Command for RemovePlayerFromDepthChart {
    type Output = Option<DepthChartEntry>;

    fn chart_key(&self) -> &ChartKey {
        &self.key
    }
}

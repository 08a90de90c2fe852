use depth_chart_core::models::{depth_chart::FullDepthChart, player::Player};
use depth_chart_types::chart::{ChartKey, TeamScope};

use crate::cqrs::Query;

/// Players ranked behind player `number` in the chart of `key`.
pub struct GetBackups {
    pub key: ChartKey,
    pub number: u32,
}

impl Query for GetBackups {
    type Output = Vec<Player>;
}

/// Every chart of a team.
pub struct GetFullDepthChart {
    pub scope: TeamScope,
}

impl Query for GetFullDepthChart {
    type Output = FullDepthChart;
}

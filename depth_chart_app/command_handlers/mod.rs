mod add_player_to_depth_chart;
mod remove_player_from_depth_chart;

pub use add_player_to_depth_chart::AddPlayerToDepthChartCommandHandler;
pub use remove_player_from_depth_chart::RemovePlayerFromDepthChartCommandHandler;

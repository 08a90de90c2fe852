mod depth_chart_repository;
mod player_repository;

pub use depth_chart_repository::DepthChartRepository;
pub use player_repository::PlayerRepository;

mod depth_chart_repository;
mod player_repository;

pub use depth_chart_repository::PostgresDepthChartRepository;
pub use player_repository::PostgresPlayerRepository;

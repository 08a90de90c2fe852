mod get_backups;
mod get_full_depth_chart;

pub use get_backups::GetBackupsHandler;
pub use get_full_depth_chart::GetFullDepthChartHandler;

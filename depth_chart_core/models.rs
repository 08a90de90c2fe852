pub mod depth_chart;
pub mod player;

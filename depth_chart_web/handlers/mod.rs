mod depth_chart_handler;
mod error;

pub use depth_chart_handler::*;
pub use error::ApiError;

pub mod chart;
pub mod errors;

pub use errors::Result;

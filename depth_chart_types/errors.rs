use thiserror::Error;

pub mod chart_error;
pub mod db_error;

pub use chart_error::ChartError;
pub use db_error::DbError;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("An unknown error occurred: {0}")]
    Unknown(String),
}

/// Coarse classification used by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Conflict,
    InvalidInput,
    Internal,
}

impl ApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::Chart(err) => match err {
                ChartError::PlayerAlreadyRanked { .. } => ErrorKind::Conflict,
                ChartError::RankOutOfRange { .. }
                | ChartError::InvalidPosition(_)
                | ChartError::InvalidScope(_)
                | ChartError::InvalidPlayer(_)
                | ChartError::OutOfRange { .. } => ErrorKind::InvalidInput,
            },
            ApplicationError::Db(DbError::UniqueViolation { .. }) => ErrorKind::Conflict,
            _ => ErrorKind::Internal,
        }
    }
}

impl From<sqlx::Error> for ApplicationError {
    fn from(err: sqlx::Error) -> Self {
        ApplicationError::Db(err.into())
    }
}

impl From<anyhow::Error> for ApplicationError {
    fn from(err: anyhow::Error) -> Self {
        ApplicationError::Unknown(err.to_string())
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use depth_chart_types::errors::{ApplicationError, ChartError, DbError, ErrorKind};

/// Maps an `ApplicationError` onto an HTTP status with a plain text body.
#[derive(Debug)]
pub struct ApiError(pub ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        Self(err)
    }
}

impl From<ChartError> for ApiError {
    fn from(err: ChartError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        match err.kind() {
            ErrorKind::Conflict => {
                let detail = match &err {
                    ApplicationError::Db(DbError::UniqueViolation { constraint }) => {
                        constraint.clone()
                    }
                    other => other.to_string(),
                };
                (
                    StatusCode::CONFLICT,
                    format!("Unique constraint violation: {detail}"),
                )
                    .into_response()
            }
            ErrorKind::InvalidInput => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
            ErrorKind::Internal => {
                tracing::error!("Request failed: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
                    .into_response()
            }
        }
    }
}

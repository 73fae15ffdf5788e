use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced at the handler boundary, each mapped onto one JSON response
#[derive(Debug, Error)]
pub enum RelayError {
    /// A required field is missing or empty
    #[error("{0}")]
    InvalidRequest(&'static str),

    /// The credential for this endpoint is not configured
    #[error("{0}")]
    ServiceUnavailable(&'static str),

    /// The upstream call failed, returned an error status, or returned an
    /// unusable payload. `details` is only sent to the client when set.
    #[error("{error}")]
    Upstream {
        error: &'static str,
        details: Option<String>,
    },
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::ServiceUnavailable(_) | Self::Upstream { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::InvalidRequest(error) | Self::ServiceUnavailable(error) => ErrorBody {
                error: error.to_string(),
                details: None,
            },
            Self::Upstream { error, details } => ErrorBody {
                error: error.to_string(),
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sofr_curve_core::{ProjectionError, RateObservation};
use thiserror::Error;

/// Client mistakes in a projection request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid request: JSON data missing.")]
    MissingBody,

    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid parameter type for rateFloor, rateCeiling, or rateSpread.")]
    InvalidParameterType,

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error("Failed to calculate rates due to invalid parameters.")]
    EmptySchedule,
}

/// Errors surfaced at the HTTP boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    BadRequest(#[from] RequestError),

    /// Store failure while listing the curve; the body still carries an empty `rates` array.
    #[error("Failed to fetch SOFR rates.")]
    RatesUnavailable(String),

    #[error("{message}")]
    Internal {
        message: &'static str,
        details: String,
    },
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rates: Option<Vec<RateObservation>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.to_string();
        let (status, body) = match self {
            Self::BadRequest(_) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error,
                    details: None,
                    rates: None,
                },
            ),
            Self::RatesUnavailable(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error,
                    details: Some(details),
                    rates: Some(Vec::new()),
                },
            ),
            Self::Internal { details, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error,
                    details: Some(details),
                    rates: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

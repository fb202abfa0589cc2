use axum::{extract::State, Json};
use serde_json::Value;
use sofr_curve_core::{projection, ProjectedRate, RateObservation};

use crate::error::{ApiError, RequestError};
use crate::request::parse_loan_terms;
use crate::state::AppState;

/// Lists the stored forward curve ordered by reset date.
///
/// # Errors
/// Returns `ApiError::RatesUnavailable` if the store cannot be read.
pub async fn list_rates(
    State(state): State<AppState>,
) -> Result<Json<Vec<RateObservation>>, ApiError> {
    tracing::info!("Rates endpoint accessed");

    let rates = state.store.list_all().await.map_err(|e| {
        tracing::error!("Error fetching SOFR rates: {:#}", e);
        ApiError::RatesUnavailable(format!("{e:#}"))
    })?;

    if rates.is_empty() {
        tracing::warn!("No SOFR rates found in the database");
    } else {
        tracing::info!("Fetched {} SOFR rates", rates.len());
    }

    Ok(Json(rates))
}

/// Projects monthly loan rates from today to the requested maturity.
///
/// The body is validated completely before the store is read.
///
/// # Errors
/// Returns `ApiError::BadRequest` for invalid input or an empty schedule, and
/// `ApiError::Internal` if the store cannot be read.
pub async fn project_rates(
    State(state): State<AppState>,
    payload: Option<Json<Value>>,
) -> Result<Json<Vec<ProjectedRate>>, ApiError> {
    tracing::info!("Projection endpoint accessed");

    let Some(Json(body)) = payload else {
        tracing::warn!("No JSON data provided in request");
        return Err(RequestError::MissingBody.into());
    };

    let terms = parse_loan_terms(&body).map_err(|e| {
        tracing::warn!("Rejected projection request: {}", e);
        e
    })?;

    let today = state.clock.today();
    let observations = state.store.list_from(today).await.map_err(|e| {
        tracing::error!("Error reading forward curve: {:#}", e);
        ApiError::Internal {
            message: "Failed to calculate rates.",
            details: format!("{e:#}"),
        }
    })?;

    let schedule = projection::project_rates(&terms, today, &observations);
    if schedule.is_empty() {
        tracing::warn!("No rates calculated for maturity {}", terms.maturity_date());
        return Err(RequestError::EmptySchedule.into());
    }

    tracing::info!(
        "Generated interest rates for {} of {} months to maturity",
        schedule.len(),
        projection::schedule_length(today, terms.maturity_date())
    );
    Ok(Json(schedule))
}

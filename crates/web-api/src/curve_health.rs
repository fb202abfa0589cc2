//! Curve health endpoint for monitoring data freshness.
//!
//! Provides `/health`, reporting how much of the stored forward curve lies in
//! the future. A curve with no future observations cannot price a loan.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sofr_curve_data::CurveSummary;

use crate::state::AppState;

/// Health of the stored curve.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveHealthResponse {
    /// "healthy", "degraded", or "unhealthy".
    pub status: String,
    /// Current server timestamp.
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub summary: CurveSummary,
}

/// Determine health status from the curve summary.
fn determine_status(summary: &CurveSummary) -> &'static str {
    if summary.future_observation_count > 0 {
        "healthy"
    } else if summary.observation_count > 0 {
        // Only stale points left, projections will come back empty
        "degraded"
    } else {
        "unhealthy"
    }
}

/// GET /health - Returns the state of the stored forward curve.
///
/// Store failures are reported as "unhealthy" rather than as an error status.
pub async fn curve_health(State(state): State<AppState>) -> Json<CurveHealthResponse> {
    let summary = match state.store.summary(state.clock.today()).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Failed to query curve health: {:#}", e);
            CurveSummary::empty()
        }
    };

    Json(CurveHealthResponse {
        status: determine_status(&summary).to_string(),
        timestamp: Utc::now(),
        summary,
    })
}

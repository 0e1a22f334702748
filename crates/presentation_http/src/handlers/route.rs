//! Route lookup endpoint

use axum::{Json, extract::State};
use domain::RouteResult;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Longest accepted place text
pub const MAX_PLACE_LEN: u64 = 512;

/// Route lookup request
///
/// Missing fields deserialize as empty strings and are rejected by the
/// route service as invalid input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RouteRequest {
    #[serde(default)]
    #[validate(length(max = MAX_PLACE_LEN, message = "must be at most 512 characters"))]
    pub from: String,

    #[serde(default)]
    #[validate(length(max = MAX_PLACE_LEN, message = "must be at most 512 characters"))]
    pub to: String,
}

/// Geocode both places and return the candidate routes with the fastest marked
#[instrument(skip_all, fields(from = %request.from, to = %request.to))]
pub async fn find_route(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RouteRequest>,
) -> Result<Json<RouteResult>, ApiError> {
    let result = state
        .route_service
        .resolve_route(&request.from, &request.to)
        .await?;

    info!(
        candidates = result.candidates().len(),
        best_index = result.best_index(),
        "Route resolved"
    );
    Ok(Json(result))
}

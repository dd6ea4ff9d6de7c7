//! Wall of Fame handler

use axum::{extract::State, Json};
use social_service::{WallOfFameResponse, WallOfFameService};

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Latest contest winner, `null` before the first winning round
///
/// GET /wall-of-fame
pub async fn get_wall_of_fame(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Option<WallOfFameResponse>>> {
    let service = WallOfFameService::new(state.service_context());
    Ok(Json(service.latest().await?))
}

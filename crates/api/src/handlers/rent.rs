//! Handler for `POST /rent`.

use axum::extract::State;
use axum::Json;
use numrent_core::session::SessionView;

use crate::error::AppResult;
use crate::middleware::auth::MaybeUser;
use crate::services::rental;
use crate::state::AppState;

/// POST /api/v1/rent
///
/// Rent a number for the fixed service. Authenticated callers are
/// balance-checked, recorded, and debited; anonymous callers get the session
/// with no bookkeeping. See [`rental::rent_number`] for the full path.
pub async fn rent(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> AppResult<Json<SessionView>> {
    let view = rental::rent_number(&state, user.as_ref()).await?;
    Ok(Json(view))
}

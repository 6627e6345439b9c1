use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde_json::{json, Value};

use tatkal_booking::{BookingConfirmation, BookingRequest};

use crate::error::ApiError;
use crate::middleware::auth::Claims;
use crate::state::AppState;

/// POST /booking. The booking owner is the authenticated caller, never a
/// field of the request body.
pub async fn book(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<BookingConfirmation>, ApiError> {
    let confirmation = state.engine.book_ticket(request, &claims.sub).await?;
    Ok(Json(confirmation))
}

/// GET /booking/status/{pnr}
pub async fn status(
    State(state): State<AppState>,
    Path(pnr): Path<String>,
) -> Result<Json<BookingConfirmation>, ApiError> {
    let confirmation = state.engine.booking_by_pnr(&pnr).await?;
    Ok(Json(confirmation))
}

/// DELETE /booking/cancel/{pnr}
pub async fn cancel(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(pnr): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.engine.cancel_by_pnr(&pnr, &claims.sub).await?;
    Ok(Json(json!({ "message": "Booking cancelled successfully" })))
}

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use marquee_domain::{BookingTicket, EngineError};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", post(create_booking))
        .route("/v1/bookings/{booking_id}", get(get_booking))
        .route("/v1/my/bookings", get(my_bookings))
}

#[derive(Debug, Deserialize)]
struct CreateBookingRequest {
    show_id: Uuid,
    seat_ids: Vec<Uuid>,
}

/// Identity is handled by the upstream collaborator; the engine trusts the
/// verified userId it forwards in `x-user-id`.
fn caller_id(headers: &HeaderMap) -> Result<Uuid, ApiError> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ApiError(EngineError::invalid("missing or malformed x-user-id header")))
}

async fn create_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<BookingTicket>, ApiError> {
    let user_id = caller_id(&headers)?;
    let ticket = state
        .allocator
        .create_booking(user_id, req.show_id, &req.seat_ids)
        .await?;
    Ok(Json(ticket))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingTicket>, ApiError> {
    let ticket = state.allocator.get_booking(booking_id).await?;
    Ok(Json(ticket))
}

async fn my_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<BookingTicket>>, ApiError> {
    let user_id = caller_id(&headers)?;
    let tickets = state.allocator.bookings_for_user(user_id).await?;
    Ok(Json(tickets))
}

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use marquee_domain::Seat;
use marquee_store::SeatRepository;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/shows/{show_id}/seats", get(list_seats))
        .route("/v1/shows/{show_id}/seats/available", get(available_seats))
}

async fn list_seats(
    State(state): State<AppState>,
    Path(show_id): Path<Uuid>,
) -> Result<Json<Vec<Seat>>, ApiError> {
    let seats = SeatRepository::list_seats(&state.db.pool, show_id).await?;
    Ok(Json(seats))
}

async fn available_seats(
    State(state): State<AppState>,
    Path(show_id): Path<Uuid>,
) -> Result<Json<Vec<Uuid>>, ApiError> {
    let free = state.availability.available_seats(show_id).await?;
    Ok(Json(free))
}

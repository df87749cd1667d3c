use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use marquee_domain::{Movie, ShowListing};
use marquee_store::CatalogRepository;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/movies", get(list_movies))
        .route("/v1/shows", get(list_shows))
}

async fn list_movies(State(state): State<AppState>) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = CatalogRepository::list_movies(&state.db.pool).await?;
    Ok(Json(movies))
}

#[derive(Debug, Deserialize)]
struct ShowsQuery {
    movie_id: Option<Uuid>,
    /// When set, booked-out shows are dropped from the listing.
    #[serde(default)]
    only_available: bool,
}

async fn list_shows(
    State(state): State<AppState>,
    Query(query): Query<ShowsQuery>,
) -> Result<Json<Vec<ShowListing>>, ApiError> {
    let shows =
        CatalogRepository::list_shows(&state.db.pool, query.movie_id, query.only_available)
            .await?;
    Ok(Json(shows))
}

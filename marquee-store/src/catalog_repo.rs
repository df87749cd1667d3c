use chrono::{DateTime, Utc};
use marquee_catalog::RoomTemplate;
use marquee_domain::{EngineError, Movie, Show, ShowListing};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

// Listing carries the free-seat count so browsing users can see (or skip)
// booked-out shows without one availability call per show.
const SHOW_LISTING_SQL: &str = "SELECT sh.id, sh.movie_id, sh.start_time, sh.end_time, sh.base_price, sh.created_at, \
     (SELECT COUNT(*) FROM seats s WHERE s.show_id = sh.id AND NOT EXISTS \
        (SELECT 1 FROM booking_details d WHERE d.show_seat_id = s.id)) AS free_seats \
     FROM shows sh";

#[derive(sqlx::FromRow)]
struct ShowListingRow {
    id: Uuid,
    movie_id: Uuid,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    base_price: Decimal,
    created_at: DateTime<Utc>,
    free_seats: i64,
}

impl From<ShowListingRow> for ShowListing {
    fn from(row: ShowListingRow) -> Self {
        ShowListing {
            show: Show {
                id: row.id,
                movie_id: row.movie_id,
                start_time: row.start_time,
                end_time: row.end_time,
                base_price: row.base_price,
                created_at: row.created_at,
            },
            free_seats: row.free_seats,
        }
    }
}

/// Read-mostly movie/show metadata, plus the administrative creation
/// operations the cinema owner runs before any booking exists.
pub struct CatalogRepository;

impl CatalogRepository {
    pub async fn create_movie(
        pool: &PgPool,
        title: &str,
        description: &str,
        duration_minutes: i32,
    ) -> Result<Movie, EngineError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO movies (id, title, description, duration_minutes) VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(duration_minutes)
        .execute(pool)
        .await?;

        Self::get_movie(pool, id).await
    }

    pub async fn get_movie(pool: &PgPool, id: Uuid) -> Result<Movie, EngineError> {
        sqlx::query_as::<_, Movie>(
            "SELECT id, title, description, duration_minutes, created_at FROM movies WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| EngineError::not_found("movie", id))
    }

    pub async fn list_movies(pool: &PgPool) -> Result<Vec<Movie>, EngineError> {
        let movies = sqlx::query_as::<_, Movie>(
            "SELECT id, title, description, duration_minutes, created_at FROM movies ORDER BY title",
        )
        .fetch_all(pool)
        .await?;
        Ok(movies)
    }

    /// Creates the show and copies the room template into per-show seat
    /// instances in one transaction. Seats are never added or removed after
    /// this point.
    pub async fn create_show(
        pool: &PgPool,
        movie_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        base_price: Decimal,
        template: &RoomTemplate,
    ) -> Result<Show, EngineError> {
        if end_time <= start_time {
            return Err(EngineError::invalid("show end time must be after start time"));
        }
        template
            .validate()
            .map_err(|e| EngineError::invalid(e.to_string()))?;
        Self::get_movie(pool, movie_id).await?;

        let show_id = Uuid::new_v4();
        let mut tx = pool.begin().await?;

        sqlx::query(
            "INSERT INTO shows (id, movie_id, start_time, end_time, base_price) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(show_id)
        .bind(movie_id)
        .bind(start_time)
        .bind(end_time)
        .bind(base_price)
        .execute(&mut *tx)
        .await?;

        for (label, seat_type) in template.seat_layout() {
            sqlx::query("INSERT INTO seats (id, show_id, label, seat_type) VALUES ($1, $2, $3, $4)")
                .bind(Uuid::new_v4())
                .bind(show_id)
                .bind(&label)
                .bind(seat_type.as_str())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!(show = %show_id, seats = template.capacity(), "show created from room template");

        Self::get_show(pool, show_id).await
    }

    pub async fn get_show(pool: &PgPool, id: Uuid) -> Result<Show, EngineError> {
        sqlx::query_as::<_, Show>(
            "SELECT id, movie_id, start_time, end_time, base_price, created_at FROM shows WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| EngineError::not_found("show", id))
    }

    /// Shows ordered by start time ascending, each with its free-seat
    /// count, optionally filtered by movie. `only_available` drops shows
    /// that are fully booked out.
    pub async fn list_shows(
        pool: &PgPool,
        movie_id: Option<Uuid>,
        only_available: bool,
    ) -> Result<Vec<ShowListing>, EngineError> {
        let rows = match movie_id {
            Some(movie_id) => {
                Self::get_movie(pool, movie_id).await?;
                sqlx::query_as::<_, ShowListingRow>(&format!(
                    "{SHOW_LISTING_SQL} WHERE sh.movie_id = $1 ORDER BY sh.start_time"
                ))
                .bind(movie_id)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ShowListingRow>(&format!(
                    "{SHOW_LISTING_SQL} ORDER BY sh.start_time"
                ))
                .fetch_all(pool)
                .await?
            }
        };

        let mut listings: Vec<ShowListing> = rows.into_iter().map(ShowListing::from).collect();
        if only_available {
            listings.retain(|l| l.free_seats > 0);
        }
        Ok(listings)
    }
}

use marquee_domain::{EngineError, Seat, SeatType};
use sqlx::PgPool;
use uuid::Uuid;

/// Fixed per-show seat inventory. Rows are created in bulk at show
/// creation and read-only from then on; no locking is needed here.
pub struct SeatRepository;

#[derive(sqlx::FromRow)]
struct SeatRow {
    id: Uuid,
    show_id: Uuid,
    label: String,
    seat_type: String,
}

impl SeatRow {
    fn into_seat(self) -> Result<Seat, EngineError> {
        let seat_type: SeatType = self
            .seat_type
            .parse()
            .map_err(|e: marquee_domain::models::UnknownSeatType| {
                EngineError::Storage(sqlx::Error::Decode(Box::new(e)))
            })?;
        Ok(Seat {
            id: self.id,
            show_id: self.show_id,
            label: self.label,
            seat_type,
        })
    }
}

impl SeatRepository {
    /// Seats of a show in stable label order, so clients can render a
    /// consistent seat map.
    pub async fn list_seats(pool: &PgPool, show_id: Uuid) -> Result<Vec<Seat>, EngineError> {
        let rows = sqlx::query_as::<_, SeatRow>(
            "SELECT id, show_id, label, seat_type FROM seats WHERE show_id = $1 ORDER BY label",
        )
        .bind(show_id)
        .fetch_all(pool)
        .await?;
        rows.into_iter().map(SeatRow::into_seat).collect()
    }

    pub async fn get_seat(pool: &PgPool, id: Uuid) -> Result<Seat, EngineError> {
        sqlx::query_as::<_, SeatRow>(
            "SELECT id, show_id, label, seat_type FROM seats WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| EngineError::not_found("seat", id))?
        .into_seat()
    }

    pub async fn seats_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Seat>, EngineError> {
        let rows = sqlx::query_as::<_, SeatRow>(
            "SELECT id, show_id, label, seat_type FROM seats WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;
        rows.into_iter().map(SeatRow::into_seat).collect()
    }

    /// Point-in-time availability projection: every seat of the show not
    /// referenced by a committed booking detail. Advisory for UI purposes;
    /// the allocator re-checks under its own transaction.
    pub async fn available_seat_ids(
        pool: &PgPool,
        show_id: Uuid,
    ) -> Result<Vec<Uuid>, EngineError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT s.id FROM seats s \
             WHERE s.show_id = $1 \
               AND NOT EXISTS (SELECT 1 FROM booking_details d WHERE d.show_seat_id = s.id) \
             ORDER BY s.label",
        )
        .bind(show_id)
        .fetch_all(pool)
        .await?;
        Ok(ids)
    }
}

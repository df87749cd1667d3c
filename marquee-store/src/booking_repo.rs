use marquee_domain::{Booking, BookingDetail, BookingTicket, EngineError, SeatType, TicketSeat};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Transaction-scoped booking writes plus committed-booking reads.
///
/// The claim/insert primitives take an open transaction so the allocator
/// controls atomicity: either every seat of a request is claimed and the
/// booking committed, or the transaction rolls back and nothing persists.
pub struct BookingRepository;

#[derive(sqlx::FromRow)]
struct TicketSeatRow {
    show_seat_id: Uuid,
    label: String,
    seat_type: String,
    price: Decimal,
}

impl BookingRepository {
    /// Locks the seat row against concurrent allocators and reports whether
    /// it is still unclaimed. The lock is held until the transaction ends,
    /// which makes check-and-reserve atomic per seat: a competing
    /// transaction blocks here until this one commits or rolls back.
    pub async fn claim(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        seat_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query("SELECT id FROM seats WHERE id = $1 FOR UPDATE")
            .bind(seat_id)
            .fetch_one(&mut **tx)
            .await?;

        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM booking_details WHERE show_seat_id = $1)",
        )
        .bind(seat_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(!taken)
    }

    pub async fn insert_booking(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        booking: &Booking,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO bookings (id, user_id, show_id, created_at) VALUES ($1, $2, $3, $4)")
            .bind(booking.id)
            .bind(booking.user_id)
            .bind(booking.show_id)
            .bind(booking.created_at)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    pub async fn insert_detail(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        detail: &BookingDetail,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO booking_details (id, booking_id, show_seat_id, price) VALUES ($1, $2, $3, $4)",
        )
        .bind(detail.id)
        .bind(detail.booking_id)
        .bind(detail.show_seat_id)
        .bind(detail.price)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// A committed booking with its seat-to-price mapping, seats in label
    /// order. Prices are read back exactly as charged at commit time.
    pub async fn fetch_ticket(pool: &PgPool, booking_id: Uuid) -> Result<BookingTicket, EngineError> {
        let booking = sqlx::query_as::<_, Booking>(
            "SELECT id, user_id, show_id, created_at FROM bookings WHERE id = $1",
        )
        .bind(booking_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| EngineError::not_found("booking", booking_id))?;

        let rows = sqlx::query_as::<_, TicketSeatRow>(
            "SELECT d.show_seat_id, s.label, s.seat_type, d.price \
             FROM booking_details d \
             JOIN seats s ON s.id = d.show_seat_id \
             WHERE d.booking_id = $1 \
             ORDER BY s.label",
        )
        .bind(booking_id)
        .fetch_all(pool)
        .await?;

        let mut seats = Vec::with_capacity(rows.len());
        for row in rows {
            let seat_type: SeatType = row
                .seat_type
                .parse()
                .map_err(|e: marquee_domain::models::UnknownSeatType| {
                    EngineError::Storage(sqlx::Error::Decode(Box::new(e)))
                })?;
            seats.push(TicketSeat {
                seat_id: row.show_seat_id,
                label: row.label,
                seat_type,
                price: row.price,
            });
        }
        let total = seats.iter().map(|s| s.price).sum();

        Ok(BookingTicket {
            booking,
            seats,
            total,
        })
    }

    pub async fn tickets_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<BookingTicket>, EngineError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM bookings WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let mut tickets = Vec::with_capacity(ids.len());
        for id in ids {
            tickets.push(Self::fetch_ticket(pool, id).await?);
        }
        Ok(tickets)
    }
}

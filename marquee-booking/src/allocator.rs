use crate::validate::{check_seats_belong, validate_selection};
use chrono::Utc;
use marquee_catalog::PricingEngine;
use marquee_domain::{Booking, BookingDetail, BookingTicket, EngineError, Seat, TicketSeat};
use marquee_store::{BookingRepository, CatalogRepository, SeatRepository, UserRepository};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// The transactional state machine that turns a seat selection into a
/// durable, non-conflicting reservation.
///
/// Correctness is pushed into the storage transaction (row locks plus the
/// unique constraint on booked seats), never into process memory, so the
/// no-double-booking guarantee holds across service instances.
pub struct BookingAllocator {
    pool: PgPool,
    pricing: PricingEngine,
    claim_timeout: Duration,
}

impl BookingAllocator {
    pub fn new(pool: PgPool, pricing: PricingEngine, claim_timeout: Duration) -> Self {
        Self {
            pool,
            pricing,
            claim_timeout,
        }
    }

    /// Validating -> Reserving -> {Committed | Aborted}. All-or-nothing
    /// across the requested seat set: partial grants are never returned.
    pub async fn create_booking(
        &self,
        user_id: Uuid,
        show_id: Uuid,
        seat_ids: &[Uuid],
    ) -> Result<BookingTicket, EngineError> {
        UserRepository::get_user(&self.pool, user_id).await?;
        let show = CatalogRepository::get_show(&self.pool, show_id).await?;
        let ordered = validate_selection(&show, Utc::now(), seat_ids)?;

        let seats = SeatRepository::seats_by_ids(&self.pool, &ordered).await?;
        check_seats_belong(show_id, &ordered, &seats)?;

        // Price each seat up front; the charged price is fixed at commit
        // time and never recomputed.
        let mut priced = Vec::with_capacity(ordered.len());
        for id in &ordered {
            let seat = seats
                .iter()
                .find(|s| s.id == *id)
                .cloned()
                .ok_or_else(|| EngineError::not_found("seat", *id))?;
            let price = self
                .pricing
                .price_for(show.base_price, seat.seat_type)
                .map_err(|e| EngineError::invalid(e.to_string()))?;
            priced.push((seat, price));
        }

        match tokio::time::timeout(
            self.claim_timeout,
            self.commit_claims(user_id, show_id, &priced),
        )
        .await
        {
            Ok(result) => result,
            // Dropping the in-flight transaction rolls it back; fail closed.
            Err(_) => Err(EngineError::ClaimTimeout(self.claim_timeout.as_millis() as u64)),
        }
    }

    /// The Reserving step: claims run in sorted seat order (stable lock
    /// order across concurrent allocators) inside one transaction.
    async fn commit_claims(
        &self,
        user_id: Uuid,
        show_id: Uuid,
        priced: &[(Seat, Decimal)],
    ) -> Result<BookingTicket, EngineError> {
        let mut tx = self.pool.begin().await?;

        for (seat, _) in priced {
            if !BookingRepository::claim(&mut tx, seat.id).await? {
                debug!(seat = %seat.id, label = %seat.label, "seat already claimed, aborting booking");
                return Err(EngineError::SeatUnavailable(seat.id));
            }
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            user_id,
            show_id,
            created_at: Utc::now(),
        };
        BookingRepository::insert_booking(&mut tx, &booking).await?;

        let mut seats = Vec::with_capacity(priced.len());
        for (seat, price) in priced {
            let detail = BookingDetail {
                id: Uuid::new_v4(),
                booking_id: booking.id,
                show_seat_id: seat.id,
                price: *price,
            };
            BookingRepository::insert_detail(&mut tx, &detail)
                .await
                .map_err(|e| {
                    // The unique constraint on show_seat_id is the storage
                    // backstop for the claim check.
                    if is_unique_violation(&e) {
                        EngineError::SeatUnavailable(seat.id)
                    } else {
                        EngineError::Storage(e)
                    }
                })?;
            seats.push(TicketSeat {
                seat_id: seat.id,
                label: seat.label.clone(),
                seat_type: seat.seat_type,
                price: *price,
            });
        }

        tx.commit().await?;

        seats.sort_by(|a, b| a.label.cmp(&b.label));
        let total = seats.iter().map(|s| s.price).sum();
        info!(booking = %booking.id, show = %show_id, seats = seats.len(), "booking committed");

        Ok(BookingTicket {
            booking,
            seats,
            total,
        })
    }

    pub async fn get_booking(&self, booking_id: Uuid) -> Result<BookingTicket, EngineError> {
        BookingRepository::fetch_ticket(&self.pool, booking_id).await
    }

    pub async fn bookings_for_user(&self, user_id: Uuid) -> Result<Vec<BookingTicket>, EngineError> {
        UserRepository::get_user(&self.pool, user_id).await?;
        BookingRepository::tickets_for_user(&self.pool, user_id).await
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

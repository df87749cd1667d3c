use marquee_domain::EngineError;
use marquee_store::{CatalogRepository, SeatRepository};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Computed projection answering "which seats are free for this show right
/// now". Advisory for UI purposes only; the allocator re-verifies every
/// seat under its own transaction.
pub struct AvailabilityView {
    pool: PgPool,
}

impl AvailabilityView {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Free seats in label order. A show that already started is no longer
    /// bookable and reports an empty set.
    pub async fn available_seats(&self, show_id: Uuid) -> Result<Vec<Uuid>, EngineError> {
        let show = CatalogRepository::get_show(&self.pool, show_id).await?;
        if !show.is_bookable(Utc::now()) {
            return Ok(Vec::new());
        }
        SeatRepository::available_seat_ids(&self.pool, show_id).await
    }
}

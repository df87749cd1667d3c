use marquee_booking::{AvailabilityView, BookingAllocator};
use marquee_store::DbClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: DbClient,
    pub allocator: Arc<BookingAllocator>,
    pub availability: Arc<AvailabilityView>,
}

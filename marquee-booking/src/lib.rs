pub mod allocator;
pub mod availability;
mod validate;

pub use allocator::BookingAllocator;
pub use availability::AvailabilityView;

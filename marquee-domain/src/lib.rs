pub mod error;
pub mod models;

pub use error::EngineError;
pub use models::{
    Booking, BookingDetail, BookingTicket, Movie, Seat, SeatType, Show, ShowListing, TicketSeat,
    User,
};

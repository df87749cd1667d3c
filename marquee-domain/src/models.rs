use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub duration_minutes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Show {
    pub id: Uuid,
    pub movie_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub base_price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Show {
    /// A show stops being bookable the moment it starts.
    pub fn is_bookable(&self, now: DateTime<Utc>) -> bool {
        now < self.start_time
    }
}

/// A show as presented to browsing users: the show itself plus how many
/// seats are still free, so booked-out shows can be spotted or filtered
/// without one availability call per show.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowListing {
    pub show: Show,
    pub free_seats: i64,
}

/// Seat classes with a configurable percentage premium each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatType {
    Standard,
    Vip,
    Couple,
    SuperVip,
}

impl SeatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatType::Standard => "standard",
            SeatType::Vip => "vip",
            SeatType::Couple => "couple",
            SeatType::SuperVip => "super_vip",
        }
    }
}

impl fmt::Display for SeatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown seat type: {0}")]
pub struct UnknownSeatType(pub String);

impl FromStr for SeatType {
    type Err = UnknownSeatType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(SeatType::Standard),
            "vip" => Ok(SeatType::Vip),
            "couple" => Ok(SeatType::Couple),
            "super_vip" => Ok(SeatType::SuperVip),
            other => Err(UnknownSeatType(other.to_string())),
        }
    }
}

/// A bookable unit scoped to exactly one show. Seat instances are copied
/// from a room template at show creation and never modified afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub id: Uuid,
    pub show_id: Uuid,
    pub label: String,
    pub seat_type: SeatType,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub show_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// One seat's inclusion in one booking, with the price actually charged.
/// The price is a historical fact fixed at commit time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDetail {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub show_seat_id: Uuid,
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketSeat {
    pub seat_id: Uuid,
    pub label: String,
    pub seat_type: SeatType,
    pub price: Decimal,
}

/// A committed booking with its seat-to-price mapping, the record handed
/// back to the user so they know where they are sitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingTicket {
    pub booking: Booking,
    pub seats: Vec<TicketSeat>,
    pub total: Decimal,
}

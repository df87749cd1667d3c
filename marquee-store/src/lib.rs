pub mod app_config;
pub mod booking_repo;
pub mod catalog_repo;
pub mod database;
pub mod seat_repo;
pub mod user_repo;

pub use app_config::{BookingRules, Config};
pub use booking_repo::BookingRepository;
pub use catalog_repo::CatalogRepository;
pub use database::DbClient;
pub use seat_repo::SeatRepository;
pub use user_repo::UserRepository;
